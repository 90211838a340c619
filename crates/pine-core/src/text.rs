// Dweve Pine - Pine Script Language Tools
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line splitting and UTF-16 column arithmetic.
//!
//! Editors address positions as (line, UTF-16 code unit). Rust strings are
//! UTF-8, so every column that crosses the protocol boundary goes through
//! the helpers here. None of them panic on out-of-range input: offsets are
//! clamped to the line and rounded down to a character boundary.

/// Split text into lines on `\n`, dropping one trailing `\r` per line.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty line,
/// so the number of lines matches what an editor shows.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// UTF-16 column of byte offset `byte` within `line`.
///
/// Offsets inside a multi-byte character round down to its start.
pub fn byte_to_utf16(line: &str, byte: usize) -> u32 {
    utf16_len(safe_slice_to(line, byte))
}

/// Byte offset of UTF-16 column `col` within `line`.
///
/// Returns `None` if `col` is past the end of the line. A column that
/// splits a surrogate pair rounds down to the start of that character.
pub fn utf16_to_byte(line: &str, col: u32) -> Option<usize> {
    let mut units = 0u32;
    for (byte, ch) in line.char_indices() {
        if units >= col {
            return Some(byte);
        }
        let next = units + ch.len_utf16() as u32;
        if next > col {
            return Some(byte);
        }
        units = next;
    }
    (units >= col).then_some(line.len())
}

/// Slice of `s` up to byte `pos`, rounded down to a character boundary.
pub fn safe_slice_to(s: &str, pos: usize) -> &str {
    if pos >= s.len() {
        return s;
    }
    &s[..floor_char_boundary(s, pos)]
}

fn floor_char_boundary(s: &str, mut pos: usize) -> usize {
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Identifier character: ASCII letter, digit or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_strips_carriage_return() {
        assert_eq!(lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(lines("a\n"), vec!["a", ""]);
        assert_eq!(lines(""), vec![""]);
    }

    #[test]
    fn test_utf16_len() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn test_byte_to_utf16() {
        let line = "é = 😀x";
        // é is 2 bytes, 1 unit
        assert_eq!(byte_to_utf16(line, 2), 1);
        // 😀 starts at byte 5, ends at 9
        assert_eq!(byte_to_utf16(line, 5), 4);
        assert_eq!(byte_to_utf16(line, 9), 6);
        // mid-character rounds down
        assert_eq!(byte_to_utf16(line, 6), 4);
        assert_eq!(byte_to_utf16(line, 100), 7);
    }

    #[test]
    fn test_utf16_to_byte() {
        let line = "é😀x";
        assert_eq!(utf16_to_byte(line, 0), Some(0));
        assert_eq!(utf16_to_byte(line, 1), Some(2));
        // inside the surrogate pair
        assert_eq!(utf16_to_byte(line, 2), Some(2));
        assert_eq!(utf16_to_byte(line, 3), Some(6));
        assert_eq!(utf16_to_byte(line, 4), Some(7));
        assert_eq!(utf16_to_byte(line, 5), None);
        assert_eq!(utf16_to_byte("", 0), Some(0));
    }

    #[test]
    fn test_safe_slice_utf8() {
        let s = "Hello 世界";
        assert_eq!(safe_slice_to(s, 7), "Hello ");
        assert_eq!(safe_slice_to(s, 9), "Hello 世");
    }

    #[test]
    fn test_is_word_char() {
        assert!(is_word_char('a'));
        assert!(is_word_char('_'));
        assert!(is_word_char('9'));
        assert!(!is_word_char('.'));
        assert!(!is_word_char('é'));
    }
}
