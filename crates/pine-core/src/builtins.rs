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

//! Built-in Pine Script identifiers.
//!
//! Tables are plain `&'static` data; [`builtin_entries`] turns them into
//! owned [`CatalogEntry`] values in catalog order (functions, variables,
//! keywords, types).

use crate::entry::{CatalogEntry, Category};

/// (name, signature, documentation, insert template)
type FunctionRow = (&'static str, &'static str, &'static str, &'static str);

/// (name, signature, documentation)
type PlainRow = (&'static str, &'static str, &'static str);

const FUNCTIONS: &[FunctionRow] = &[
    // Technical analysis
    (
        "ta.sma",
        "ta.sma(source, length) -> series float",
        "Simple Moving Average. Calculates the average of the last length values of source.",
        "ta.sma(${1:source}, ${2:length})",
    ),
    (
        "ta.ema",
        "ta.ema(source, length) -> series float",
        "Exponential Moving Average. Calculates the exponential moving average of source over length bars.",
        "ta.ema(${1:source}, ${2:length})",
    ),
    (
        "ta.rsi",
        "ta.rsi(source, length) -> series float",
        "Relative Strength Index. Returns the RSI value, a momentum oscillator that measures the speed and magnitude of price changes.",
        "ta.rsi(${1:source}, ${2:length})",
    ),
    (
        "ta.macd",
        "ta.macd(source, fastlen, slowlen, siglen) -> [macdLine, signalLine, histLine]",
        "MACD (Moving Average Convergence Divergence). Returns a tuple with MACD line, signal line, and histogram.",
        "[${1:macdLine}, ${2:signalLine}, ${3:histLine}] = ta.macd(${4:source}, ${5:12}, ${6:26}, ${7:9})",
    ),
    (
        "ta.bb",
        "ta.bb(source, length, mult) -> [upper, middle, lower]",
        "Bollinger Bands. Returns upper, middle, and lower bands.",
        "[${1:upper}, ${2:middle}, ${3:lower}] = ta.bb(${4:source}, ${5:length}, ${6:mult})",
    ),
    (
        "ta.atr",
        "ta.atr(length) -> series float",
        "Average True Range. Measures market volatility.",
        "ta.atr(${1:length})",
    ),
    (
        "ta.stoch",
        "ta.stoch(source, high, low, length) -> series float",
        "Stochastic Oscillator. Returns the stochastic value.",
        "ta.stoch(${1:source}, ${2:high}, ${3:low}, ${4:length})",
    ),
    (
        "ta.adx",
        "ta.adx(length) -> series float",
        "Average Directional Index. Measures trend strength.",
        "ta.adx(${1:length})",
    ),
    (
        "ta.pivothigh",
        "ta.pivothigh(high, leftBars, rightBars) -> series float",
        "Pivot High. Returns the value of the highest high over leftBars and rightBars bars.",
        "ta.pivothigh(${1:high}, ${2:leftBars}, ${3:rightBars})",
    ),
    (
        "ta.pivotlow",
        "ta.pivotlow(low, leftBars, rightBars) -> series float",
        "Pivot Low. Returns the value of the lowest low over leftBars and rightBars bars.",
        "ta.pivotlow(${1:low}, ${2:leftBars}, ${3:rightBars})",
    ),
    (
        "ta.cross",
        "ta.cross(series1, series2) -> series bool",
        "Cross. Returns true when series1 crosses series2.",
        "ta.cross(${1:series1}, ${2:series2})",
    ),
    (
        "ta.crossover",
        "ta.crossover(series1, series2) -> series bool",
        "Crossover. Returns true when series1 crosses above series2.",
        "ta.crossover(${1:series1}, ${2:series2})",
    ),
    (
        "ta.crossunder",
        "ta.crossunder(series1, series2) -> series bool",
        "Crossunder. Returns true when series1 crosses below series2.",
        "ta.crossunder(${1:series1}, ${2:series2})",
    ),
    (
        "ta.highest",
        "ta.highest(source, length) -> series float",
        "Highest value of source over the last length bars.",
        "ta.highest(${1:source}, ${2:length})",
    ),
    (
        "ta.lowest",
        "ta.lowest(source, length) -> series float",
        "Lowest value of source over the last length bars.",
        "ta.lowest(${1:source}, ${2:length})",
    ),
    (
        "ta.change",
        "ta.change(source, length) -> series float",
        "Difference between the current value of source and its value length bars ago.",
        "ta.change(${1:source}, ${2:1})",
    ),
    // Math
    (
        "math.abs",
        "math.abs(value) -> series float",
        "Absolute value.",
        "math.abs(${1:value})",
    ),
    (
        "math.max",
        "math.max(value1, value2) -> series float",
        "Maximum of two values.",
        "math.max(${1:value1}, ${2:value2})",
    ),
    (
        "math.min",
        "math.min(value1, value2) -> series float",
        "Minimum of two values.",
        "math.min(${1:value1}, ${2:value2})",
    ),
    (
        "math.round",
        "math.round(value) -> series float",
        "Round to nearest integer.",
        "math.round(${1:value})",
    ),
    (
        "math.floor",
        "math.floor(value) -> series float",
        "Round down to nearest integer.",
        "math.floor(${1:value})",
    ),
    (
        "math.ceil",
        "math.ceil(value) -> series float",
        "Round up to nearest integer.",
        "math.ceil(${1:value})",
    ),
    (
        "math.sqrt",
        "math.sqrt(value) -> series float",
        "Square root.",
        "math.sqrt(${1:value})",
    ),
    (
        "math.pow",
        "math.pow(base, exponent) -> series float",
        "Power function.",
        "math.pow(${1:base}, ${2:exponent})",
    ),
    (
        "math.log",
        "math.log(value) -> series float",
        "Natural logarithm.",
        "math.log(${1:value})",
    ),
    // Strings
    (
        "str.tostring",
        "str.tostring(value, format) -> series string",
        "Convert value to string with optional format.",
        "str.tostring(${1:value}, \"${2:#.##}\")",
    ),
    (
        "str.tonumber",
        "str.tonumber(string) -> series float",
        "Convert string to number.",
        "str.tonumber(${1:string})",
    ),
    (
        "str.format",
        "str.format(format, ...args) -> series string",
        "Format string with arguments.",
        "str.format(\"${1:format}\", ${2:arg1}, ${3:arg2})",
    ),
    (
        "str.length",
        "str.length(string) -> series int",
        "Number of characters in the string.",
        "str.length(${1:string})",
    ),
    // Arrays
    (
        "array.new",
        "array.new<type>(size) -> array",
        "Create a new array.",
        "array.new<${1:type}>(${2:})",
    ),
    (
        "array.push",
        "array.push(array, value) -> void",
        "Push value to array.",
        "array.push(${1:array}, ${2:value})",
    ),
    (
        "array.pop",
        "array.pop(array) -> type",
        "Remove and return the last element of array.",
        "array.pop(${1:array})",
    ),
    (
        "array.get",
        "array.get(array, index) -> type",
        "Get value from array at index.",
        "array.get(${1:array}, ${2:index})",
    ),
    (
        "array.size",
        "array.size(array) -> int",
        "Get array size.",
        "array.size(${1:array})",
    ),
    // Data requests
    (
        "request.security",
        "request.security(symbol, timeframe, expression) -> series",
        "Request security data from different symbol/timeframe.",
        "request.security(${1:syminfo.tickerid}, \"${2:timeframe}\", ${3:expression})",
    ),
    // Script declarations
    (
        "indicator",
        "indicator(title, shorttitle, overlay) -> void",
        "Declare the script as an indicator.",
        "indicator(\"${1:Title}\", overlay=${2:true})",
    ),
    (
        "strategy",
        "strategy(title, shorttitle, overlay, initial_capital) -> void",
        "Declare the script as a strategy.",
        "strategy(\"${1:Title}\", overlay=${2:true})",
    ),
    // Plotting and drawings
    (
        "plot",
        "plot(series, title, color, linewidth) -> plot",
        "Plot a series on the chart.",
        "plot(${1:series}, title=\"${2:Title}\", color=${3:color.blue}, linewidth=${4:1})",
    ),
    (
        "plotshape",
        "plotshape(condition, title, location, color, style, size) -> plot",
        "Plot shapes on the chart.",
        "plotshape(${1:condition}, title=\"${2:Title}\", location=location.${3:belowbar}, color=${4:color.red}, style=shape.${5:triangleup}, size=${6:size.small})",
    ),
    (
        "label.new",
        "label.new(x, y, text, color, textcolor, style) -> label",
        "Create a new label.",
        "label.new(${1:x}, ${2:y}, \"${3:text}\", color=${4:color.blue}, textcolor=${5:color.white}, style=label.style_${6:label_up})",
    ),
    (
        "line.new",
        "line.new(x1, y1, x2, y2, color, width, extend) -> line",
        "Create a new line.",
        "line.new(${1:x1}, ${2:y1}, ${3:x2}, ${4:y2}, color=${5:color.blue}, width=${6:1}, extend=extend.${7:none})",
    ),
    (
        "box.new",
        "box.new(left, top, right, bottom, border_color, bgcolor) -> box",
        "Create a new box.",
        "box.new(${1:left}, ${2:top}, ${3:right}, ${4:bottom}, border_color=${5:color.blue}, bgcolor=${6:color.new(color.blue, 80)})",
    ),
    // Inputs
    (
        "input.bool",
        "input.bool(defval, title, group, tooltip) -> input bool",
        "Create a boolean input.",
        "input.bool(${1:true}, \"${2:Label}\", group=\"${3:Group}\")",
    ),
    (
        "input.float",
        "input.float(defval, title, minval, maxval, step, group, tooltip) -> input float",
        "Create a float input.",
        "input.float(${1:0.0}, \"${2:Label}\", minval=${3:0.0}, maxval=${4:100.0}, step=${5:0.1}, group=\"${6:Group}\")",
    ),
    (
        "input.int",
        "input.int(defval, title, minval, maxval, step, group, tooltip) -> input int",
        "Create an integer input.",
        "input.int(${1:14}, \"${2:Label}\", minval=${3:1}, maxval=${4:100}, group=\"${5:Group}\")",
    ),
    (
        "input.string",
        "input.string(defval, title, group, tooltip) -> input string",
        "Create a string input.",
        "input.string(\"${1:default}\", \"${2:Label}\", group=\"${3:Group}\")",
    ),
    (
        "input.color",
        "input.color(defval, title, group, tooltip) -> input color",
        "Create a color input.",
        "input.color(color.new(color.${1:blue}, ${2:0}), \"${3:Label}\", group=\"${4:Group}\")",
    ),
    (
        "input.source",
        "input.source(defval, title, group, tooltip) -> series float",
        "Create a price source input.",
        "input.source(${1:close}, \"${2:Source}\")",
    ),
    // Strategy orders
    (
        "strategy.entry",
        "strategy.entry(id, direction, qty, when) -> void",
        "Strategy entry order.",
        "strategy.entry(\"${1:Entry ID}\", strategy.${2:long}, qty=${3:1}, when=${4:condition})",
    ),
    (
        "strategy.exit",
        "strategy.exit(id, from_entry, profit, loss) -> void",
        "Strategy exit order.",
        "strategy.exit(\"${1:Exit ID}\", from_entry=\"${2:Entry ID}\", profit=${3:100}, loss=${4:50})",
    ),
    (
        "strategy.close",
        "strategy.close(id, when) -> void",
        "Close strategy position.",
        "strategy.close(\"${1:Entry ID}\", when=${2:condition})",
    ),
    // Alerts
    (
        "alert",
        "alert(message, freq) -> void",
        "Create an alert.",
        "alert(\"${1:Message}\", alert.freq_${2:once_per_bar})",
    ),
    (
        "alertcondition",
        "alertcondition(condition, title, message) -> void",
        "Create an alert condition.",
        "alertcondition(${1:condition}, title=\"${2:Alert Title}\", message=\"${3:Alert Message}\")",
    ),
    // Misc
    (
        "color.new",
        "color.new(color, transparency) -> color",
        "Create a new color with transparency (0-100).",
        "color.new(${1:color.blue}, ${2:0})",
    ),
    (
        "nz",
        "nz(value, replacement) -> series",
        "Replace NA values with replacement value.",
        "nz(${1:value}, ${2:0})",
    ),
];

const VARIABLES: &[PlainRow] = &[
    ("open", "series float", "Opening price of the current bar."),
    ("high", "series float", "Highest price of the current bar."),
    ("low", "series float", "Lowest price of the current bar."),
    ("close", "series float", "Closing price of the current bar."),
    ("volume", "series int", "Volume of the current bar."),
    ("time", "series int", "Unix timestamp of the current bar."),
    ("timenow", "int", "Current time as Unix timestamp."),
    ("bar_index", "series int", "Index of the current bar (zero-based)."),
    ("syminfo.ticker", "string", "Ticker symbol of the current chart."),
    ("syminfo.tickerid", "string", "Full ticker ID including exchange."),
    ("syminfo.prefix", "string", "Exchange prefix."),
    ("syminfo.root", "string", "Root symbol without exchange."),
    ("syminfo.basecurrency", "string", "Base currency of the symbol."),
    ("syminfo.currency", "string", "Quote currency of the symbol."),
];

const KEYWORDS: &[PlainRow] = &[
    ("if", "keyword", "Conditional statement."),
    ("else", "keyword", "Else clause."),
    ("elseif", "keyword", "Else-if clause."),
    ("for", "keyword", "For loop."),
    ("while", "keyword", "While loop."),
    ("var", "keyword", "Variable declaration that persists across bars."),
    ("varip", "keyword", "Variable declaration that persists across bars and repaints."),
    ("function", "keyword", "Function declaration."),
    ("return", "keyword", "Return from function."),
    ("true", "keyword", "Boolean true."),
    ("false", "keyword", "Boolean false."),
    ("na", "keyword", "Not available value."),
    ("and", "keyword", "Logical AND operator."),
    ("or", "keyword", "Logical OR operator."),
    ("not", "keyword", "Logical NOT operator."),
];

const TYPES: &[PlainRow] = &[
    ("int", "type", "Integer type."),
    ("float", "type", "Floating-point number type."),
    ("bool", "type", "Boolean type."),
    ("color", "type", "Color type."),
    ("string", "type", "String type."),
    ("array", "type", "Array type."),
    ("matrix", "type", "Matrix type."),
    ("map", "type", "Map type."),
    ("line", "type", "Line object type."),
    ("label", "type", "Label object type."),
    ("box", "type", "Box object type."),
    ("table", "type", "Table object type."),
];

/// All built-in entries in catalog order.
pub(crate) fn builtin_entries() -> Vec<CatalogEntry> {
    let capacity = FUNCTIONS.len() + VARIABLES.len() + KEYWORDS.len() + TYPES.len();
    let mut entries = Vec::with_capacity(capacity);

    entries.extend(FUNCTIONS.iter().map(|(name, signature, doc, template)| {
        CatalogEntry::new(*name, Category::Function, *signature, *doc).with_template(*template)
    }));

    for (rows, category) in [
        (VARIABLES, Category::Variable),
        (KEYWORDS, Category::Keyword),
        (TYPES, Category::Type),
    ] {
        entries.extend(
            rows.iter()
                .map(|(name, signature, doc)| CatalogEntry::new(*name, category, *signature, *doc)),
        );
    }

    entries
}
