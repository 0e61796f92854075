//! Naming helpers shared by the exporters.

use itertools::Itertools;

/// Lowercases a display name and joins its words with dashes.
///
/// `"Order Pizza"` becomes `"order-pizza"`; runs of whitespace collapse into a
/// single dash and leading/trailing whitespace is dropped.
pub fn to_dash_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .join("-")
}

/// Strips the `%name%` delimiters the design tool wraps variable references in
/// and replaces whitespace with underscores, yielding a context variable name.
pub fn parse_var(name: &str) -> String {
    name.trim()
        .trim_matches('%')
        .split_whitespace()
        .join("_")
}
