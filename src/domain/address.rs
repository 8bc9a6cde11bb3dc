//! Shortened display form for long identifiers such as account addresses.

/// Default number of leading characters kept by [`format_address`].
pub const DEFAULT_PREFIX: usize = 6;
/// Default number of trailing characters kept by [`format_address`].
pub const DEFAULT_SUFFIX: usize = 6;

/// Shorten an identifier to `first 6 + "..." + last 6` characters.
///
/// Absent or empty input yields an empty string.
pub fn format_address(input: Option<&str>) -> String {
    format_address_with(input, DEFAULT_PREFIX, DEFAULT_SUFFIX)
}

/// Shorten an identifier keeping `prefix` leading and `suffix` trailing characters.
///
/// Inputs shorter than `prefix + suffix` are not rejected: the two halves
/// overlap and the result is longer than the input.
pub fn format_address_with(input: Option<&str>, prefix: usize, suffix: usize) -> String {
    let Some(s) = input.filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let chars: Vec<char> = s.chars().collect();
    let head: String = chars.iter().take(prefix).collect();
    let tail: String = chars[chars.len().saturating_sub(suffix)..].iter().collect();

    format!("{head}...{tail}")
}
