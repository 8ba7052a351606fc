/// Minimum number of digits before a postal code is worth looking up.
///
/// Shorter values are treated as "still typing".
pub const DEFAULT_MIN_POSTAL_CODE_DIGITS: usize = 3;

/// Strips every non-digit character from raw postal code input.
///
/// Postal codes are stored digits-only, so this runs before the value ever
/// reaches the form state.
///
/// ```
/// assert_eq!(plzsync::sanitize_postal_code("80 331"), "80331");
/// assert_eq!(plzsync::sanitize_postal_code("D-10115"), "10115");
/// assert_eq!(plzsync::sanitize_postal_code("abc"), "");
/// ```
pub fn sanitize_postal_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
