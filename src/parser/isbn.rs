//! ISBN normalization helpers.

/// Minimum number of characters before a title search is worth running.
pub const MIN_QUERY_CHARS: usize = 3;

/// Strips every character that is not an ASCII digit.
///
/// ```
/// use bookshelf_core::parser::normalize_isbn;
///
/// assert_eq!(normalize_isbn("978-0-306-40615-7"), "9780306406157");
/// assert_eq!(normalize_isbn("ISBN 0 306 40615 2"), "0306406152");
/// ```
#[must_use]
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Returns true when `digits` has an ISBN-10 or ISBN-13 length.
#[must_use]
pub fn is_isbn_length(digits: &str) -> bool {
    matches!(digits.len(), 10 | 13)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_isbn_strips_separators() {
        assert_eq!(normalize_isbn("978 0134 190440"), "9780134190440");
        assert_eq!(normalize_isbn("0-306-40615-2"), "0306406152");
    }

    #[test]
    fn test_normalize_isbn_drops_check_digit_x() {
        // ISBN-10 check digit X is not a decimal digit and is stripped
        assert_eq!(normalize_isbn("080442957X"), "080442957");
    }

    #[test]
    fn test_normalize_isbn_empty_when_no_digits() {
        assert_eq!(normalize_isbn("no digits here"), "");
    }

    #[test]
    fn test_is_isbn_length() {
        assert!(is_isbn_length("0306406152"));
        assert!(is_isbn_length("9780306406157"));
        assert!(!is_isbn_length(""));
        assert!(!is_isbn_length("123456789"));
        assert!(!is_isbn_length("12345678901"));
        assert!(!is_isbn_length("12345678901234"));
    }
}
