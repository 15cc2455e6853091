use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slug fields (category slug, brand slug, etc.)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "laminate-flooring", "oak12", "wear-class-33"
    /// - Invalid: "-oak", "oak-", "oak--board", "Oak", "oak_board"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("laminate-flooring"));
        assert!(SLUG_REGEX.is_match("oak12"));
        assert!(SLUG_REGEX.is_match("wear-class-33"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("abc123"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-oak")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("oak-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("oak--board")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Oak")); // uppercase
        assert!(!SLUG_REGEX.is_match("oak_board")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("oak board")); // space
    }
}
