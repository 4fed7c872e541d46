//! Lexical grammar shared by every component.
//!
//! All regular expressions in the crate are assembled from the fragments
//! below. Nothing else spells out what an identifier, a quoted string or a
//! number looks like.
//!
//! ```text
//! identifier  [a-z][A-Za-z0-9_]*
//! string      "(?:[^"\\]|\\.)*"
//! number      0|[1-9][0-9]*
//! value       (identifier|string|number)            -- one capture group
//! atom        (-?identifier)(?:\((value (, value)*)\))?
//! ```
//!
//! Capture groups matter: [`value_pattern`] contributes exactly one group,
//! which is how the template matcher maps capture groups back to placeholders.

use regex::Regex;

/// Predicate names, constants and placeholder ids.
pub const IDENTIFIER: &str = "[a-z][A-Za-z0-9_]*";

/// Double-quoted string; a backslash escapes the following character.
pub const QUOTED_STRING: &str = r#""(?:[^"\\]|\\.)*""#;

/// Non-negative integer without leading zeros.
pub const NUMBER: &str = "0|[1-9][0-9]*";

/// A single atom argument. Contains exactly one capture group.
pub fn value_pattern() -> String {
    format!("({IDENTIFIER}|{QUOTED_STRING}|{NUMBER})")
}

/// A complete atom.
///
/// Group 1 is the (possibly negated) predicate name, group 2 the raw argument
/// list without parentheses (absent for zero-arity atoms). Further groups
/// belong to the embedded values and should not be relied upon.
pub fn atom_pattern() -> String {
    let argument = format!(r"\s*{}\s*", value_pattern());
    format!(r"(-?{IDENTIFIER})(?:\(({argument}(?:,{argument})*)\))?")
}

/// `::identifier` marker inside a template string.
pub fn placeholder_marker_pattern() -> String {
    format!("::({IDENTIFIER})")
}

pub(crate) fn atom_regex() -> &'static Regex {
    regex!(format!("^(?:{})$", atom_pattern()))
}

pub(crate) fn value_regex() -> &'static Regex {
    regex!(value_pattern())
}

pub(crate) fn placeholder_marker_regex() -> &'static Regex {
    regex!(placeholder_marker_pattern())
}

/// Returns true when `s` is a non-negative integer literal in canonical form.
pub fn is_number(s: &str) -> bool {
    regex!(format!("^(?:{NUMBER})$")).is_match(s)
}

/// Returns true when `s` is a valid identifier.
pub fn is_identifier(s: &str) -> bool {
    regex!(format!("^{IDENTIFIER}$")).is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_reject_leading_zeros() {
        assert!(is_number("0"));
        assert!(is_number("120"));
        assert!(!is_number("007"));
        assert!(!is_number(""));
        assert!(!is_number("-1"));
    }

    #[test]
    fn identifiers_start_lowercase() {
        assert!(is_identifier("edge"));
        assert!(is_identifier("max_Duration2"));
        assert!(!is_identifier("Edge"));
        assert!(!is_identifier("_x"));
        assert!(!is_identifier("2x"));
    }

    #[test]
    fn value_pattern_has_single_group() {
        let re = Regex::new(&value_pattern()).unwrap();
        assert_eq!(re.captures_len(), 2);
    }

    #[test]
    fn atom_regex_accepts_spacing_inside_arguments() {
        assert!(atom_regex().is_match("edge( a , \"b c\",3)"));
        assert!(atom_regex().is_match("-edge(a,b)"));
        assert!(atom_regex().is_match("done"));
        assert!(!atom_regex().is_match("edge ()"));
        assert!(!atom_regex().is_match("edge()"));
        assert!(!atom_regex().is_match("edge(a,)"));
        assert!(!atom_regex().is_match("Edge(a)"));
    }

    #[test]
    fn quoted_strings_allow_escaped_quotes() {
        assert!(atom_regex().is_match(r#"say("he said \"hi\"")"#));
        assert!(!atom_regex().is_match(r#"say("open)"#));
    }
}
