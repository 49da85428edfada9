//! Person anchor input.
//!
//! Person pickers render choices as `"Name [id]"`. When free text ends in a
//! bracketed id that id is taken verbatim; anything else is a name or id to
//! look up.

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\[([^\[\]]+)\]$").expect("Invalid regex pattern")
});

/// How a piece of person input should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonAnchor<'a> {
    /// A trailing `[id]` named the person directly.
    Id(&'a str),
    /// Exact name-or-id lookup is needed.
    Lookup(&'a str),
    /// Nothing was entered.
    Blank,
}

/// Extract the id from a trailing `[...]` with no nested brackets.
pub fn parse_bracketed_id(input: &str) -> Option<&str> {
    BRACKETED_ID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify trimmed person input.
pub fn classify_person_input(input: &str) -> PersonAnchor<'_> {
    let input = input.trim();
    if input.is_empty() {
        return PersonAnchor::Blank;
    }
    match parse_bracketed_id(input) {
        Some(id) => PersonAnchor::Id(id),
        None => PersonAnchor::Lookup(input),
    }
}

/// Render a person choice in the form `parse_bracketed_id` reads back.
pub fn person_choice(name: &str, id: &str) -> String {
    if name.trim().is_empty() {
        format!("[{}]", id)
    } else {
        format!("{} [{}]", name, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_bracket() {
        assert_eq!(parse_bracketed_id("Jane Doe [p123]"), Some("p123"));
        assert_eq!(parse_bracketed_id("[p7]"), Some("p7"));
    }

    #[test]
    fn test_bracket_must_be_at_end() {
        assert_eq!(parse_bracketed_id("Jane [p123] Doe"), None);
        assert_eq!(parse_bracketed_id("Jane Doe"), None);
        assert_eq!(parse_bracketed_id("Jane Doe []"), None);
    }

    #[test]
    fn test_last_bracket_wins() {
        assert_eq!(parse_bracketed_id("Acme [ops] Lead [p9]"), Some("p9"));
    }

    #[test]
    fn test_nested_brackets_are_not_ids() {
        assert_eq!(parse_bracketed_id("Jane [a[b]]"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify_person_input("  Alice [p42] "), PersonAnchor::Id("p42"));
        assert_eq!(classify_person_input(" Bob "), PersonAnchor::Lookup("Bob"));
        assert_eq!(classify_person_input("   "), PersonAnchor::Blank);
    }

    #[test]
    fn test_choice_round_trips() {
        let choice = person_choice("Jane Doe", "p123");
        assert_eq!(choice, "Jane Doe [p123]");
        assert_eq!(parse_bracketed_id(&choice), Some("p123"));
        assert_eq!(parse_bracketed_id(&person_choice("", "p5")), Some("p5"));
    }
}
