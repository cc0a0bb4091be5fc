//! navkit test utilities.
//!
//! Helpers for integration testing: markup assertions that ignore layout
//! whitespace, and navigation definition fixtures.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static SPACE_AFTER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+").expect("valid regex"));

#[allow(clippy::expect_used)]
static SPACE_BEFORE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+<").expect("valid regex"));

#[allow(clippy::expect_used)]
static RUNS_OF_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize markup for comparison.
///
/// Whitespace touching a tag boundary is dropped and other runs of whitespace
/// collapse to a single space, so indented expectations compare equal to
/// compact renderer output.
pub fn normalize_markup(markup: &str) -> String {
    let trimmed = markup.trim();
    let collapsed = SPACE_AFTER_TAG.replace_all(trimmed, ">");
    let collapsed = SPACE_BEFORE_TAG.replace_all(&collapsed, "<");
    RUNS_OF_SPACE.replace_all(&collapsed, " ").into_owned()
}

/// Assertion helpers for rendered markup.
pub mod assert {
    use super::normalize_markup;

    /// Assert that two markup strings are equal ignoring layout whitespace.
    pub fn dom_eq(actual: &str, expected: &str) {
        let actual_norm = normalize_markup(actual);
        let expected_norm = normalize_markup(expected);
        assert_eq!(
            actual_norm, expected_norm,
            "Markup mismatch:\nactual: {}\nexpected: {}",
            actual, expected
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert the number of non-overlapping occurrences of a substring.
    pub fn occurrences(haystack: &str, needle: &str, expected: usize) {
        let actual = haystack.matches(needle).count();
        assert_eq!(
            actual, expected,
            "Expected '{}' {} time(s), found {}\nActual: {}",
            needle, expected, actual, haystack
        );
    }
}

/// Navigation definition fixtures.
pub mod fixtures {
    /// A site with a main menu, a popup menu without tags and a footer.
    pub fn site_definitions() -> &'static str {
        r##"
[[navigation]]
name = "main"

[navigation.html]
class = "nav"
data-role = "primary"

[[navigation.link]]
label = "Home"
target = "/"
weight = -10

[[navigation.link]]
label = "Members"
target = "/members"

[[navigation.link]]
label = "Admin"
target = "/admin"
visible = false

[[navigation]]
name = "popup"
wrapper_tag = false
item_tag = false

[[navigation.link]]
markup = "<span>Help</span>"
target = "#help"

[[navigation]]
name = "footer"
wrapper_tag = "ol"
selected_class = "current-page"

[[navigation.link]]
label = "Privacy"
target = "/privacy"

[navigation.link.item_html]
class = "legal"
"##
    }

    /// A page template printing the main and footer navigation.
    pub fn page_template() -> &'static str {
        "<header>{{ navigation.main | safe }}</header>\n<footer>{{ navigation.footer | safe }}</footer>\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_layout_whitespace() {
        let markup = "
            <ul>
              <li>
                <a href=\"#\">Foo</a>
              </li>
            </ul>
        ";
        assert_eq!(normalize_markup(markup), "<ul><li><a href=\"#\">Foo</a></li></ul>");
    }

    #[test]
    fn normalize_collapses_text_whitespace() {
        assert_eq!(normalize_markup("<p>two   words</p>"), "<p>two words</p>");
    }

    #[test]
    fn test_assertions() {
        assert::dom_eq("<ul><li>x</li></ul>", "<ul>\n  <li>x</li>\n</ul>");
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
        assert::occurrences("a b a", "a", 2);
    }

    #[test]
    fn fixtures_are_not_empty() {
        assert::contains(fixtures::site_definitions(), "[[navigation]]");
        assert::contains(fixtures::page_template(), "navigation.main");
    }
}
