//! Tag generation helpers.
//!
//! Small, allocation-friendly builders for the opening/closing tags that wrap
//! navigation blocks and their items. Attribute values are always escaped;
//! element content is passed through as already-safe markup.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Deserialize;
use tracing::warn;

/// Escape HTML special characters in a string.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// HTML attributes for a single element, rendered in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace an attribute.
    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add a CSS class token to the `class` attribute.
    ///
    /// Tokens already present are not repeated.
    pub fn append_class(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }

        let class = self.0.entry("class".to_string()).or_default();
        if class.split_whitespace().any(|existing| existing == token) {
            return;
        }

        let trimmed = class.trim();
        *class = if trimmed.is_empty() {
            token.to_string()
        } else {
            format!("{trimmed} {token}")
        };
    }

    /// Render as ` name="value"` pairs with escaped values.
    pub fn render(&self) -> String {
        self.render_except(&[])
    }

    /// Render all attributes except the named ones.
    ///
    /// Attributes with a name that is unsafe to emit are dropped.
    pub fn render_except(&self, skip: &[&str]) -> String {
        let mut out = String::new();
        for (name, value) in self.iter().filter(|(name, _)| !skip.contains(name)) {
            if !is_valid_attribute_name(name) {
                warn!(attribute = %name, "dropping attribute with invalid name");
                continue;
            }
            // SAFETY: write!() to String is infallible
            #[allow(clippy::unwrap_used)]
            write!(out, " {}=\"{}\"", name, html_escape(value)).unwrap();
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Render an opening tag.
pub fn tag(name: &str, attrs: &Attributes) -> String {
    format!("<{}{}>", name, attrs.render())
}

/// Render a closing tag.
pub fn close_tag(name: &str) -> String {
    format!("</{name}>")
}

/// Render an element wrapping already-safe content.
pub fn content_tag(name: &str, content: &str, attrs: &Attributes) -> String {
    format!("{}{}{}", tag(name, attrs), content, close_tag(name))
}

/// Whether a tag name is safe to emit verbatim.
pub fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Whether an attribute name is safe to emit verbatim.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
