//! Rendering options for navigation blocks and their links.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::link::LinkGenerator;
use crate::markup::{Attributes, is_valid_tag_name};

pub const DEFAULT_WRAPPER_TAG: &str = "ul";
pub const DEFAULT_ITEM_TAG: &str = "li";
pub const DEFAULT_SELECTED_CLASS: &str = "selected";

/// Options for one navigation block invocation.
///
/// Tag fields of `None` disable that element.
#[derive(Clone)]
pub struct NavOptions {
    /// Outer wrapper element (default: `ul`).
    pub wrapper_tag: Option<String>,
    /// Element wrapping each link (default: `li`).
    pub item_tag: Option<String>,
    /// Class added to the selected item (default: `selected`).
    pub selected_class: String,
    /// Extra attributes for the wrapper element.
    pub html: Attributes,
    /// Per-call override of the context's link generator.
    pub link_generator: Option<Arc<dyn LinkGenerator>>,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            wrapper_tag: Some(DEFAULT_WRAPPER_TAG.to_string()),
            item_tag: Some(DEFAULT_ITEM_TAG.to_string()),
            selected_class: DEFAULT_SELECTED_CLASS.to_string(),
            html: Attributes::new(),
            link_generator: None,
        }
    }
}

impl fmt::Debug for NavOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavOptions")
            .field("wrapper_tag", &self.wrapper_tag)
            .field("item_tag", &self.item_tag)
            .field("selected_class", &self.selected_class)
            .field("html", &self.html)
            .field("link_generator", &self.link_generator.is_some())
            .finish()
    }
}

impl NavOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrapper_tag(mut self, tag: &str) -> Self {
        self.wrapper_tag = Some(tag.to_string());
        self
    }

    pub fn without_wrapper(mut self) -> Self {
        self.wrapper_tag = None;
        self
    }

    pub fn item_tag(mut self, tag: &str) -> Self {
        self.item_tag = Some(tag.to_string());
        self
    }

    pub fn without_item_tag(mut self) -> Self {
        self.item_tag = None;
        self
    }

    pub fn selected_class(mut self, class: &str) -> Self {
        self.selected_class = class.to_string();
        self
    }

    /// Replace the wrapper attributes.
    pub fn html(mut self, html: Attributes) -> Self {
        self.html = html;
        self
    }

    /// Set a single wrapper attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.html.set(name, value);
        self
    }

    pub fn link_generator(mut self, generator: Arc<dyn LinkGenerator>) -> Self {
        self.link_generator = Some(generator);
        self
    }

    /// Whether a wrapper element is emitted around the block.
    pub fn has_wrapper(&self) -> bool {
        self.wrapper_tag.is_some()
    }

    /// Copy with tag names and class normalized.
    ///
    /// Blank tags disable the element; malformed ones fall back to the
    /// defaults. A blank selected class falls back to `selected`.
    pub fn normalized(&self) -> Self {
        let selected_class = match self.selected_class.trim() {
            "" => DEFAULT_SELECTED_CLASS.to_string(),
            class => class.to_string(),
        };

        Self {
            wrapper_tag: normalize_tag(self.wrapper_tag.as_deref(), DEFAULT_WRAPPER_TAG),
            item_tag: normalize_tag(self.item_tag.as_deref(), DEFAULT_ITEM_TAG),
            selected_class,
            html: self.html.clone(),
            link_generator: self.link_generator.clone(),
        }
    }
}

fn normalize_tag(tag: Option<&str>, default: &str) -> Option<String> {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty())?;
    if is_valid_tag_name(tag) {
        Some(tag.to_ascii_lowercase())
    } else {
        warn!(tag = %tag, fallback = %default, "invalid navigation tag name");
        Some(default.to_string())
    }
}

/// Attributes for one link: the link element itself and its item container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkHtml {
    /// Attributes of the link element.
    #[serde(rename = "html")]
    pub attrs: Attributes,
    /// Attributes of the item container (`item_html`).
    #[serde(rename = "item_html")]
    pub item: Attributes,
}

impl LinkHtml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn item_attr(mut self, name: &str, value: &str) -> Self {
        self.item.set(name, value);
        self
    }

    pub fn item_class(self, class: &str) -> Self {
        self.item_attr("class", class)
    }
}

impl From<Attributes> for LinkHtml {
    fn from(attrs: Attributes) -> Self {
        Self {
            attrs,
            item: Attributes::new(),
        }
    }
}
