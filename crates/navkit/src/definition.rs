//! Declarative navigation definitions.
//!
//! Navigation blocks can be described in TOML instead of code:
//!
//! ```toml
//! [[navigation]]
//! name = "main"
//! selected_class = "current-page"
//!
//! [[navigation.link]]
//! label = "Members"
//! target = "/members"
//! weight = 10
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{NavError, NavResult};
use crate::markup::Attributes;
use crate::options::{DEFAULT_ITEM_TAG, DEFAULT_WRAPPER_TAG, LinkHtml, NavOptions};
use crate::selection::{DEFAULT_BLOCK, NavigationContext};

/// A tag given either as a name or as a boolean switch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagSetting {
    Enabled(bool),
    Name(String),
}

impl TagSetting {
    fn apply(&self, base: Option<String>, default: &str) -> Option<String> {
        match self {
            Self::Enabled(false) => None,
            Self::Enabled(true) => base.or_else(|| Some(default.to_string())),
            Self::Name(name) => Some(name.clone()),
        }
    }
}

/// A link entry in a navigation block definition.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkDefinition {
    /// Visible text, also matched against the block's selection.
    #[serde(default)]
    pub label: Option<String>,
    /// Pre-rendered link content used instead of a label.
    #[serde(default)]
    pub markup: Option<String>,
    /// Explicit selection key for `markup` links.
    #[serde(default)]
    pub key: Option<String>,
    /// Opaque link target.
    pub target: String,
    /// Link and item container attributes.
    #[serde(flatten)]
    pub html: LinkHtml,
    /// Sort weight (lower = earlier).
    #[serde(default)]
    pub weight: i32,
    /// Whether the link is emitted.
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

fn default_block() -> String {
    DEFAULT_BLOCK.to_string()
}

/// A navigation block definition.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationDefinition {
    /// Block name (default: `main`).
    #[serde(default = "default_block")]
    pub name: String,
    #[serde(default)]
    pub wrapper_tag: Option<TagSetting>,
    #[serde(default)]
    pub item_tag: Option<TagSetting>,
    #[serde(default)]
    pub selected_class: Option<String>,
    /// Extra wrapper attributes, merged over the defaults.
    #[serde(default)]
    pub html: Attributes,
    /// Links of the block; a block without a `link` array has no body.
    #[serde(default, rename = "link")]
    pub links: Option<Vec<LinkDefinition>>,
}

impl NavigationDefinition {
    /// Options for this block layered over `defaults`.
    pub fn options(&self, defaults: &NavOptions) -> NavOptions {
        let mut options = defaults.clone();

        if let Some(setting) = &self.wrapper_tag {
            options.wrapper_tag = setting.apply(options.wrapper_tag.take(), DEFAULT_WRAPPER_TAG);
        }
        if let Some(setting) = &self.item_tag {
            options.item_tag = setting.apply(options.item_tag.take(), DEFAULT_ITEM_TAG);
        }
        if let Some(class) = &self.selected_class {
            options.selected_class = class.clone();
        }
        for (name, value) in self.html.iter() {
            options.html.set(name, value);
        }

        options
    }

    /// Visible links in emission order.
    pub fn sorted_links(&self) -> Vec<&LinkDefinition> {
        let mut links: Vec<_> = self
            .links
            .iter()
            .flatten()
            .filter(|link| link.visible)
            .collect();
        links.sort_by_key(|link| link.weight);
        links
    }

    /// Render this block into `out`.
    pub fn render(
        &self,
        ctx: &mut NavigationContext,
        out: &mut String,
        defaults: &NavOptions,
    ) -> NavResult<()> {
        if self.links.is_none() {
            return Err(NavError::MissingBody {
                block: self.name.clone(),
            });
        }

        let options = self.options(defaults);
        let links = self.sorted_links();

        ctx.render_navigation(out, &self.name, &options, |nav| {
            for link in links {
                let html = link.html.clone();
                match (&link.label, &link.markup) {
                    (_, Some(markup)) => {
                        let capture = |body: &mut String| {
                            body.push_str(markup);
                            Ok(())
                        };
                        match &link.key {
                            Some(key) => {
                                nav.link_block_keyed(key, &link.target, html, capture)?;
                            }
                            None => nav.link_block(&link.target, html, capture)?,
                        }
                    }
                    (Some(label), None) => nav.link_to(label, &link.target, html),
                    (None, None) => {
                        warn!(
                            block = %self.name,
                            target = %link.target,
                            "navigation link has no label"
                        );
                        nav.link_to("", &link.target, html);
                    }
                }
            }
            Ok(())
        })
    }
}

/// A set of navigation block definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationSet {
    #[serde(default, rename = "navigation")]
    blocks: Vec<NavigationDefinition>,
}

impl NavigationSet {
    /// Parse definitions from TOML.
    ///
    /// Block names must be unique within the set.
    pub fn from_toml(source: &str) -> NavResult<Self> {
        let set: Self = toml::from_str(source)?;
        let mut names = HashSet::new();
        for block in &set.blocks {
            if !names.insert(block.name.as_str()) {
                return Err(NavError::DuplicateBlock {
                    block: block.name.clone(),
                });
            }
        }
        debug!(blocks = set.blocks.len(), "loaded navigation definitions");
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&NavigationDefinition> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &NavigationDefinition> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render a single block by name and return its markup.
    pub fn render_block(
        &self,
        ctx: &mut NavigationContext,
        name: &str,
        defaults: &NavOptions,
    ) -> NavResult<Option<String>> {
        let Some(block) = self.get(name) else {
            return Ok(None);
        };
        let mut out = String::new();
        block.render(ctx, &mut out, defaults)?;
        Ok(Some(out))
    }

    /// Render every block, keyed by block name.
    pub fn render_all(
        &self,
        ctx: &mut NavigationContext,
        defaults: &NavOptions,
    ) -> NavResult<BTreeMap<String, String>> {
        let mut rendered = BTreeMap::new();
        for block in &self.blocks {
            let mut out = String::new();
            block.render(ctx, &mut out, defaults)?;
            rendered.insert(block.name.clone(), out);
        }
        Ok(rendered)
    }
}
