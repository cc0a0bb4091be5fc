//! Per-render selection registry.
//!
//! A [`NavigationContext`] records which link is selected in each named
//! navigation block. It lives for exactly one render pass and is never shared
//! between renders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::error::{NavError, NavResult};
use crate::link::{AnchorLinkGenerator, LinkGenerator};

/// Block used when no block name is given.
pub const DEFAULT_BLOCK: &str = "main";

/// Criterion deciding which link of a block is selected.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Label must equal the string exactly.
    Exact(String),
    /// Label must contain a match of the pattern.
    Pattern(Regex),
}

impl Matcher {
    /// Compile a pattern matcher.
    pub fn pattern(pattern: &str) -> NavResult<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| NavError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Parse a textual matcher: `/.../` is a pattern, anything else exact.
    ///
    /// An empty pattern (`//`) would select every link, so it is exact.
    pub fn parse(s: &str) -> NavResult<Self> {
        match s.strip_prefix('/').and_then(|rest| rest.strip_suffix('/')) {
            Some(pattern) if !pattern.is_empty() => Self::pattern(pattern),
            _ => Ok(Self::Exact(s.to_string())),
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == label,
            Self::Pattern(re) => re.is_match(label),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => f.write_str(s),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        Self::Exact(s.to_string())
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        Self::Exact(s)
    }
}

impl From<Regex> for Matcher {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

/// Selection state of one navigation block.
///
/// The matcher is kept after rendering so a block rendered twice produces the
/// same markup both times.
#[derive(Debug, Clone, Default)]
pub struct BlockState {
    pub matcher: Option<Matcher>,
    pub rendered: bool,
}

/// Selection registry for a single render pass.
pub struct NavigationContext {
    blocks: HashMap<String, BlockState>,
    strict_ordering: bool,
    pub(crate) link_generator: Arc<dyn LinkGenerator>,
}

impl NavigationContext {
    /// Create a strict context rendering plain anchors.
    pub fn new() -> Self {
        Self::with_link_generator(Arc::new(AnchorLinkGenerator))
    }

    pub fn with_link_generator(link_generator: Arc<dyn LinkGenerator>) -> Self {
        Self {
            blocks: HashMap::new(),
            strict_ordering: true,
            link_generator,
        }
    }

    /// Choose whether selecting a link in an already rendered block fails.
    pub fn strict_ordering(mut self, strict: bool) -> Self {
        self.strict_ordering = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict_ordering
    }

    /// Select a link in the `main` block.
    pub fn select(&mut self, matcher: impl Into<Matcher>) -> NavResult<()> {
        self.select_in(DEFAULT_BLOCK, matcher)
    }

    /// Select a link in the named block, replacing any earlier selection.
    ///
    /// In strict mode this fails once the block has rendered.
    pub fn select_in(&mut self, block: &str, matcher: impl Into<Matcher>) -> NavResult<()> {
        let matcher = matcher.into();
        let state = self.blocks.entry(block.to_string()).or_default();

        if state.rendered {
            if self.strict_ordering {
                return Err(NavError::LateSelection {
                    block: block.to_string(),
                });
            }
            debug!(block = %block, matcher = %matcher, "selection after render has no effect");
        }

        debug!(block = %block, matcher = %matcher, "navigation link selected");
        state.matcher = Some(matcher);
        Ok(())
    }

    /// Whether `label` is the selected link of `block`.
    pub fn is_selected(&self, block: &str, label: Option<&str>) -> bool {
        let Some(label) = label else {
            return false;
        };
        self.matcher(block).is_some_and(|m| m.matches(label))
    }

    pub fn matcher(&self, block: &str) -> Option<&Matcher> {
        self.blocks.get(block).and_then(|s| s.matcher.as_ref())
    }

    /// Record that `block` has been emitted in this pass.
    pub fn mark_rendered(&mut self, block: &str) {
        self.blocks.entry(block.to_string()).or_default().rendered = true;
    }

    pub fn is_rendered(&self, block: &str) -> bool {
        self.blocks.get(block).is_some_and(|s| s.rendered)
    }

    pub fn state(&self, block: &str) -> Option<&BlockState> {
        self.blocks.get(block)
    }
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("blocks", &self.blocks)
            .field("strict_ordering", &self.strict_ordering)
            .finish()
    }
}
