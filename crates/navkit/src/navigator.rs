//! Render pass setup.
//!
//! A [`Navigator`] is built once at startup with the link generator, default
//! options and ordering policy; each render pass then gets its own
//! [`NavigationContext`] from [`Navigator::begin_render`].

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::link::{AnchorLinkGenerator, LinkGenerator};
use crate::options::NavOptions;
use crate::selection::NavigationContext;

/// Factory for per-render navigation contexts.
#[derive(Clone)]
pub struct Navigator {
    link_generator: Arc<dyn LinkGenerator>,
    defaults: NavOptions,
    strict_ordering: bool,
}

impl Navigator {
    pub fn new(link_generator: Arc<dyn LinkGenerator>) -> Self {
        Self {
            link_generator,
            defaults: NavOptions::default(),
            strict_ordering: true,
        }
    }

    /// Build a navigator from configuration, rendering plain anchors.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(AnchorLinkGenerator))
            .defaults(config.nav_options())
            .strict_ordering(config.strict_ordering)
    }

    pub fn defaults(mut self, defaults: NavOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn strict_ordering(mut self, strict: bool) -> Self {
        self.strict_ordering = strict;
        self
    }

    /// Default options for blocks that do not override them.
    pub fn options(&self) -> NavOptions {
        self.defaults.clone()
    }

    /// Start a render pass.
    pub fn begin_render(&self) -> NavigationContext {
        NavigationContext::with_link_generator(Arc::clone(&self.link_generator))
            .strict_ordering(self.strict_ordering)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Arc::new(AnchorLinkGenerator))
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("defaults", &self.defaults)
            .field("strict_ordering", &self.strict_ordering)
            .finish()
    }
}
