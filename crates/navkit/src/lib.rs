//! Navigation blocks for server-rendered templates.
//!
//! A template marks one link of a named navigation block as selected, then
//! renders the block; the selected link's container carries a CSS class.
//!
//! ```
//! use navkit::{LinkHtml, NavOptions, NavigationContext};
//!
//! let mut ctx = NavigationContext::new();
//! ctx.select("Members")?;
//!
//! let html = ctx.navigation_for("main", &NavOptions::default(), |nav| {
//!     nav.link_to("Home", "/", LinkHtml::new());
//!     nav.link_to("Members", "/members", LinkHtml::new());
//!     Ok(())
//! })?;
//!
//! assert_eq!(
//!     html,
//!     r#"<ul><li><a href="/">Home</a></li><li class="selected"><a href="/members">Members</a></li></ul>"#
//! );
//! # Ok::<(), navkit::NavError>(())
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod definition;
pub mod error;
pub mod link;
pub mod markup;
pub mod navigator;
pub mod options;
pub mod selection;
pub mod theme;

pub use builder::NavBuilder;
pub use config::Config;
pub use definition::{LinkDefinition, NavigationDefinition, NavigationSet, TagSetting};
pub use error::{NavError, NavResult};
pub use link::{AnchorLinkGenerator, LinkGenerator};
pub use markup::Attributes;
pub use navigator::Navigator;
pub use options::{LinkHtml, NavOptions};
pub use selection::{BlockState, DEFAULT_BLOCK, Matcher, NavigationContext};
pub use theme::NavTheme;
