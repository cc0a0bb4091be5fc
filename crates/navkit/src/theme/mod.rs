//! Page template integration.
//!
//! Renders declared navigation blocks and exposes them to Tera page templates
//! as `navigation.<block>`.

mod engine;

pub use engine::NavTheme;
