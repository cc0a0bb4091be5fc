//! Link generation.
//!
//! Navigation never builds URLs itself; targets are opaque strings handed to a
//! [`LinkGenerator`], which owns the anchor markup.

use crate::markup::{Attributes, html_escape};

/// Produces the markup for a single link element.
pub trait LinkGenerator: Send + Sync {
    /// Render a link.
    ///
    /// `body_html` is already-safe markup (escaped label or captured body),
    /// `target` is the opaque link target and `attrs` are the link element's
    /// attributes, including any selected class.
    fn link_to(&self, body_html: &str, target: &str, attrs: &Attributes) -> String;
}

/// Default generator emitting plain `<a href="...">` anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorLinkGenerator;

impl LinkGenerator for AnchorLinkGenerator {
    fn link_to(&self, body_html: &str, target: &str, attrs: &Attributes) -> String {
        format!(
            "<a href=\"{}\"{}>{}</a>",
            html_escape(target),
            attrs.render_except(&["href"]),
            body_html
        )
    }
}
