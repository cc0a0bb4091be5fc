//! Navigation block rendering.
//!
//! [`NavigationContext::render_navigation`] emits the optional wrapper, runs
//! the caller's body with a [`NavBuilder`] and closes the wrapper. Each link
//! emitted through the builder consults the block's selection to decide
//! whether its container gets the selected class.

use std::sync::Arc;

use tracing::debug;

use crate::error::NavResult;
use crate::link::LinkGenerator;
use crate::markup::{close_tag, content_tag, html_escape, tag};
use crate::options::{LinkHtml, NavOptions};
use crate::selection::{Matcher, NavigationContext};

/// Link emitter handed to a navigation block body.
pub struct NavBuilder<'a> {
    out: &'a mut String,
    block: &'a str,
    options: &'a NavOptions,
    matcher: Option<&'a Matcher>,
    link_generator: &'a dyn LinkGenerator,
    item_count: usize,
}

impl NavBuilder<'_> {
    /// Name of the block being rendered.
    pub fn block(&self) -> &str {
        self.block
    }

    /// Normalized options of the block being rendered.
    pub fn options(&self) -> &NavOptions {
        self.options
    }

    /// Number of links emitted so far.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether `key` is the selected link of this block.
    pub fn is_selected(&self, key: &str) -> bool {
        self.matcher.is_some_and(|m| m.matches(key))
    }

    /// Append arbitrary markup to the block body.
    pub fn push_str(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    /// Render a labelled link and return its markup without emitting it.
    ///
    /// The raw label is matched against the block's selection; the escaped
    /// label becomes the link text.
    pub fn link(&mut self, label: &str, target: &str, html: impl Into<LinkHtml>) -> String {
        let markup = self.render_item(label, &html_escape(label), target, html.into());
        self.item_count += 1;
        markup
    }

    /// Render a labelled link and emit it.
    pub fn link_to(&mut self, label: &str, target: &str, html: impl Into<LinkHtml>) {
        let markup = self.link(label, target, html);
        self.out.push_str(&markup);
    }

    /// Render a link whose content is produced by `capture` and emit it.
    ///
    /// The captured markup itself is matched against the selection, so a
    /// pattern selection is usually what selects these links. Prefer
    /// [`link_block_keyed`](Self::link_block_keyed) where an identifier exists.
    pub fn link_block<F>(
        &mut self,
        target: &str,
        html: impl Into<LinkHtml>,
        capture: F,
    ) -> NavResult<()>
    where
        F: FnOnce(&mut String) -> NavResult<()>,
    {
        let mut body = String::new();
        capture(&mut body)?;
        self.emit_block_item(&body, &body, target, html.into());
        Ok(())
    }

    /// Render a link with captured content, matched on an explicit key.
    pub fn link_block_keyed<F>(
        &mut self,
        key: &str,
        target: &str,
        html: impl Into<LinkHtml>,
        capture: F,
    ) -> NavResult<()>
    where
        F: FnOnce(&mut String) -> NavResult<()>,
    {
        let mut body = String::new();
        capture(&mut body)?;
        self.emit_block_item(key, &body, target, html.into());
        Ok(())
    }

    fn emit_block_item(&mut self, match_key: &str, body: &str, target: &str, html: LinkHtml) {
        let markup = self.render_item(match_key, body, target, html);
        self.out.push_str(&markup);
        self.item_count += 1;
    }

    fn render_item(
        &self,
        match_key: &str,
        body_html: &str,
        target: &str,
        html: LinkHtml,
    ) -> String {
        let LinkHtml {
            mut attrs,
            mut item,
        } = html;

        if self.is_selected(match_key) {
            let selected = &self.options.selected_class;
            match self.options.item_tag {
                Some(_) => item.append_class(selected),
                None => attrs.append_class(selected),
            }
        }

        let link_html = self.link_generator.link_to(body_html, target, &attrs);

        match &self.options.item_tag {
            Some(item_tag) => content_tag(item_tag, &link_html, &item),
            None => link_html,
        }
    }
}

impl NavigationContext {
    /// Render a navigation block, appending its markup to `out`.
    ///
    /// The block is marked rendered once the body completes. An error from
    /// the body aborts the render and leaves the block unrendered.
    pub fn render_navigation<F>(
        &mut self,
        out: &mut String,
        block: &str,
        options: &NavOptions,
        body: F,
    ) -> NavResult<()>
    where
        F: FnOnce(&mut NavBuilder<'_>) -> NavResult<()>,
    {
        let options = options.normalized();
        let link_generator = options
            .link_generator
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.link_generator));

        if let Some(wrapper) = &options.wrapper_tag {
            out.push_str(&tag(wrapper, &options.html));
        }

        let item_count = {
            let mut builder = NavBuilder {
                out: &mut *out,
                block,
                options: &options,
                matcher: self.matcher(block),
                link_generator: &*link_generator,
                item_count: 0,
            };
            body(&mut builder)?;
            builder.item_count
        };

        if let Some(wrapper) = &options.wrapper_tag {
            out.push_str(&close_tag(wrapper));
        }

        self.mark_rendered(block);
        debug!(block = %block, items = item_count, "navigation block rendered");
        Ok(())
    }

    /// Render a navigation block and return its markup.
    pub fn navigation_for<F>(
        &mut self,
        block: &str,
        options: &NavOptions,
        body: F,
    ) -> NavResult<String>
    where
        F: FnOnce(&mut NavBuilder<'_>) -> NavResult<()>,
    {
        let mut out = String::new();
        self.render_navigation(&mut out, block, options, body)?;
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::markup::Attributes;

    fn render_foo(ctx: &mut NavigationContext, options: &NavOptions) -> String {
        ctx.navigation_for("main", options, |nav| {
            nav.link_to("Foo", "#", LinkHtml::new());
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn default_markup() {
        let mut ctx = NavigationContext::new();
        let html = render_foo(&mut ctx, &NavOptions::default());
        assert_eq!(html, r##"<ul><li><a href="#">Foo</a></li></ul>"##);
    }

    #[test]
    fn custom_wrapper_tag() {
        let mut ctx = NavigationContext::new();
        let html = render_foo(&mut ctx, &NavOptions::new().wrapper_tag("ol"));
        assert_eq!(html, r##"<ol><li><a href="#">Foo</a></li></ol>"##);
    }

    #[test]
    fn no_wrapper_keeps_items() {
        let mut ctx = NavigationContext::new();
        let html = render_foo(&mut ctx, &NavOptions::new().without_wrapper());
        assert_eq!(html, r##"<li><a href="#">Foo</a></li>"##);
    }

    #[test]
    fn wrapper_does_not_depend_on_item_tag() {
        let mut ctx = NavigationContext::new();
        let html = render_foo(&mut ctx, &NavOptions::new().item_tag("div"));
        assert_eq!(html, r##"<ul><div><a href="#">Foo</a></div></ul>"##);
    }

    #[test]
    fn bare_anchor_without_any_tags() {
        let mut ctx = NavigationContext::new();
        let options = NavOptions::new().without_wrapper().without_item_tag();
        let html = render_foo(&mut ctx, &options);
        assert_eq!(html, r##"<a href="#">Foo</a>"##);
    }

    #[test]
    fn wrapper_attributes() {
        let mut ctx = NavigationContext::new();
        let options = NavOptions::new().attr("class", "bar").attr("data-more", "baz");
        let html = render_foo(&mut ctx, &options);
        assert_eq!(
            html,
            r##"<ul class="bar" data-more="baz"><li><a href="#">Foo</a></li></ul>"##
        );
    }

    #[test]
    fn selected_item_gets_class() {
        let mut ctx = NavigationContext::new();
        ctx.select("Foo").unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_to("Foo", "#", LinkHtml::new());
                nav.link_to("Bar", "#", LinkHtml::new());
                Ok(())
            })
            .unwrap();
        assert_eq!(
            html,
            r##"<ul><li class="selected"><a href="#">Foo</a></li><li><a href="#">Bar</a></li></ul>"##
        );
    }

    #[test]
    fn selected_class_merges_with_item_class() {
        let mut ctx = NavigationContext::new();
        ctx.select("Foo").unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_to("Foo", "#", LinkHtml::new().item_class("bar"));
                Ok(())
            })
            .unwrap();
        assert_eq!(
            html,
            r##"<ul><li class="bar selected"><a href="#">Foo</a></li></ul>"##
        );
    }

    #[test]
    fn selected_link_without_item_tag() {
        let mut ctx = NavigationContext::new();
        ctx.select("Foo").unwrap();
        let options = NavOptions::new().without_item_tag();
        let html = render_foo(&mut ctx, &options);
        assert_eq!(html, r##"<ul><a href="#" class="selected">Foo</a></ul>"##);
    }

    #[test]
    fn item_count_tracks_links() {
        let mut ctx = NavigationContext::new();
        let mut seen = Vec::new();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                seen.push(nav.item_count());
                nav.link_to("Foo", "#", LinkHtml::new());
                seen.push(nav.item_count());
                let bar = nav.link("Bar", "#", LinkHtml::new());
                nav.push_str(&bar);
                seen.push(nav.item_count());
                nav.link_block("#", LinkHtml::new(), |body| {
                    body.push_str("<span>Baz</span>");
                    Ok(())
                })?;
                let count = nav.item_count();
                nav.push_str(&format!("{count} links"));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(html.contains("3 links"));
    }

    #[test]
    fn builder_exposes_block_and_options() {
        let mut ctx = NavigationContext::new();
        let options = NavOptions::new().selected_class("current");
        let html = ctx
            .navigation_for("footer", &options, |nav| {
                let note = format!("{}:{}", nav.block(), nav.options().selected_class);
                nav.push_str(&note);
                Ok(())
            })
            .unwrap();
        assert_eq!(html, "<ul>footer:current</ul>");
    }

    #[test]
    fn returned_link_is_not_emitted() {
        let mut ctx = NavigationContext::new();
        let mut returned = String::new();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                returned = nav.link("Foo", "#", LinkHtml::new());
                Ok(())
            })
            .unwrap();
        assert_eq!(html, "<ul></ul>");
        assert_eq!(returned, r##"<li><a href="#">Foo</a></li>"##);
    }

    #[test]
    fn block_link_selected_by_pattern() {
        let mut ctx = NavigationContext::new();
        ctx.select(Matcher::pattern("Foo").unwrap()).unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_block("#", LinkHtml::new(), |body| {
                    body.push_str("<span>Foo</span>");
                    Ok(())
                })
            })
            .unwrap();
        assert_eq!(
            html,
            r##"<ul><li class="selected"><a href="#"><span>Foo</span></a></li></ul>"##
        );
    }

    #[test]
    fn block_link_exact_match_uses_markup() {
        let mut ctx = NavigationContext::new();
        ctx.select("<span>Foo</span>").unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_block("#", LinkHtml::new(), |body| {
                    body.push_str("<span>Foo</span>");
                    Ok(())
                })
            })
            .unwrap();
        assert!(html.contains(r#"<li class="selected">"#));
    }

    #[test]
    fn keyed_block_link_matches_key() {
        let mut ctx = NavigationContext::new();
        ctx.select("members").unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_block_keyed("members", "/members", LinkHtml::new(), |body| {
                    body.push_str("<span>Members</span>");
                    Ok(())
                })
            })
            .unwrap();
        assert_eq!(
            html,
            r#"<ul><li class="selected"><a href="/members"><span>Members</span></a></li></ul>"#
        );
    }

    #[test]
    fn label_is_escaped_but_matched_raw() {
        let mut ctx = NavigationContext::new();
        ctx.select("Q&A").unwrap();
        let html = ctx
            .navigation_for("main", &NavOptions::default(), |nav| {
                nav.link_to("Q&A", "/qa", Attributes::new());
                Ok(())
            })
            .unwrap();
        assert_eq!(
            html,
            r#"<ul><li class="selected"><a href="/qa">Q&amp;A</a></li></ul>"#
        );
    }

    #[test]
    fn marks_block_rendered() {
        let mut ctx = NavigationContext::new();
        render_foo(&mut ctx, &NavOptions::default());
        assert!(ctx.is_rendered("main"));
        assert!(matches!(
            ctx.select("Foo"),
            Err(NavError::LateSelection { .. })
        ));
    }

    #[test]
    fn failing_body_leaves_block_unrendered() {
        let mut ctx = NavigationContext::new();
        let result = ctx.navigation_for("main", &NavOptions::default(), |nav| {
            nav.link_block("#", LinkHtml::new(), |_| {
                Err(NavError::MissingBody {
                    block: "inner".to_string(),
                })
            })
        });
        assert!(result.is_err());
        assert!(!ctx.is_rendered("main"));
    }

    #[test]
    fn rerender_is_identical() {
        let mut ctx = NavigationContext::new();
        ctx.select("Foo").unwrap();
        let first = render_foo(&mut ctx, &NavOptions::default());
        let second = render_foo(&mut ctx, &NavOptions::default());
        assert_eq!(first, second);
        assert!(first.contains("selected"));
    }
}
