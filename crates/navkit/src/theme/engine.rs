//! Tera page rendering with navigation blocks.

use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::definition::NavigationSet;
use crate::options::NavOptions;
use crate::selection::NavigationContext;

/// Page renderer that injects rendered navigation into Tera templates.
pub struct NavTheme {
    /// Tera template engine instance.
    tera: Tera,
}

impl NavTheme {
    /// Create a theme loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Create a theme with no templates.
    pub fn empty() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a template from a string.
    pub fn add_raw_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, source)
            .with_context(|| format!("failed to parse template: {name}"))
    }

    /// Get the underlying Tera instance.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Render a page template with every block of `set` available as
    /// `navigation.<name>`.
    ///
    /// Blocks render in definition order before the template itself, so all
    /// selections must already be made on `ctx`.
    pub fn render_page(
        &self,
        template: &str,
        ctx: &mut NavigationContext,
        set: &NavigationSet,
        defaults: &NavOptions,
        context: &mut tera::Context,
    ) -> Result<String> {
        let navigation = set
            .render_all(ctx, defaults)
            .context("failed to render navigation")?;
        context.insert("navigation", &navigation);

        self.tera
            .render(template, context)
            .with_context(|| format!("failed to render page template: {template}"))
    }

    /// Reload templates from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.tera
            .full_reload()
            .context("failed to reload templates")
    }
}

impl Default for NavTheme {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for NavTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavTheme")
            .field("template_count", &self.tera.get_template_names().count())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const NAV: &str = r##"
        [[navigation]]
        [[navigation.link]]
        label = "Foo"
        target = "#"
        [[navigation.link]]
        label = "Bar"
        target = "#bar"
    "##;

    #[test]
    fn render_page_injects_navigation() {
        let mut theme = NavTheme::empty();
        theme
            .add_raw_template("page.html", "<nav>{{ navigation.main | safe }}</nav>{{ title }}")
            .unwrap();

        let set = NavigationSet::from_toml(NAV).unwrap();
        let mut ctx = NavigationContext::new();
        ctx.select("Bar").unwrap();

        let mut context = tera::Context::new();
        context.insert("title", "Home");
        let html = theme
            .render_page("page.html", &mut ctx, &set, &NavOptions::default(), &mut context)
            .unwrap();

        assert_eq!(
            html,
            r##"<nav><ul><li><a href="#">Foo</a></li><li class="selected"><a href="#bar">Bar</a></li></ul></nav>Home"##
        );
    }

    #[test]
    fn reload_picks_up_new_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.html"), "{{ navigation.main | safe }}").unwrap();

        let mut theme = NavTheme::new(dir.path()).unwrap();
        assert_eq!(theme.tera().get_template_names().count(), 1);

        std::fs::write(dir.path().join("other.html"), "<p>{{ title }}</p>").unwrap();
        theme.reload().unwrap();
        assert_eq!(theme.tera().get_template_names().count(), 2);

        let set = NavigationSet::from_toml(NAV).unwrap();
        let mut ctx = NavigationContext::new();
        let mut context = tera::Context::new();
        context.insert("title", "Reloaded");
        let html = theme
            .render_page("other.html", &mut ctx, &set, &NavOptions::default(), &mut context)
            .unwrap();
        assert_eq!(html, "<p>Reloaded</p>");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let theme = NavTheme::empty();
        let set = NavigationSet::from_toml(NAV).unwrap();
        let mut ctx = NavigationContext::new();
        let err = theme
            .render_page(
                "missing.html",
                &mut ctx,
                &set,
                &NavOptions::default(),
                &mut tera::Context::new(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn navigation_errors_abort_page() {
        let mut theme = NavTheme::empty();
        theme.add_raw_template("page.html", "{{ navigation.main | safe }}").unwrap();
        let set = NavigationSet::from_toml("[[navigation]]\nname = \"main\"").unwrap();
        let mut ctx = NavigationContext::new();
        let err = theme
            .render_page(
                "page.html",
                &mut ctx,
                &set,
                &NavOptions::default(),
                &mut tera::Context::new(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("failed to render navigation"));
    }
}
