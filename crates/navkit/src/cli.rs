//! CLI command implementations.
//!
//! Each command runs one complete render pass: a fresh navigation context,
//! the requested selections, then the blocks or page.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::Config;
use crate::definition::NavigationSet;
use crate::navigator::Navigator;
use crate::selection::{DEFAULT_BLOCK, Matcher};
use crate::theme::NavTheme;

/// A `--select` argument: `block=matcher`, or just `matcher` for `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArg {
    pub block: String,
    pub matcher: String,
}

/// Parse a `--select` value.
pub fn parse_select_arg(value: &str) -> Result<SelectArg, String> {
    let (block, matcher) = match value.split_once('=') {
        Some((block, matcher)) => (block.trim(), matcher),
        None => (DEFAULT_BLOCK, value),
    };

    if block.is_empty() {
        return Err(format!("missing block name in '{value}'"));
    }
    if matcher.is_empty() {
        return Err(format!("missing link to select in '{value}'"));
    }

    Ok(SelectArg {
        block: block.to_string(),
        matcher: matcher.to_string(),
    })
}

/// Inputs of the `render` command.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub definitions: PathBuf,
    pub selections: Vec<SelectArg>,
    /// Only render this block.
    pub block: Option<String>,
    /// Page template to render the blocks into.
    pub page: Option<String>,
    pub template_dir: Option<PathBuf>,
}

fn load_definitions(path: &Path) -> Result<NavigationSet> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    NavigationSet::from_toml(&source)
        .with_context(|| format!("invalid navigation definitions in {}", path.display()))
}

/// Render navigation blocks (or a page containing them) to a string.
///
/// Every selection is applied before the first block renders, so the
/// ordering policy never comes into play here.
pub fn cmd_render(config: &Config, request: &RenderRequest) -> Result<String> {
    let set = load_definitions(&request.definitions)?;

    let navigator = Navigator::from_config(config);
    let defaults = navigator.options();
    let mut ctx = navigator.begin_render();

    for selection in &request.selections {
        let matcher = Matcher::parse(&selection.matcher)?;
        ctx.select_in(&selection.block, matcher)?;
    }

    if let Some(page) = &request.page {
        let Some(template_dir) = request.template_dir.as_ref().or(config.template_dir.as_ref())
        else {
            bail!("--page requires a template directory (--template-dir or NAV_TEMPLATE_DIR)");
        };
        let theme = NavTheme::new(template_dir)?;
        let mut context = tera::Context::new();
        let html = theme.render_page(page, &mut ctx, &set, &defaults, &mut context)?;
        info!(page = %page, blocks = set.len(), "rendered page");
        return Ok(html);
    }

    if let Some(block) = &request.block {
        return set
            .render_block(&mut ctx, block, &defaults)?
            .with_context(|| format!("no navigation block named '{block}'"));
    }

    let mut out = String::new();
    for (name, html) in set.render_all(&mut ctx, &defaults)? {
        // SAFETY: writeln!() to String is infallible
        #[allow(clippy::unwrap_used)]
        writeln!(out, "<!-- {name} -->\n{html}").unwrap();
    }
    info!(blocks = set.len(), "rendered navigation");
    Ok(out)
}

/// Validate a definitions file and summarize its blocks.
pub fn cmd_check(path: &Path) -> Result<String> {
    let set = load_definitions(path)?;

    let mut out = format!("{:<20} {:<8} {:<8}\n", "BLOCK", "LINKS", "HIDDEN");
    out.push_str(&"-".repeat(36));
    out.push('\n');
    for block in set.blocks() {
        let Some(links) = &block.links else {
            out.push_str(&format!("{:<20} missing body\n", block.name));
            continue;
        };
        let hidden = links.iter().filter(|l| !l.visible).count();
        out.push_str(&format!("{:<20} {:<8} {:<8}\n", block.name, links.len(), hidden));
    }
    Ok(out)
}
