//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::options::{DEFAULT_ITEM_TAG, DEFAULT_SELECTED_CLASS, DEFAULT_WRAPPER_TAG, NavOptions};

/// Navigation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default wrapper tag; `None` disables wrappers (NAV_WRAPPER_TAG, default: ul).
    pub wrapper_tag: Option<String>,

    /// Default item tag; `None` disables item containers (NAV_ITEM_TAG, default: li).
    pub item_tag: Option<String>,

    /// Default selected class (NAV_SELECTED_CLASS, default: selected).
    pub selected_class: String,

    /// Reject selections made after a block rendered (NAV_STRICT_ORDERING, default: true).
    pub strict_ordering: bool,

    /// Directory of page templates (NAV_TEMPLATE_DIR).
    pub template_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrapper_tag: Some(DEFAULT_WRAPPER_TAG.to_string()),
            item_tag: Some(DEFAULT_ITEM_TAG.to_string()),
            selected_class: DEFAULT_SELECTED_CLASS.to_string(),
            strict_ordering: true,
            template_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let wrapper_tag = match lookup("NAV_WRAPPER_TAG") {
            Some(v) => tag_setting(&v),
            None => defaults.wrapper_tag,
        };

        let item_tag = match lookup("NAV_ITEM_TAG") {
            Some(v) => tag_setting(&v),
            None => defaults.item_tag,
        };

        let selected_class = lookup("NAV_SELECTED_CLASS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.selected_class);

        let strict_ordering = match lookup("NAV_STRICT_ORDERING") {
            Some(v) => parse_bool(&v).context("NAV_STRICT_ORDERING must be a boolean")?,
            None => defaults.strict_ordering,
        };

        let template_dir = lookup("NAV_TEMPLATE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            wrapper_tag,
            item_tag,
            selected_class,
            strict_ordering,
            template_dir,
        })
    }

    /// Default block options derived from this configuration.
    pub fn nav_options(&self) -> NavOptions {
        NavOptions {
            wrapper_tag: self.wrapper_tag.clone(),
            item_tag: self.item_tag.clone(),
            selected_class: self.selected_class.clone(),
            ..NavOptions::default()
        }
    }
}

fn tag_setting(value: &str) -> Option<String> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "none" | "0" => None,
        _ => Some(value.to_string()),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized boolean '{other}'"),
    }
}
