//! Navigation error types.
//!
//! Every error names the navigation block it concerns so template ordering
//! mistakes can be traced back to the offending call.

use thiserror::Error;

/// Errors raised while selecting or rendering navigation.
#[derive(Debug, Error)]
pub enum NavError {
    /// `select` was called for a block that already rendered in this pass.
    #[error(
        "the '{block}' navigation block has already been rendered; select a link before rendering its navigation"
    )]
    LateSelection { block: String },

    /// A navigation block was declared without a body producing its links.
    #[error("navigation block '{block}': missing body")]
    MissingBody { block: String },

    /// Two navigation definitions share a block name.
    #[error("navigation block '{block}' is defined more than once")]
    DuplicateBlock { block: String },

    /// A `/pattern/` matcher did not compile.
    #[error("invalid selection pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A navigation definition file could not be parsed.
    #[error("failed to parse navigation definitions: {0}")]
    Definition(#[from] toml::de::Error),
}

/// Result type alias using NavError.
pub type NavResult<T> = Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_selection_names_block() {
        let err = NavError::LateSelection {
            block: "popup".to_string(),
        };
        assert!(err.to_string().contains("'popup'"));
    }

    #[test]
    fn missing_body_names_block() {
        let err = NavError::MissingBody {
            block: "main".to_string(),
        };
        assert_eq!(err.to_string(), "navigation block 'main': missing body");
    }

    #[test]
    fn duplicate_block_names_block() {
        let err = NavError::DuplicateBlock {
            block: "footer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "navigation block 'footer' is defined more than once"
        );
    }
}
