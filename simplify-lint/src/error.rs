//! Error types for the simplifier.

use std::path::PathBuf;

use simplify_repr::{Location, Range};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Engine configuration errors
// ---------------------------------------------------------------------------

/// Errors that stop a [`Simplifier`](crate::Simplifier) from running at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Type names in `ignore_case_of_for_types` that are not `Module.Type`.
    #[error("Invalid type names: {}", backticked(.0))]
    InvalidTypeNames(Vec<String>),

    /// Syntactically valid type names that no project or dependency module declares.
    #[error("Could not find type names: {}", backticked(.0))]
    UnknownTypeNames(Vec<String>),
}

impl ConfigurationError {
    /// One-line summary of the problem.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Explanatory paragraphs shown under the message.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidTypeNames(_) => vec![
                "I expect valid type names to be passed to `ignore_case_of_for_types` that include the module name, like `Module.Name.TypeName`.".to_string(),
            ],
            Self::UnknownTypeNames(_) => vec![
                "I expected to find these custom types in the code or dependencies, but I could not find them.".to_string(),
                "Please check whether these types have been moved or renamed, and if so, update your configuration.".to_string(),
                "If they have been removed, remove them from the configuration of this rule.".to_string(),
                "Note that I may have provided fixes for things you didn't wish to be fixed, so you might want to double check the changes I have applied.".to_string(),
            ],
        }
    }
}

fn backticked(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Config file errors
// ---------------------------------------------------------------------------

/// Errors from `.simplify.toml` operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown rule code '{0}'")]
    InvalidRuleCode(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

// ---------------------------------------------------------------------------
// Fix errors
// ---------------------------------------------------------------------------

/// Errors raised while applying edits to source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    #[error("Overlapping edit ranges: {first} and {second}")]
    Overlap { first: Range, second: Range },

    #[error("Edit position {location} is outside the source text")]
    OutOfBounds { location: Location },

    #[error("Edit range {range} ends before it starts")]
    InvertedRange { range: Range },
}
