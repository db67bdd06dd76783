//! Simplification rules for an Elm-like functional language.
//!
//! The [`Simplifier`] walks parsed modules, reports expressions that can be
//! written more simply and offers a fix for each of them.

pub mod config;
pub mod error;
pub mod lint;
pub mod lint_config;

pub use config::SimplifyConfig;
pub use error::{ConfigError, ConfigurationError, FixError};
pub use lint::{
    apply_all_fixes, apply_fix, Edit, Finding, ModuleInterface, ModuleReport, Project,
    ProjectIndex, ProjectKnowledge, ProjectModule, RuleCode, Simplifier, TypeName,
};
pub use lint_config::{
    discover_and_load_config, discover_config, LintFileConfig, CONFIG_FILE_NAME,
};
