//! `.simplify.toml` configuration file support.
//!
//! Provides deserialization, discovery (walk up to `.git` root), and
//! conversion into a [`SimplifyConfig`].
//!
//! # Example config
//!
//! ```toml
//! [rules]
//! select = ["SIM001", "SIM013"]
//! exclude = ["SIM010"]
//!
//! [case_of]
//! ignore_types = ["Element.Font.Weight"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimplifyConfig;
use crate::error::ConfigError;
use crate::lint::rules::RuleCode;

/// Top-level `.simplify.toml` configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LintFileConfig {
    /// Rule selection.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Settings of the `case` expression rule.
    #[serde(default)]
    pub case_of: CaseOfConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Rules to enable. If empty/absent, all rules are enabled.
    /// Example: `["SIM001", "SIM013"]`
    #[serde(default)]
    pub select: Vec<String>,

    /// Rules to exclude (takes precedence over `select`).
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseOfConfig {
    /// Custom types whose `case` expressions are never collapsed.
    #[serde(default)]
    pub ignore_types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl LintFileConfig {
    /// Parse a `.simplify.toml` file from a string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    /// Load and validate a `.simplify.toml` file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate what the TOML schema cannot express: rule codes and type
    /// name syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_codes(&self.rules.select)?;
        parse_codes(&self.rules.exclude)?;
        self.to_config_unchecked().validate()?;
        Ok(())
    }

    /// Build the engine configuration this file describes.
    pub fn into_config(self) -> Result<SimplifyConfig, ConfigError> {
        self.validate()?;
        Ok(self.to_config_unchecked())
    }

    fn to_config_unchecked(&self) -> SimplifyConfig {
        let mut config = SimplifyConfig::default()
            .with_ignore(self.rules.exclude.iter().filter_map(|c| RuleCode::parse_code(c)))
            .ignore_case_of_for_types(self.case_of.ignore_types.iter().cloned());
        if !self.rules.select.is_empty() {
            config = config.with_select(
                self.rules
                    .select
                    .iter()
                    .filter_map(|c| RuleCode::parse_code(c)),
            );
        }
        config
    }

    /// Generate a default `.simplify.toml` config as a string.
    pub fn default_toml() -> &'static str {
        r#"# simplify configuration file

# Rule selection.
[rules]
# Enable specific rules only (empty = all rules enabled):
# select = ["SIM001", "SIM013"]
#
# Exclude specific rules:
# exclude = ["SIM010"]

# Case expressions over these custom types are never collapsed.
[case_of]
# ignore_types = ["Element.Font.Weight"]
"#
    }
}

fn parse_codes(codes: &[String]) -> Result<Vec<RuleCode>, ConfigError> {
    codes
        .iter()
        .map(|code| {
            RuleCode::parse_code(code).ok_or_else(|| ConfigError::InvalidRuleCode(code.clone()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Config file discovery
// ---------------------------------------------------------------------------

/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = ".simplify.toml";

/// Discover a `.simplify.toml` by walking up from `start_dir` to the
/// repository root (directory containing `.git`).
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = if start_dir.is_file() {
        start_dir.parent()?.to_path_buf()
    } else {
        start_dir.to_path_buf()
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if current.join(".git").exists() {
            return None;
        }
        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Discover and load the config file, returning the parsed config and
/// its path. Returns `Ok(None)` if no config file is found.
pub fn discover_and_load_config(
    start_dir: &Path,
) -> Result<Option<(LintFileConfig, PathBuf)>, ConfigError> {
    match discover_config(start_dir) {
        Some(path) => {
            let config = LintFileConfig::load(&path)?;
            Ok(Some((config, path)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn parse_minimal_config() {
        let config = LintFileConfig::parse("").unwrap();
        assert_eq!(config, LintFileConfig::default());
        assert_eq!(config.into_config().unwrap(), SimplifyConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let config = LintFileConfig::parse(
            r#"
[rules]
select = ["SIM001", "sim013"]
exclude = ["SIM013"]

[case_of]
ignore_types = ["Element.Font.Weight"]
"#,
        )
        .unwrap();
        config.validate().unwrap();
        let engine_config = config.into_config().unwrap();
        assert!(engine_config.is_rule_enabled(RuleCode::SIM001));
        assert!(!engine_config.is_rule_enabled(RuleCode::SIM013));
        assert!(!engine_config.is_rule_enabled(RuleCode::SIM002));
        assert_eq!(
            engine_config.ignore_case_of_for_types,
            vec!["Element.Font.Weight"]
        );
    }

    #[test]
    fn invalid_rule_code_rejected() {
        let config = LintFileConfig::parse("[rules]\nexclude = [\"SIM999\"]\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRuleCode(code)) if code == "SIM999"
        ));
    }

    #[test]
    fn invalid_type_name_rejected() {
        let config = LintFileConfig::parse("[case_of]\nignore_types = [\"Weight\"]\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Configuration(ConfigurationError::InvalidTypeNames(names)))
                if names == vec!["Weight".to_string()]
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            LintFileConfig::parse("[rules]\nseverity = \"error\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(LintFileConfig::parse("[output]\n").is_err());
    }

    #[test]
    fn discover_config_walks_up() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();

        let nested = tmp.path().join("src").join("Page");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(tmp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn discover_config_stops_at_git_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("src");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(discover_config(&nested).is_none());
        assert!(discover_and_load_config(&nested).unwrap().is_none());
    }

    #[test]
    fn discover_and_load_parses_valid_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[rules]\nselect = [\"SIM005\"]\n",
        )
        .unwrap();

        let (config, path) = discover_and_load_config(tmp.path()).unwrap().unwrap();
        assert_eq!(config.rules.select, vec!["SIM005"]);
        assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join(CONFIG_FILE_NAME);
        assert!(matches!(
            LintFileConfig::load(&missing),
            Err(ConfigError::Io { path, .. }) if path == missing
        ));
    }

    #[test]
    fn default_toml_is_valid() {
        let config = LintFileConfig::parse(LintFileConfig::default_toml()).unwrap();
        config.validate().unwrap();
    }
}
