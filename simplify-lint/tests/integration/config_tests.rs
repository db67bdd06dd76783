//! Configuration: programmatic settings, `.simplify.toml` files and the
//! errors that stop the engine before it looks at any code.

use std::fs;

use simplify_lint::{
    discover_and_load_config, ConfigError, ConfigurationError, LintFileConfig, ModuleInterface,
    Project, RuleCode, Simplifier, SimplifyConfig, CONFIG_FILE_NAME,
};
use simplify_repr::parse_module;
use tempfile::TempDir;

fn project_with_type_t() -> Project {
    let source = "module A exposing (..)\ntype T = X | Y\na = x || True\n";
    Project::new().with_module("src/A.elm", parse_module(source).unwrap())
}

// =============================================================================
// Type name errors
// =============================================================================

#[test]
fn test_all_invalid_type_names_are_listed() {
    let config = SimplifyConfig::default().ignore_case_of_for_types(["_.B", "A.f", "B", "A.B"]);
    let err = Simplifier::new(config).err().unwrap();
    assert_eq!(err.message(), "Invalid type names: `_.B`, `A.f`, `B`");
    assert_eq!(
        err.details(),
        vec!["I expect valid type names to be passed to `ignore_case_of_for_types` that include the module name, like `Module.Name.TypeName`."]
    );
}

#[test]
fn test_unknown_type_names_stop_the_analysis() {
    let config = SimplifyConfig::default().ignore_case_of_for_types(["A.B", "A.T", "B.C"]);
    let simplifier = Simplifier::new(config).unwrap();
    let err = simplifier.analyze(&project_with_type_t()).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownTypeNames(vec!["A.B".into(), "B.C".into()]));
    assert_eq!(err.message(), "Could not find type names: `A.B`, `B.C`");
    assert_eq!(err.details().len(), 4);
}

#[test]
fn test_duplicate_type_names_are_reported_once() {
    let config = SimplifyConfig::default().ignore_case_of_for_types(["A.B", "A.B", "A.T"]);
    let simplifier = Simplifier::new(config).unwrap();
    assert_eq!(simplifier.ignored_types().len(), 2);
    let err = simplifier.analyze(&project_with_type_t()).unwrap_err();
    assert_eq!(err.message(), "Could not find type names: `A.B`");
}

#[test]
fn test_types_from_dependencies_and_project_are_known() {
    let config =
        SimplifyConfig::default().ignore_case_of_for_types(["A.T", "Element.Font.Weight"]);
    let project = project_with_type_t().with_dependency(
        ModuleInterface::new("Element.Font").with_type("Weight", &["Bold", "Regular"]),
    );
    let reports = Simplifier::new(config).unwrap().analyze(&project).unwrap();
    assert_eq!(reports[0].findings.len(), 1);
}

// =============================================================================
// Rule selection
// =============================================================================

#[test]
fn test_empty_selection_reports_nothing() {
    let config = SimplifyConfig::default().with_select([]);
    let simplifier = Simplifier::new(config).unwrap();
    assert!(simplifier.rule_codes().is_empty());
    let reports = simplifier.analyze(&project_with_type_t()).unwrap();
    assert!(reports[0].is_clean());
}

#[test]
fn test_ignored_rule_is_not_run() {
    let config = SimplifyConfig::default().with_ignore([RuleCode::SIM001]);
    let reports = Simplifier::new(config)
        .unwrap()
        .analyze(&project_with_type_t())
        .unwrap();
    assert!(reports[0].is_clean());
}

// =============================================================================
// .simplify.toml
// =============================================================================

fn repo_with_config(content: &str) -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    fs::write(tmp.path().join(CONFIG_FILE_NAME), content).unwrap();
    fs::create_dir_all(tmp.path().join("src").join("Page")).unwrap();
    tmp
}

#[test]
fn test_config_file_drives_the_engine() {
    let tmp = repo_with_config(
        "[rules]\nselect = [\"SIM005\", \"SIM007\"]\n\n[case_of]\nignore_types = [\"A.T\"]\n",
    );
    let (file, path) = discover_and_load_config(&tmp.path().join("src").join("Page"))
        .unwrap()
        .unwrap();
    assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME));

    let simplifier = Simplifier::new(file.into_config().unwrap()).unwrap();
    assert_eq!(simplifier.rule_codes(), vec![RuleCode::SIM005, RuleCode::SIM007]);

    let source = "module A exposing (..)\ntype T = X | Y\na =\n    case t of\n        X -> n + 0\n        Y -> n + 0\n";
    let project = Project::new().with_module("src/A.elm", parse_module(source).unwrap());
    let reports = simplifier.analyze(&project).unwrap();
    let messages: Vec<&str> = reports[0].findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Unnecessary addition with 0", "Unnecessary addition with 0"]
    );
}

#[test]
fn test_invalid_type_name_in_file_is_rejected_on_load() {
    let tmp = repo_with_config("[case_of]\nignore_types = [\"_.B\", \"Weight\"]\n");
    let err = LintFileConfig::load(&tmp.path().join(CONFIG_FILE_NAME)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid type names: `_.B`, `Weight`"
    );
    assert!(matches!(
        err,
        ConfigError::Configuration(ConfigurationError::InvalidTypeNames(_))
    ));
}

#[test]
fn test_unknown_rule_code_in_file_is_rejected() {
    let tmp = repo_with_config("[rules]\nselect = [\"SIM042\"]\n");
    assert!(matches!(
        discover_and_load_config(tmp.path()),
        Err(ConfigError::InvalidRuleCode(code)) if code == "SIM042"
    ));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let tmp = repo_with_config("[rules\nselect = 1\n");
    assert!(matches!(
        discover_and_load_config(tmp.path()),
        Err(ConfigError::Parse(_))
    ));
}
