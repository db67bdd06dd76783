//! End-to-end scenarios: fixture source in, findings and fixed source out.
//!
//! Coverage:
//!  - Boolean operators with an absorbing or neutral literal
//!  - `case` over booleans rewritten to `if`
//!  - Merging runs of literal lists in `List.concat`
//!  - `case` over a dependency type that is configured to be left alone
//!  - Malformed type names stopping the engine before any traversal

use simplify_lint::{
    apply_fix, ConfigurationError, Finding, ModuleReport, Project, ProjectIndex, Simplifier,
    SimplifyConfig,
};
use simplify_repr::{parse_module, Module};

// =============================================================================
// HELPERS
// =============================================================================

fn module(source: &str) -> Module {
    parse_module(source).unwrap_or_else(|e| panic!("fixture {source:?} should parse: {e}"))
}

fn analyze(source: &str) -> Vec<Finding> {
    crate::init_tracing();
    let m = module(source);
    let index = ProjectIndex::from_modules([&m], Vec::new());
    Simplifier::new(SimplifyConfig::default())
        .unwrap()
        .analyze_module(&m, &index)
}

/// Exactly one finding, with `message`, fixing `source` into `expected`.
#[track_caller]
fn expect_single_fix(source: &str, message: &str, expected: &str) {
    let findings = analyze(source);
    assert_eq!(findings.len(), 1, "findings for {source:?}: {findings:#?}");
    assert_eq!(findings[0].message, message);
    assert_eq!(apply_fix(source, &findings[0]).unwrap(), expected);
}

fn two_module_project() -> Project {
    Project::new()
        .with_module(
            "src/Other.elm",
            module("module Other exposing (..)\ntype B = C | D\n"),
        )
        .with_module(
            "src/A.elm",
            module(
                "module A exposing (..)\nimport Other exposing (B(..))\na =\n    case x of\n        C -> 1\n        D -> 1\n",
            ),
        )
}

fn all_findings(reports: &[ModuleReport]) -> Vec<&Finding> {
    reports.iter().flat_map(|r| &r.findings).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_absorbing_literal() {
    expect_single_fix("a = True || x", "Condition is always True", "a = True");
}

#[test]
fn test_neutral_literal() {
    expect_single_fix("a = x || False", "Part of the expression is unnecessary", "a = x");
}

#[test]
fn test_boolean_case_becomes_if() {
    expect_single_fix(
        "a = case bool of\n True -> 1\n False -> 2",
        "Replace `case..of` by an `if` condition",
        "a = if bool then 1 else 2",
    );
}

#[test]
fn test_consecutive_literal_lists_are_merged() {
    expect_single_fix(
        "a = List.concat [a, [0], b, [1,2,3], [4,5,6], [7], c, [8], [9]]",
        "Consecutive literal lists should be merged",
        "a = List.concat [a, [0], b, [1,2,3, 4,5,6, 7], c, [8, 9]]",
    );
}

#[test]
fn test_ignored_dependency_type_keeps_its_case() {
    let config = SimplifyConfig::default().ignore_case_of_for_types(["Other.B"]);
    let reports = Simplifier::new(config)
        .unwrap()
        .analyze(&two_module_project())
        .unwrap();
    assert_eq!(reports.len(), 2);
    assert!(all_findings(&reports).is_empty(), "{reports:#?}");
}

#[test]
fn test_same_case_is_collapsed_without_configuration() {
    let project = two_module_project();
    let reports = Simplifier::new(SimplifyConfig::default())
        .unwrap()
        .analyze(&project)
        .unwrap();
    let findings = all_findings(&reports);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message, "Unnecessary case expression");
    assert_eq!(reports[1].module.to_string(), "A");
}

#[test]
fn test_malformed_type_name_stops_everything() {
    let config = SimplifyConfig::default().ignore_case_of_for_types(["_.B"]);
    let err = Simplifier::new(config).err().unwrap();
    assert_eq!(err, ConfigurationError::InvalidTypeNames(vec!["_.B".into()]));
    assert_eq!(err.message(), "Invalid type names: `_.B`");
}

// =============================================================================
// Several findings in one module
// =============================================================================

#[test]
fn test_independent_findings_are_all_reported() {
    let findings = analyze("a = x || False\nb = y * 1\n");
    let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Part of the expression is unnecessary",
            "Unnecessary multiplication by 1",
        ]
    );
}

#[test]
fn test_fix_module_applies_every_fix() {
    let source = "a = x || False\nb = Cmd.batch [ c, Cmd.none, d ]\nc = List.map identity xs\n";
    let m = module(source);
    let index = ProjectIndex::from_modules([&m], Vec::new());
    let fixed = Simplifier::new(SimplifyConfig::default())
        .unwrap()
        .fix_module(&m, &index)
        .unwrap();
    assert_eq!(fixed, "a = x\nb = Cmd.batch [ c, d ]\nc = xs\n");
}
