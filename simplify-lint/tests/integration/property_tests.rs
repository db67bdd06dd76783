//! Properties that hold across the whole catalog.
//!
//! Coverage:
//!  - Fixed output is stable: analyzing it again finds nothing
//!  - Redundant parentheses do not change what is reported
//!  - Every emitted fix applies cleanly
//!  - Repeated and parallel runs give identical results
//!  - Boundary inputs (empty lists, zero and negative counts)
//!  - Point-free calls simplify to functions

use simplify_lint::{
    apply_all_fixes, apply_fix, Finding, Project, ProjectIndex, Simplifier, SimplifyConfig,
};
use simplify_repr::{parse_module, Module};

// =============================================================================
// HELPERS
// =============================================================================

fn module(source: &str) -> Module {
    parse_module(source).unwrap_or_else(|e| panic!("fixture {source:?} should parse: {e}"))
}

fn simplifier() -> Simplifier {
    crate::init_tracing();
    Simplifier::new(SimplifyConfig::default()).unwrap()
}

fn analyze(source: &str) -> Vec<Finding> {
    let m = module(source);
    let index = ProjectIndex::from_modules([&m], Vec::new());
    simplifier().analyze_module(&m, &index)
}

fn messages(source: &str) -> Vec<String> {
    analyze(source).into_iter().map(|f| f.message).collect()
}

fn fix_all(source: &str) -> String {
    apply_all_fixes(source, &analyze(source)).unwrap()
}

const CATALOG_SAMPLES: &[&str] = &[
    "a = True || x",
    "a = x && True",
    "a = not (not x)",
    "a = x == True",
    "a = if c then True else False",
    "a = { r | f = r.f }",
    "a = x + 0",
    "a = -(-n)",
    "a = (+) x y",
    "a = (\\() -> x) ()",
    "a = always x y",
    "a = List.concat [a, [0], b, [1,2,3], [4,5,6], [7], c, [8], [9]]",
    "a = String.join \"\" xs",
    "a = Maybe.withDefault d (Just x)",
    "a = Result.map f (Err e)",
    "import Set\na = Set.isEmpty Set.empty\n",
    "import Dict\na = Dict.size Dict.empty\n",
    "a = Cmd.batch [ a, Cmd.none, b ]",
    "a = Sub.map f Sub.none",
];

// =============================================================================
// Idempotence and edit validity
// =============================================================================

#[test]
fn test_every_sample_has_an_applicable_fix() {
    for source in CATALOG_SAMPLES {
        let findings = analyze(source);
        assert_eq!(findings.len(), 1, "{source:?}: {findings:#?}");
        assert!(findings[0].fix.is_some(), "{source:?} has no fix");
        apply_fix(source, &findings[0])
            .unwrap_or_else(|e| panic!("fix for {source:?} does not apply: {e}"));
    }
}

#[test]
fn test_fixed_output_is_clean() {
    for source in CATALOG_SAMPLES {
        let fixed = fix_all(source);
        let again = analyze(&fixed);
        assert!(again.is_empty(), "{source:?} fixed to {fixed:?} still has {again:#?}");
        assert_eq!(fix_all(&fixed), fixed);
    }
}

#[test]
fn test_nested_fixes_apply_together() {
    assert_eq!(fix_all("a = if True then x + 0 else y"), "a = x");
    assert_eq!(fix_all("a = f (x || False) (y * 1)"), "a = f (x) (y)");
}

// =============================================================================
// Parentheses
// =============================================================================

#[test]
fn test_redundant_parentheses_are_ignored() {
    let plain = messages("a = True || x");
    for source in ["a = (True) || x", "a = True || (x)", "a = ((True || x))"] {
        assert_eq!(messages(source), plain, "{source:?}");
    }
    assert_eq!(fix_all("a = (True) || x"), "a = True");

    let plain = messages("a = List.map identity x");
    assert_eq!(messages("a = List.map (identity) x"), plain);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_runs_agree() {
    let source = "a = x || False\nb = [ y * 1, not True ]\nc = List.concat []\n";
    assert_eq!(analyze(source), analyze(source));
}

#[test]
fn test_parallel_analysis_matches_module_by_module() {
    let sources: Vec<String> = (0..24)
        .map(|i| format!("module M{i} exposing (..)\na = x || False\nb = List.reverse (List.reverse l{i})\n"))
        .collect();
    let mut project = Project::new();
    for (i, source) in sources.iter().enumerate() {
        project = project.with_module(format!("src/M{i}.elm"), module(source));
    }

    let engine = simplifier();
    let reports = engine.analyze(&project).unwrap();
    let index = project.index();
    for (report, input) in reports.iter().zip(&project.modules) {
        assert_eq!(report.path, input.path);
        assert_eq!(report.findings, engine.analyze_module(&input.module, &index));
    }
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn test_boundaries() {
    let cases = [
        ("a = List.concat []", "Using List.concat on an empty list will result in []", "a = []"),
        ("a = List.concat [ b ]", "Unnecessary use of List.concat on a list with 1 element", "a = b"),
        ("a = String.repeat 0 str", "String.repeat will result in an empty string", "a = \"\""),
        ("a = List.repeat -5 list", "List.repeat will result in an empty list", "a = []"),
    ];
    for (source, message, expected) in cases {
        let findings = analyze(source);
        assert_eq!(findings.len(), 1, "{source:?}: {findings:#?}");
        assert_eq!(findings[0].message, message);
        assert_eq!(apply_fix(source, &findings[0]).unwrap(), expected);
    }
}

#[test]
fn test_non_literal_counts_are_kept() {
    assert!(analyze("a = List.repeat n list").is_empty());
    assert!(analyze("a = String.repeat n str").is_empty());
}

// =============================================================================
// Point-free forms
// =============================================================================

#[test]
fn test_point_free_forms() {
    assert_eq!(fix_all("a = List.map identity"), "a = identity");
    assert_eq!(fix_all("a = String.repeat 0"), "a = always \"\"");
    assert_eq!(fix_all("a = List.map identity x"), "a = x");
    assert_eq!(fix_all("a = x |> List.map identity"), "a = x");
}
