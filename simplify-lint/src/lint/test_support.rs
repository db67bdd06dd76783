//! Helpers for rule tests: run the whole engine over a fixture and check
//! what comes out.

use simplify_repr::parse_module;

use super::engine::Simplifier;
use super::fix_applicator::apply_fix;
use super::knowledge::ProjectIndex;
use super::rules::Finding;
use crate::config::SimplifyConfig;

pub(crate) fn findings_with(source: &str, config: SimplifyConfig) -> Vec<Finding> {
    let module = parse_module(source).expect("fixture should parse");
    let index = ProjectIndex::from_modules([&module], Vec::new());
    Simplifier::new(config)
        .expect("fixture config should be valid")
        .analyze_module(&module, &index)
}

pub(crate) fn findings(source: &str) -> Vec<Finding> {
    findings_with(source, SimplifyConfig::default())
}

/// Exactly one finding with `message`, whose fix turns `source` into
/// `expected`.
#[track_caller]
pub(crate) fn assert_fixed(source: &str, message: &str, expected: &str) {
    let all = findings(source);
    let matching: Vec<&Finding> = all.iter().filter(|f| f.message == message).collect();
    assert_eq!(
        matching.len(),
        1,
        "expected one finding \"{message}\" for {source:?}, got {all:#?}"
    );
    assert!(matching[0].fix.is_some(), "finding has no fix: {:#?}", matching[0]);
    let fixed = apply_fix(source, matching[0]).expect("fix should apply");
    assert_eq!(fixed, expected, "wrong fix for {source:?}");
}

#[track_caller]
pub(crate) fn assert_no_findings(source: &str) {
    let all = findings(source);
    assert!(all.is_empty(), "expected no findings for {source:?}, got {all:#?}");
}
