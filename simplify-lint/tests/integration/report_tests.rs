//! Shape of what the engine hands back to hosts.

use serde_json::{json, Value};
use simplify_lint::{Edit, Finding, Project, RuleCode, Simplifier, SimplifyConfig};
use simplify_repr::parse_module;

fn single_module_report(source: &str) -> Value {
    let project = Project::new().with_module("src/Main.elm", parse_module(source).unwrap());
    let reports = Simplifier::new(SimplifyConfig::default())
        .unwrap()
        .analyze(&project)
        .unwrap();
    assert_eq!(reports.len(), 1);
    serde_json::to_value(&reports[0]).unwrap()
}

#[test]
fn test_report_json_shape() {
    let report = single_module_report("a = True || x");
    assert_eq!(report["path"], json!("src/Main.elm"));
    assert_eq!(report["module"], json!(["Main"]));

    let finding = &report["findings"][0];
    assert_eq!(finding["rule"], json!("SIM001"));
    assert_eq!(finding["message"], json!("Condition is always True"));
    assert_eq!(
        finding["details"],
        json!(["This condition will always result in True."])
    );
    assert_eq!(
        finding["range"],
        json!({ "start": { "row": 1, "column": 5 }, "end": { "row": 1, "column": 14 } })
    );
    assert_eq!(
        finding["fix"],
        json!([{
            "kind": "remove",
            "range": { "start": { "row": 1, "column": 9 }, "end": { "row": 1, "column": 14 } }
        }])
    );
}

#[test]
fn test_finding_without_fix_serializes_null() {
    let finding = Finding::new(
        RuleCode::SIM013,
        "Unnecessary List.map",
        simplify_repr::Range::from_coords(1, 5, 1, 20),
    );
    let value = serde_json::to_value(&finding).unwrap();
    assert_eq!(value["fix"], Value::Null);
    assert_eq!(value["details"], json!([]));
}

#[test]
fn test_findings_round_trip_through_json() {
    let report = single_module_report("a = List.concat [ b ]\nb = Cmd.batch []\n");
    let findings: Vec<Finding> = serde_json::from_value(report["findings"].clone()).unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[1].rule, RuleCode::SIM019);
    assert!(matches!(
        findings[1].fix.as_deref(),
        Some([Edit::Replace { text, .. }]) if text == "Cmd.none"
    ));
}
