//! Final checks on findings before they leave the engine.

use simplify_repr::Range;
use tracing::error;

use super::rules::Finding;

/// First pair of edit ranges in `finding` that conflict, if any.
pub fn conflicting_edits(finding: &Finding) -> Option<(Range, Range)> {
    let mut ranges = finding.edit_ranges();
    ranges.sort_by_key(|r| (r.start, r.end));
    ranges.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        let same_insertion_point = a.is_empty() && b.is_empty() && a.start == b.start;
        (a.end > b.start || same_insertion_point).then_some((a, b))
    })
}

/// Pass a finding through, dropping its fix when the edits conflict.
pub fn emit(mut finding: Finding) -> Finding {
    if let Some((first, second)) = conflicting_edits(&finding) {
        error!(
            "{} produced overlapping edits {} and {} for \"{}\"; dropping the fix",
            finding.rule, first, second, finding.message
        );
        debug_assert!(
            false,
            "{} produced overlapping edits {} and {}",
            finding.rule, first, second
        );
        finding.fix = None;
    }
    finding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::{Edit, RuleCode};
    use simplify_repr::Location;

    fn r(a: u32, b: u32, c: u32, d: u32) -> Range {
        Range::from_coords(a, b, c, d)
    }

    #[test]
    fn test_disjoint_edits_pass_through() {
        let finding = Finding::new(RuleCode::SIM002, "Unnecessary double negation", r(1, 5, 1, 16))
            .with_fix(vec![Edit::remove(r(1, 15, 1, 16)), Edit::remove(r(1, 5, 1, 14))]);
        let emitted = emit(finding.clone());
        assert_eq!(emitted, finding);
    }

    #[test]
    fn test_overlapping_edits_are_detected() {
        let finding = Finding::new(RuleCode::SIM001, "msg", r(1, 1, 1, 10))
            .with_fix(vec![Edit::remove(r(1, 1, 1, 5)), Edit::replace(r(1, 4, 1, 8), "x")]);
        assert_eq!(
            conflicting_edits(&finding),
            Some((r(1, 1, 1, 5), r(1, 4, 1, 8)))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "produced overlapping edits")]
    fn test_overlapping_edits_panic_in_debug_builds() {
        let finding = Finding::new(RuleCode::SIM001, "msg", r(1, 1, 1, 10))
            .with_fix(vec![Edit::remove(r(1, 1, 1, 5)), Edit::replace(r(1, 4, 1, 8), "x")]);
        emit(finding);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_overlapping_edits_drop_fix_in_release_builds() {
        let finding = Finding::new(RuleCode::SIM001, "msg", r(1, 1, 1, 10))
            .with_fix(vec![Edit::remove(r(1, 1, 1, 5)), Edit::replace(r(1, 4, 1, 8), "x")]);
        let emitted = emit(finding);
        assert!(emitted.fix.is_none());
        assert_eq!(emitted.message, "msg");
    }

    #[test]
    fn test_two_inserts_at_one_point_conflict() {
        let at = Location::new(1, 3);
        let finding = Finding::new(RuleCode::SIM001, "msg", r(1, 1, 1, 10))
            .with_fix(vec![Edit::insert(at, "("), Edit::insert(at, ")")]);
        assert!(conflicting_edits(&finding).is_some());
    }

    #[test]
    fn test_finding_without_fix() {
        let finding = Finding::new(RuleCode::SIM005, "msg", r(1, 1, 1, 10));
        assert!(conflicting_edits(&finding).is_none());
        assert_eq!(emit(finding.clone()), finding);
    }
}
