//! Applies fix edits to module source text.
//!
//! Edits are sorted by range, checked for overlap, then applied back to
//! front so earlier offsets stay valid.

use tracing::{trace, warn};

use super::rules::{Edit, Finding};
use super::source::SourceText;
use crate::error::FixError;

/// Apply a set of edits to `original`.
///
/// Two edits conflict when their ranges share a character, or when two
/// insertions target the same position (their relative order would be
/// ambiguous). Conflicting sets are rejected as a whole.
pub fn apply_edits(original: &str, edits: &[Edit]) -> Result<String, FixError> {
    if edits.is_empty() {
        return Ok(original.to_string());
    }

    let source = SourceText::new(original);
    let mut resolved = Vec::with_capacity(edits.len());
    for edit in edits {
        let range = edit.range();
        if range.end < range.start {
            return Err(FixError::InvertedRange { range });
        }
        let start = source
            .offset(range.start)
            .ok_or(FixError::OutOfBounds { location: range.start })?;
        let end = source
            .offset(range.end)
            .ok_or(FixError::OutOfBounds { location: range.end })?;
        resolved.push((start, end, edit));
    }

    resolved.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    for window in resolved.windows(2) {
        let (first_start, first_end, first) = window[0];
        let (second_start, second_end, second) = window[1];
        let same_insertion_point =
            first_start == first_end && second_start == second_end && first_start == second_start;
        if first_end > second_start || same_insertion_point {
            warn!(
                "Overlapping edit ranges {} and {}; rejecting the fix",
                first.range(),
                second.range()
            );
            return Err(FixError::Overlap {
                first: first.range(),
                second: second.range(),
            });
        }
    }

    let mut content = original.to_string();
    for (start, end, edit) in resolved.iter().rev() {
        trace!("Applying edit at {}: {:?}", edit.range(), edit.text());
        content.replace_range(*start..*end, edit.text());
    }
    Ok(content)
}

/// Apply the fix of a single finding. Findings without a fix leave the
/// source unchanged.
pub fn apply_fix(original: &str, finding: &Finding) -> Result<String, FixError> {
    match &finding.fix {
        Some(edits) => apply_edits(original, edits),
        None => Ok(original.to_string()),
    }
}

/// Apply the fixes of all findings at once.
pub fn apply_all_fixes(original: &str, findings: &[Finding]) -> Result<String, FixError> {
    let edits: Vec<Edit> = findings
        .iter()
        .filter_map(|f| f.fix.as_ref())
        .flatten()
        .cloned()
        .collect();
    apply_edits(original, &edits)
}
