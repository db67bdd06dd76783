//! Rule definitions and finding types.

use std::fmt;

use serde::{Deserialize, Serialize};
use simplify_repr::{Expr, ExprKind, Location, Range};

use super::context::CheckContext;

/// Rule codes, one per rule family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    /// SIM001: `||` / `&&` with a literal boolean operand.
    SIM001,
    /// SIM002: `not` on literals, double negation, `not >> not`.
    SIM002,
    /// SIM003: comparison with booleans, comparing a value with itself.
    SIM003,
    /// SIM004: `if` with a literal condition or redundant branches.
    SIM004,
    /// SIM005: `case` with identical branches or matching on a boolean.
    SIM005,
    /// SIM006: record update setting a field to its own value.
    SIM006,
    /// SIM007: arithmetic with 0 or 1.
    SIM007,
    /// SIM008: double number negation.
    SIM008,
    /// SIM009: comparison of two number literals.
    SIM009,
    /// SIM010: prefix operator applied to two arguments.
    SIM010,
    /// SIM011: lambda immediately applied to an ignored argument.
    SIM011,
    /// SIM012: `identity`, `always` and composition with them.
    SIM012,
    /// SIM013: `List` functions and list concatenation.
    SIM013,
    /// SIM014: `String` functions and string concatenation.
    SIM014,
    /// SIM015: `Maybe` functions.
    SIM015,
    /// SIM016: `Result` functions.
    SIM016,
    /// SIM017: `Set` functions.
    SIM017,
    /// SIM018: `Dict` functions.
    SIM018,
    /// SIM019: `Cmd` functions.
    SIM019,
    /// SIM020: `Sub` functions.
    SIM020,
}

impl RuleCode {
    /// Parse a rule code from string (e.g., "SIM001").
    pub fn parse_code(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// All available rule codes.
    pub fn all() -> &'static [RuleCode] {
        &[
            RuleCode::SIM001,
            RuleCode::SIM002,
            RuleCode::SIM003,
            RuleCode::SIM004,
            RuleCode::SIM005,
            RuleCode::SIM006,
            RuleCode::SIM007,
            RuleCode::SIM008,
            RuleCode::SIM009,
            RuleCode::SIM010,
            RuleCode::SIM011,
            RuleCode::SIM012,
            RuleCode::SIM013,
            RuleCode::SIM014,
            RuleCode::SIM015,
            RuleCode::SIM016,
            RuleCode::SIM017,
            RuleCode::SIM018,
            RuleCode::SIM019,
            RuleCode::SIM020,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::SIM001 => "SIM001",
            RuleCode::SIM002 => "SIM002",
            RuleCode::SIM003 => "SIM003",
            RuleCode::SIM004 => "SIM004",
            RuleCode::SIM005 => "SIM005",
            RuleCode::SIM006 => "SIM006",
            RuleCode::SIM007 => "SIM007",
            RuleCode::SIM008 => "SIM008",
            RuleCode::SIM009 => "SIM009",
            RuleCode::SIM010 => "SIM010",
            RuleCode::SIM011 => "SIM011",
            RuleCode::SIM012 => "SIM012",
            RuleCode::SIM013 => "SIM013",
            RuleCode::SIM014 => "SIM014",
            RuleCode::SIM015 => "SIM015",
            RuleCode::SIM016 => "SIM016",
            RuleCode::SIM017 => "SIM017",
            RuleCode::SIM018 => "SIM018",
            RuleCode::SIM019 => "SIM019",
            RuleCode::SIM020 => "SIM020",
        }
    }

    /// Short name for the rule.
    pub fn name(&self) -> &'static str {
        match self {
            RuleCode::SIM001 => "boolean-operators",
            RuleCode::SIM002 => "not-calls",
            RuleCode::SIM003 => "equality",
            RuleCode::SIM004 => "if-expressions",
            RuleCode::SIM005 => "case-expressions",
            RuleCode::SIM006 => "record-update",
            RuleCode::SIM007 => "arithmetic",
            RuleCode::SIM008 => "number-negation",
            RuleCode::SIM009 => "comparison",
            RuleCode::SIM010 => "prefix-operators",
            RuleCode::SIM011 => "applied-lambda",
            RuleCode::SIM012 => "basics",
            RuleCode::SIM013 => "list",
            RuleCode::SIM014 => "string",
            RuleCode::SIM015 => "maybe",
            RuleCode::SIM016 => "result",
            RuleCode::SIM017 => "set",
            RuleCode::SIM018 => "dict",
            RuleCode::SIM019 => "cmd",
            RuleCode::SIM020 => "sub",
        }
    }

    /// Longer description of what the rule family simplifies.
    pub fn description(&self) -> &'static str {
        match self {
            RuleCode::SIM001 => "Boolean operators with a literal operand. `True || x` is `True`, `x && True` is `x`.",
            RuleCode::SIM002 => "Calls to `not` on literals, `not (not x)`, and `not >> not` in composition chains.",
            RuleCode::SIM003 => "Equality with booleans (`x == True`), with itself (`x == x`), and with negated sides.",
            RuleCode::SIM004 => "If expressions whose condition is a literal, whose branches are equal, or that return the condition.",
            RuleCode::SIM005 => "Case expressions whose branches are all the same, or that match on a boolean.",
            RuleCode::SIM006 => "Record updates that set a field to its current value.",
            RuleCode::SIM007 => "Arithmetic with identity or absorbing elements (`+ 0`, `* 1`, `* 0`, `/ 1`).",
            RuleCode::SIM008 => "Numbers negated twice.",
            RuleCode::SIM009 => "Comparisons between two number literals.",
            RuleCode::SIM010 => "Prefix operators applied to both operands: `(+) a b` is `a + b`.",
            RuleCode::SIM011 => "Lambdas applied directly to an argument they ignore.",
            RuleCode::SIM012 => "Calls to `identity` and `always`, and composition with them.",
            RuleCode::SIM013 => "List functions on empty or literal lists, with identity or constant functions, and list concatenation.",
            RuleCode::SIM014 => "String functions on empty or literal strings, and concatenation with the empty string.",
            RuleCode::SIM015 => "Maybe functions on `Nothing`/`Just` values or with identity functions.",
            RuleCode::SIM016 => "Result functions on `Ok`/`Err` values or with identity functions.",
            RuleCode::SIM017 => "Set functions on `Set.empty` or with identity/constant functions.",
            RuleCode::SIM018 => "Dict functions on `Dict.empty`.",
            RuleCode::SIM019 => "`Cmd.batch` with zero, one, or `Cmd.none` elements, and `Cmd.map` on identity or `Cmd.none`.",
            RuleCode::SIM020 => "`Sub.batch` with zero, one, or `Sub.none` elements, and `Sub.map` on identity or `Sub.none`.",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single text edit against the module source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    Replace { range: Range, text: String },
    Remove { range: Range },
    Insert { position: Location, text: String },
}

impl Edit {
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        Self::Replace {
            range,
            text: text.into(),
        }
    }

    pub fn remove(range: Range) -> Self {
        Self::Remove { range }
    }

    pub fn insert(position: Location, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    /// Source range the edit touches (zero-width for inserts).
    pub fn range(&self) -> Range {
        match self {
            Self::Replace { range, .. } | Self::Remove { range } => *range,
            Self::Insert { position, .. } => Range::point(*position),
        }
    }

    /// Text written in place of [`Edit::range`].
    pub fn text(&self) -> &str {
        match self {
            Self::Replace { text, .. } | Self::Insert { text, .. } => text,
            Self::Remove { .. } => "",
        }
    }
}

/// A simplification opportunity found in a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The rule family that produced this finding.
    pub rule: RuleCode,
    /// Human-readable summary.
    pub message: String,
    /// Explanatory paragraphs.
    pub details: Vec<String>,
    /// Primary location in the module.
    pub range: Range,
    /// Edits that apply the simplification, if one is offered.
    pub fix: Option<Vec<Edit>>,
}

impl Finding {
    pub fn new(rule: RuleCode, message: impl Into<String>, range: Range) -> Self {
        Self {
            rule,
            message: message.into(),
            details: Vec::new(),
            range,
            fix: None,
        }
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fix(mut self, edits: Vec<Edit>) -> Self {
        self.fix = Some(edits);
        self
    }

    /// Ranges touched by the fix, empty without one.
    pub fn edit_ranges(&self) -> Vec<Range> {
        self.fix
            .iter()
            .flatten()
            .map(Edit::range)
            .collect()
    }
}

/// A rule family.
///
/// The engine asks a rule about a node only when the node's [`ExprKind`] is
/// listed in [`Rule::kinds`]; a rule returns at most one finding per node.
pub trait Rule: Send + Sync {
    /// The rule code.
    fn code(&self) -> RuleCode;

    /// Expression shapes this rule inspects.
    fn kinds(&self) -> &'static [ExprKind];

    /// Check a single node.
    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_case_insensitive() {
        assert_eq!(RuleCode::parse_code("SIM001"), Some(RuleCode::SIM001));
        assert_eq!(RuleCode::parse_code("sim020"), Some(RuleCode::SIM020));
        assert_eq!(RuleCode::parse_code("SIM021"), None);
        assert_eq!(RuleCode::parse_code("FST001"), None);
    }

    #[test]
    fn test_all_codes_round_trip_through_display() {
        for code in RuleCode::all() {
            assert_eq!(RuleCode::parse_code(&code.to_string()), Some(*code));
            assert!(!code.name().is_empty());
            assert!(!code.description().is_empty());
        }
        assert_eq!(RuleCode::all().len(), 20);
    }

    #[test]
    fn test_edit_range_and_text() {
        let insert = Edit::insert(Location::new(1, 4), "(");
        assert_eq!(insert.range(), Range::point(Location::new(1, 4)));
        assert_eq!(insert.text(), "(");
        assert_eq!(Edit::remove(Range::from_coords(1, 1, 1, 3)).text(), "");
    }

    #[test]
    fn test_finding_serialization_shape() {
        let finding = Finding::new(RuleCode::SIM001, "Condition is always True", Range::from_coords(1, 5, 1, 14))
            .with_details(["detail"])
            .with_fix(vec![Edit::remove(Range::from_coords(1, 9, 1, 14))]);
        let json: serde_json::Value = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["rule"], "SIM001");
        assert_eq!(json["details"][0], "detail");
        assert_eq!(json["fix"][0]["kind"], "remove");
        assert_eq!(json["fix"][0]["range"]["start"]["column"], 9);
    }
}
