//! Record updates.

use simplify_repr::{Expr, ExprKind, Expr_, RecordSetter};

use crate::lint::context::{remove_items, CheckContext};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

/// SIM006: `{ r | a = r.a }`.
pub struct RecordUpdateRule;

impl RecordUpdateRule {
    pub fn new() -> Self {
        Self
    }
}

/// Does the setter assign `base.field` back to `field`?
fn is_self_assignment(base: &str, setter: &RecordSetter) -> bool {
    let Expr_::RecordAccess { record, field } = &setter.value.strip_parens().value else {
        return false;
    };
    let Expr_::Variable(name) = &record.strip_parens().value else {
        return false;
    };
    !name.is_qualified() && name.name == base && field.value == setter.field.value
}

impl Rule for RecordUpdateRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM006
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::RecordUpdate]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::RecordUpdate { base, setters } = &expr.value else {
            return None;
        };
        let redundant: Vec<bool> = setters
            .iter()
            .map(|s| is_self_assignment(&base.value, s))
            .collect();
        let first = redundant.iter().position(|&r| r)?;

        let fix = if redundant.iter().all(|&r| r) {
            vec![Edit::replace(expr.range, base.value.clone())]
        } else {
            let ranges: Vec<_> = setters.iter().map(RecordSetter::range).collect();
            remove_items(&ranges, &redundant)
        };
        Some(
            Finding::new(self.code(), "Unnecessary field assignment", setters[first].range())
                .with_details(["The field is being set to its own value."])
                .with_fix(fix),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::test_support::{assert_fixed, assert_no_findings};

    #[test]
    fn test_only_setter_is_redundant() {
        assert_fixed("a = { r | b = r.b }", "Unnecessary field assignment", "a = r");
        assert_fixed("a = f { r | b = (r.b) }", "Unnecessary field assignment", "a = f r");
    }

    #[test]
    fn test_redundant_setter_among_others() {
        assert_fixed(
            "a = { r | b = r.b, c = 1 }",
            "Unnecessary field assignment",
            "a = { r | c = 1 }",
        );
        assert_fixed(
            "a = { r | c = 1, b = r.b }",
            "Unnecessary field assignment",
            "a = { r | c = 1 }",
        );
        assert_fixed(
            "a =\n    { r\n        | c = 1\n        , b = r.b\n        , d = 2\n    }\n",
            "Unnecessary field assignment",
            "a =\n    { r\n        | c = 1\n        , d = 2\n    }\n",
        );
    }

    #[test]
    fn test_several_redundant_setters_share_one_finding() {
        assert_fixed(
            "a = { r | b = r.b, c = 1, d = r.d }",
            "Unnecessary field assignment",
            "a = { r | c = 1 }",
        );
    }

    #[test]
    fn test_other_records_and_fields_are_kept() {
        assert_no_findings("a = { r | b = r.c }");
        assert_no_findings("a = { r | b = s.b }");
        assert_no_findings("a = { r | b = r.b.c }");
    }
}
