//! Arithmetic, number negation and number comparison.

use simplify_repr::{Expr, ExprKind, Expr_};

use super::boolean::bool_name;
use crate::lint::context::CheckContext;
use crate::lint::normalize::{as_number, is_one, is_zero};
use crate::lint::rules::{Finding, Rule, RuleCode};

// ---------------------------------------------------------------------------
// SIM007: + - * / //
// ---------------------------------------------------------------------------

pub struct ArithmeticRule;

impl ArithmeticRule {
    pub fn new() -> Self {
        Self
    }

    fn keep(&self, expr: &Expr, ctx: &CheckContext<'_>, message: &str, kept: &Expr) -> Finding {
        Finding::new(self.code(), message, expr.range)
            .with_fix(ctx.keep_only(expr.range, kept.strip_parens()))
    }
}

impl Rule for ArithmeticRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM007
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Operator {
            operator,
            left,
            right,
        } = &expr.value
        else {
            return None;
        };
        match operator.as_str() {
            "+" => {
                let kept = if is_zero(right) {
                    left
                } else if is_zero(left) {
                    right
                } else {
                    return None;
                };
                Some(
                    self.keep(expr, ctx, "Unnecessary addition with 0", kept)
                        .with_details(["Adding 0 does not change the value of the number."]),
                )
            }
            "-" => {
                if is_zero(right) {
                    return Some(
                        self.keep(expr, ctx, "Unnecessary subtraction with 0", left)
                            .with_details(["Subtracting 0 does not change the value of the number."]),
                    );
                }
                if !is_zero(left) {
                    return None;
                }
                let negated = format!("-{}", ctx.arg_text(right.strip_parens()));
                Some(
                    Finding::new(self.code(), "Subtracting from 0 is the same as negating", expr.range)
                        .with_details(["You can negate the expression directly."])
                        .with_fix(vec![ctx.replace_by(expr.range, negated, false)]),
                )
            }
            "*" => {
                if is_one(right) || is_one(left) {
                    let kept = if is_one(right) { left } else { right };
                    return Some(
                        self.keep(expr, ctx, "Unnecessary multiplication by 1", kept)
                            .with_details(["Multiplying by 1 does not change the value of the number."]),
                    );
                }
                let zero = if is_zero(right) {
                    right
                } else if is_zero(left) {
                    left
                } else {
                    return None;
                };
                Some(
                    self.keep(expr, ctx, "Multiplying by 0 equals 0", zero)
                        .with_details(["You can replace this value by 0."]),
                )
            }
            "/" | "//" if is_one(right) => Some(
                self.keep(expr, ctx, "Unnecessary division by 1", left)
                    .with_details(["Dividing by 1 does not change the value of the number."]),
            ),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SIM008: -(-n)
// ---------------------------------------------------------------------------

pub struct NegationRule;

impl NegationRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NegationRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM008
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Negation]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Negation(inner) = &expr.value else {
            return None;
        };
        let Expr_::Negation(value) = &inner.strip_parens().value else {
            return None;
        };
        Some(
            Finding::new(self.code(), "Unnecessary double number negation", expr.range)
                .with_details(["Negating a number twice is the same as the number itself."])
                .with_fix(ctx.keep_only(expr.range, value.strip_parens())),
        )
    }
}

// ---------------------------------------------------------------------------
// SIM009: < > <= >= on number literals
// ---------------------------------------------------------------------------

pub struct ComparisonRule;

impl ComparisonRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ComparisonRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM009
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Operator {
            operator,
            left,
            right,
        } = &expr.value
        else {
            return None;
        };
        let compare: fn(f64, f64) -> bool = match operator.as_str() {
            "<" => |a, b| a < b,
            ">" => |a, b| a > b,
            "<=" => |a, b| a <= b,
            ">=" => |a, b| a >= b,
            _ => return None,
        };
        let result = compare(as_number(left)?, as_number(right)?);
        let name = bool_name(result);
        Some(
            Finding::new(self.code(), format!("Comparison is always {name}"), expr.range)
                .with_details([format!(
                    "Both sides are number literals, so this comparison always results in {name}."
                )])
                .with_fix(vec![ctx.replace_by(expr.range, ctx.qualify("Basics", name), true)]),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::test_support::{assert_fixed, assert_no_findings};

    // =========================================================================
    // Arithmetic
    // =========================================================================

    #[test]
    fn test_addition_with_zero() {
        assert_fixed("a = x + 0", "Unnecessary addition with 0", "a = x");
        assert_fixed("a = 0 + x", "Unnecessary addition with 0", "a = x");
        assert_fixed("a = x + 0.0", "Unnecessary addition with 0", "a = x");
        assert_fixed("a = f x + (0)", "Unnecessary addition with 0", "a = f x");
        assert_fixed("a = 2 * (f x + 0)", "Unnecessary addition with 0", "a = 2 * (f x)");
    }

    #[test]
    fn test_subtraction_with_zero() {
        assert_fixed("a = x - 0", "Unnecessary subtraction with 0", "a = x");
        assert_fixed("a = 0 - x", "Subtracting from 0 is the same as negating", "a = -x");
        assert_fixed(
            "a = 0 - f x",
            "Subtracting from 0 is the same as negating",
            "a = -(f x)",
        );
        assert_fixed(
            "a = y * (0.0 - x)",
            "Subtracting from 0 is the same as negating",
            "a = y * (-x)",
        );
    }

    #[test]
    fn test_multiplication() {
        assert_fixed("a = x * 1", "Unnecessary multiplication by 1", "a = x");
        assert_fixed("a = 1.0 * x", "Unnecessary multiplication by 1", "a = x");
        assert_fixed("a = f x * 0", "Multiplying by 0 equals 0", "a = 0");
        assert_fixed("a = 0.0 * x", "Multiplying by 0 equals 0", "a = 0.0");
    }

    #[test]
    fn test_division_by_one() {
        assert_fixed("a = x / 1", "Unnecessary division by 1", "a = x");
        assert_fixed("a = x // 1", "Unnecessary division by 1", "a = x");
        assert_no_findings("a = 1 / x");
    }

    #[test]
    fn test_chained_operator_keeps_neighbours() {
        assert_fixed("a = x + 0 + y", "Unnecessary addition with 0", "a = x + y");
    }

    #[test]
    fn test_plain_arithmetic_is_kept() {
        assert_no_findings("a = x + 1");
        assert_no_findings("a = x - y");
        assert_no_findings("a = x * 2");
    }

    // =========================================================================
    // Negation
    // =========================================================================

    #[test]
    fn test_double_number_negation() {
        assert_fixed("a = -(-n)", "Unnecessary double number negation", "a = n");
        assert_fixed("a = -((-(f x)))", "Unnecessary double number negation", "a = f x");
        assert_no_findings("a = -n");
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    #[test]
    fn test_comparing_number_literals() {
        assert_fixed("a = 1 < 2", "Comparison is always True", "a = True");
        assert_fixed("a = 2 <= 1", "Comparison is always False", "a = False");
        assert_fixed("a = 2.5 >= 2.5", "Comparison is always True", "a = True");
        assert_fixed("a = f (1 > 2)", "Comparison is always False", "a = f (False)");
        assert_no_findings("a = x < 2");
    }
}
