//! Boolean algebra: `||`, `&&`, `not`, `==` and `/=`.

use simplify_repr::{Expr, ExprKind, Expr_, Literal, Range};

use crate::lint::context::CheckContext;
use crate::lint::normalize::{are_equal, as_bool, as_number, call_to, literal, CallForm, CallInfo, CompositionChain};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

pub(crate) fn bool_name(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn operator_parts(expr: &Expr) -> Option<(&str, &Expr, &Expr)> {
    match &expr.value {
        Expr_::Operator {
            operator,
            left,
            right,
        } => Some((operator.as_str(), left, right)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// SIM001: || and &&
// ---------------------------------------------------------------------------

pub struct BooleanOperatorRule;

impl BooleanOperatorRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BooleanOperatorRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM001
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let (operator, left, right) = operator_parts(expr)?;
        // The value that decides the result on its own: True for ||, False for &&.
        let absorbing = match operator {
            "||" => true,
            "&&" => false,
            _ => return None,
        };

        let (literal_side, other_side, value) = match (as_bool(ctx, left), as_bool(ctx, right)) {
            (Some(value), _) => (left, right, value),
            (None, Some(value)) => (right, left, value),
            (None, None) => {
                if are_equal(ctx, left, right) {
                    return Some(
                        Finding::new(self.code(), "Part of the expression is unnecessary", right.range)
                            .with_details(["Both sides of the operator are the same, so the expression is equal to either side."])
                            .with_fix(ctx.keep_only(expr.range, left.strip_parens())),
                    );
                }
                return None;
            }
        };

        if value == absorbing {
            Some(
                Finding::new(
                    self.code(),
                    format!("Condition is always {}", bool_name(absorbing)),
                    expr.range,
                )
                .with_details([format!(
                    "This condition will always result in {}.",
                    bool_name(absorbing)
                )])
                .with_fix(ctx.keep_only(expr.range, literal_side.strip_parens())),
            )
        } else {
            Some(
                Finding::new(self.code(), "Part of the expression is unnecessary", literal_side.range)
                    .with_details([format!(
                        "`{}` does not change the result of the expression.",
                        bool_name(value)
                    )])
                    .with_fix(ctx.keep_only(expr.range, other_side.strip_parens())),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// SIM002: not
// ---------------------------------------------------------------------------

pub struct NotRule;

impl NotRule {
    pub fn new() -> Self {
        Self
    }

    fn check_chain(&self, chain: &CompositionChain<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
        let is_not = |e: &Expr| ctx.is_reference(e, "Basics", "not");
        let index = chain
            .terms
            .windows(2)
            .position(|pair| is_not(pair[0]) && is_not(pair[1]))?;
        let range = chain.terms[index].range.merge(chain.terms[index + 1].range);
        let identity = ctx.qualify("Basics", "identity");
        Some(
            Finding::new(self.code(), "Unnecessary double negation", range)
                .with_details(["Composing `not` with `not` cancels out both calls."])
                .with_fix(chain.remove_terms(index, index + 1, &identity)),
        )
    }
}

impl Rule for NotRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM002
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Application, ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        if let Some(chain) = CompositionChain::flatten(expr) {
            return self.check_chain(&chain, ctx);
        }

        let call = CallInfo::from_node(ctx, expr)?;
        if !call.is("Basics", "not") || call.args.len() != 1 {
            return None;
        }
        let argument = call.args[0];

        if let Some(value) = as_bool(ctx, argument) {
            let result = bool_name(!value);
            return Some(
                Finding::new(self.code(), format!("Expression is equal to {result}"), call.range)
                    .with_details(["You can replace the call to `not` by the boolean value directly."])
                    .with_fix(vec![ctx.replace_by(call.range, ctx.qualify("Basics", result), true)]),
            );
        }

        let inner = call_to(ctx, argument, "Basics", "not").filter(|args| args.len() == 1)?;
        Some(
            Finding::new(self.code(), "Unnecessary double negation", call.fn_range)
                .with_details(["Calling `not` twice cancels out both calls."])
                .with_fix(ctx.keep_only(call.range, inner[0].strip_parens())),
        )
    }
}

// ---------------------------------------------------------------------------
// SIM003: == and /=
// ---------------------------------------------------------------------------

pub struct EqualityRule;

impl EqualityRule {
    pub fn new() -> Self {
        Self
    }
}

/// Do two literals denote equal values? `None` when they are not
/// comparable literals.
fn literals_equal(left: &Expr, right: &Expr) -> Option<bool> {
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return Some(a == b);
    }
    match (literal(left)?, literal(right)?) {
        (Literal::String(a), Literal::String(b)) => Some(a == b),
        (Literal::Char(a), Literal::Char(b)) => Some(a == b),
        _ => None,
    }
}

/// A direct `not x` call with its argument.
fn negated<'e>(ctx: &CheckContext<'_>, expr: &'e Expr) -> Option<(Range, &'e Expr)> {
    let call = CallInfo::from_node(ctx, expr)?;
    (call.is("Basics", "not") && call.args.len() == 1 && call.form == CallForm::Direct)
        .then(|| (call.fn_range, call.args[0]))
}

impl Rule for EqualityRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM003
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let (operator, left, right) = operator_parts(expr)?;
        let is_equal = match operator {
            "==" => true,
            "/=" => false,
            _ => return None,
        };

        // `x == True`, `True == x`, `x /= False`, `False /= x`. The opposite
        // forms would need a `not` and are left alone.
        let kept = match (as_bool(ctx, left), as_bool(ctx, right)) {
            (_, Some(value)) if value == is_equal => Some(left),
            (Some(value), _) if value == is_equal => Some(right),
            _ => None,
        };
        if let Some(kept) = kept {
            return Some(
                Finding::new(self.code(), "Unnecessary comparison with boolean", expr.range)
                    .with_details(["The result of the expression will be the same with or without the comparison."])
                    .with_fix(ctx.keep_only(expr.range, kept.strip_parens())),
            );
        }

        let known = if are_equal(ctx, left, right) {
            Some(is_equal)
        } else {
            literals_equal(left, right).map(|equal| equal == is_equal)
        };
        if let Some(result) = known {
            let name = bool_name(result);
            return Some(
                Finding::new(self.code(), format!("Condition is always {name}"), expr.range)
                    .with_details([format!(
                        "Based on the values and/or the context, we can determine that the value of this condition will always be {name}."
                    )])
                    .with_fix(vec![ctx.replace_by(expr.range, ctx.qualify("Basics", name), true)]),
            );
        }

        let (left_not, left_arg) = negated(ctx, left)?;
        let (right_not, right_arg) = negated(ctx, right)?;
        Some(
            Finding::new(self.code(), "Unnecessary negation on both sides", expr.range)
                .with_details(["Since both sides are negated using `not`, they are redundant and can be removed."])
                .with_fix(vec![
                    Edit::remove(Range::new(left_not.start, left_arg.range.start)),
                    Edit::remove(Range::new(right_not.start, right_arg.range.start)),
                ]),
        )
    }
}
