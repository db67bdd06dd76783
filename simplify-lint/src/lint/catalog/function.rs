//! Function-level simplifications: prefix operators, lambdas applied to
//! ignored arguments, `identity` and `always`.

use simplify_repr::{Expr, ExprKind, Expr_, Location, Pattern_, Range};

use crate::lint::context::CheckContext;
use crate::lint::normalize::{is_identity, CallForm, CallInfo, CompositionChain};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

// ---------------------------------------------------------------------------
// SIM010: (+) a b
// ---------------------------------------------------------------------------

pub struct PrefixOperatorRule;

impl PrefixOperatorRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PrefixOperatorRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM010
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Application]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Application(items) = &expr.value else {
            return None;
        };
        let [operator, left, right] = items.as_slice() else {
            return None;
        };
        let Expr_::PrefixOperator(op) = &operator.value else {
            return None;
        };

        let head = Range::new(operator.range.start, left.range.start);
        let mut edits = Vec::with_capacity(3);
        if ctx.is_free() {
            edits.push(Edit::remove(head));
        } else {
            edits.push(Edit::replace(head, "("));
        }
        edits.push(Edit::replace(
            Range::new(left.range.end, right.range.start),
            format!(" {op} "),
        ));
        if !ctx.is_free() {
            edits.push(Edit::insert(right.range.end, ")"));
        }
        Some(
            Finding::new(
                self.code(),
                format!("Use the infix form (a {op} b) over the prefix form (({op}) a b)"),
                operator.range,
            )
            .with_details(["The prefix form is generally more unfamiliar to Elm developers, and therefore it is nicer when the infix form is used."])
            .with_fix(edits),
        )
    }
}

// ---------------------------------------------------------------------------
// SIM011: (\_ -> x) a
// ---------------------------------------------------------------------------

pub struct AppliedLambdaRule;

impl AppliedLambdaRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AppliedLambdaRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM011
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Application]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Application(items) = &expr.value else {
            return None;
        };
        let (head, args) = items.split_first()?;
        let lambda = head.strip_parens();
        let Expr_::Lambda { parameters, body } = &lambda.value else {
            return None;
        };
        let (param, argument) = (parameters.first()?, args.first()?);

        let message = match (param.value.strip_parens(), &argument.strip_parens().value) {
            (Pattern_::Unit, Expr_::Unit) => "Unnecessary unit argument",
            (Pattern_::Wild, _) => "Unnecessary wildcard argument",
            _ => return None,
        };
        let drop_argument = Edit::remove(Range::new(head.range.end, argument.range.end));
        let fix = match (parameters.len(), args.len()) {
            (1, 1) => ctx.keep_only(expr.range, body.strip_parens()),
            (1, _) => vec![
                Edit::remove(Range::new(lambda.range.start, body.range.start)),
                drop_argument,
            ],
            _ => vec![
                Edit::remove(Range::new(param.range.start, parameters[1].range.start)),
                drop_argument,
            ],
        };
        Some(
            Finding::new(self.code(), message, param.range)
                .with_details(["This function is expecting an argument it ignores, and is immediately given one. You can remove both."])
                .with_fix(fix),
        )
    }
}

// ---------------------------------------------------------------------------
// SIM012: identity, always
// ---------------------------------------------------------------------------

pub struct BasicsRule;

impl BasicsRule {
    pub fn new() -> Self {
        Self
    }

    fn check_chain(&self, chain: &CompositionChain<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
        if let Some(index) = chain.terms.iter().position(|t| is_identity(ctx, t)) {
            let identity = ctx.qualify("Basics", "identity");
            return Some(
                Finding::new(self.code(), "`identity` should be removed", chain.terms[index].range)
                    .with_details(["Composing a function with `identity` is the same as simply referencing the function."])
                    .with_fix(chain.remove_terms(index, index, &identity)),
            );
        }

        let order = chain.application_order();
        let last = *order.last()?;
        let is_always_call = matches!(
            &last.strip_parens().value,
            Expr_::Application(items) if items.len() == 2 && ctx.is_reference(&items[0], "Basics", "always")
        );
        if !is_always_call {
            return None;
        }
        Some(
            Finding::new(self.code(), "Function composed with always will be ignored", last.range)
                .with_details(["`always` will swallow the function composed into it."])
                .with_fix(ctx.keep_only(chain.range, last.strip_parens())),
        )
    }

    fn check_identity(&self, call: &CallInfo<'_>, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let first = call.arg(0)?;
        let fix = if call.args.len() == 1 {
            ctx.keep_only(call.range, first.strip_parens())
        } else {
            vec![Edit::remove(Range::new(head_start(call, expr), first.range.start))]
        };
        Some(
            Finding::new(self.code(), "`identity` should be removed", call.fn_range)
                .with_details(["`identity` can be a useful function to be passed as arguments to other functions, but calling it manually with an argument is the same thing as writing the argument on its own."])
                .with_fix(fix),
        )
    }

    fn check_always(&self, call: &CallInfo<'_>, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let (first, second) = (call.arg(0)?, call.arg(1)?);
        let fix = if call.args.len() == 2 {
            ctx.keep_only(call.range, first.strip_parens())
        } else {
            vec![
                Edit::remove(Range::new(head_start(call, expr), first.range.start)),
                Edit::remove(Range::new(first.range.end, second.range.end)),
            ]
        };
        Some(
            Finding::new(
                self.code(),
                "Expression can be replaced by the first argument given to `always`",
                call.fn_range,
            )
            .with_details(["The second argument will be ignored because of the `always` call."])
            .with_fix(fix),
        )
    }
}

/// Where the function part of a direct call starts, parentheses included.
fn head_start(call: &CallInfo<'_>, expr: &Expr) -> Location {
    match &expr.value {
        Expr_::Application(items) if call.form == CallForm::Direct => {
            items.first().map_or(call.fn_range.start, |head| head.range.start)
        }
        _ => call.fn_range.start,
    }
}

impl Rule for BasicsRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM012
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Application, ExprKind::Operator]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        if let Some(chain) = CompositionChain::flatten(expr) {
            return self.check_chain(&chain, ctx);
        }
        let call = CallInfo::from_node(ctx, expr)?;
        if call.is("Basics", "identity") {
            self.check_identity(&call, expr, ctx)
        } else if call.is("Basics", "always") {
            self.check_always(&call, expr, ctx)
        } else {
            None
        }
    }
}
