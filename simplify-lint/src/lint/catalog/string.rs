//! `String` functions and `++` with an empty string.

use simplify_repr::{Expr, ExprKind, Expr_, Range};

use super::{call_text, CallFamily, CALL_KINDS};
use crate::lint::context::CheckContext;
use crate::lint::normalize::{as_int, call_to, is_empty_list, list_literal, string_literal, CallInfo};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

/// SIM014.
pub struct StringRule {
    family: CallFamily,
}

impl StringRule {
    pub fn new() -> Self {
        Self {
            family: CallFamily::new(
                RuleCode::SIM014,
                "String",
                &[
                    ("isEmpty", is_empty),
                    ("concat", concat),
                    ("join", join),
                    ("length", length),
                    ("repeat", repeat),
                    ("words", split_empty),
                    ("lines", split_empty),
                    ("reverse", reverse),
                    ("fromList", from_list),
                    ("append", append),
                ],
            ),
        }
    }
}

impl Rule for StringRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM014
    }

    fn kinds(&self) -> &'static [ExprKind] {
        CALL_KINDS
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        if let Expr_::Operator {
            operator,
            left,
            right,
        } = &expr.value
        {
            if operator == "++" {
                return check_append_operator(expr, left, right, ctx);
            }
        }
        let call = CallInfo::from_node(ctx, expr)?;
        self.family.check_call(&call, ctx)
    }
}

fn is_empty_string(expr: &Expr) -> bool {
    string_literal(expr).is_some_and(str::is_empty)
}

fn on_empty_string(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    index: usize,
    result: &str,
) -> Option<Finding> {
    if !is_empty_string(call.arg(index)?) {
        return None;
    }
    Some(family.replace_call(
        call,
        ctx,
        format!(
            "Using {} on an empty string will result in {result}",
            family.display_name(call)
        ),
        result,
        true,
    ))
}

fn is_empty(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let value = string_literal(call.arg(0)?)?;
    let result = ctx.qualify("Basics", if value.is_empty() { "True" } else { "False" });
    Some(family.replace_call(
        call,
        ctx,
        format!("The call to String.isEmpty will result in {result}"),
        result.clone(),
        true,
    ))
}

fn concat(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if !is_empty_list(call.arg(0)?) {
        return None;
    }
    Some(family.replace_call(
        call,
        ctx,
        "Using String.concat on an empty list will result in \"\"",
        "\"\"",
        true,
    ))
}

fn join(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let separator = call.arg(0)?;
    if call.arg(1).is_some_and(is_empty_list) {
        return Some(family.replace_call(
            call,
            ctx,
            "Using String.join on an empty list will result in \"\"",
            "\"\"",
            true,
        ));
    }
    if !is_empty_string(separator) || !call.arg_is_adjacent(0) {
        return None;
    }
    Some(
        family
            .finding("Use String.concat instead", call.fn_range)
            .with_details(["Using String.join with \"\" is the same as using String.concat."])
            .with_fix(vec![Edit::replace(
                Range::new(call.fn_range.start, separator.range.end),
                family.qualified(ctx, "concat"),
            )]),
    )
}

fn length(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let count = string_literal(call.arg(0)?)?.chars().count();
    Some(family.replace_call(
        call,
        ctx,
        format!("The length of the string is {count}"),
        count.to_string(),
        true,
    ))
}

fn repeat(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let times = call.arg(0)?;
    match as_int(times) {
        Some(n) if n <= 0 => {
            let message = "String.repeat will result in an empty string";
            return Some(family.value_or_always(call, ctx, message, 1, "\"\"", true));
        }
        Some(1) => {
            let message = "String.repeat 1 won't do anything";
            return Some(family.keep_arg_or_identity(call, ctx, message, 1));
        }
        _ => {}
    }
    on_empty_string(family, call, ctx, 1, "\"\"")
}

/// `String.words ""` and `String.lines ""`.
fn split_empty(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    on_empty_string(family, call, ctx, 0, "[]")
}

fn reverse(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let argument = call.arg(0)?;
    if let Some(finding) = on_empty_string(family, call, ctx, 0, "\"\"") {
        return Some(finding);
    }
    let inner = call_to(ctx, argument, "String", "reverse").filter(|args| args.len() == 1)?;
    Some(family.keep_arg(call, ctx, "Unnecessary double reversal", inner[0]))
}

fn from_list(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    match list_literal(call.arg(0)?)? {
        [] => Some(family.replace_call(
            call,
            ctx,
            "Calling String.fromList [] will result in \"\"",
            "\"\"",
            true,
        )),
        [only] => {
            let from_char = family.qualified(ctx, "fromChar");
            Some(family.replace_call(
                call,
                ctx,
                "Calling String.fromList with a single character is the same as String.fromChar",
                call_text(ctx, &from_char, &[only]),
                false,
            ))
        }
        _ => None,
    }
}

fn append(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (first, second) = (call.arg(0)?, call.arg(1)?);
    let kept = if is_empty_string(first) {
        second
    } else if is_empty_string(second) {
        first
    } else {
        return None;
    };
    Some(family.keep_arg(call, ctx, "Appending \"\" doesn't have any effect", kept))
}

fn check_append_operator(
    expr: &Expr,
    left: &Expr,
    right: &Expr,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    let kept = if is_empty_string(left) {
        right
    } else if is_empty_string(right) {
        left
    } else {
        return None;
    };
    Some(
        Finding::new(
            RuleCode::SIM014,
            "Concatenating with \"\" doesn't have any effect",
            expr.range,
        )
        .with_details(["You should remove the concatenation with the empty string."])
        .with_fix(ctx.keep_only(expr.range, kept.strip_parens())),
    )
}
