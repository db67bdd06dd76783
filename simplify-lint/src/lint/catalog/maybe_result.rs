//! `Maybe` and `Result` functions applied to values whose constructor is
//! known at the call site.

use simplify_repr::{Expr, Expr_};

use super::CallFamily;
use crate::lint::context::CheckContext;
use crate::lint::normalize::{call_to, is_identity, CallInfo};
use crate::lint::rules::{Finding, RuleCode};

/// SIM015.
pub fn maybe_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM015,
        "Maybe",
        &[
            ("map", maybe_map),
            ("andThen", maybe_and_then),
            ("withDefault", maybe_with_default),
        ],
    )
}

/// SIM016.
pub fn result_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM016,
        "Result",
        &[
            ("map", result_map),
            ("mapError", result_map_error),
            ("andThen", result_and_then),
            ("withDefault", result_with_default),
            ("toMaybe", result_to_maybe),
        ],
    )
}

/// The two constructors of a `Maybe`-like type, from the point of view of
/// one function: `kept` values are transformed, `passed` values flow through.
#[derive(Clone, Copy)]
struct Shape {
    kept: &'static str,
    passed: &'static str,
}

const MAYBE: Shape = Shape {
    kept: "Just",
    passed: "Nothing",
};
const RESULT: Shape = Shape {
    kept: "Ok",
    passed: "Err",
};
const RESULT_ERROR: Shape = Shape {
    kept: "Err",
    passed: "Ok",
};

/// The payload of `Ctor x` (or `x |> Ctor`).
fn constructor_arg<'e>(
    ctx: &CheckContext<'_>,
    expr: &'e Expr,
    module: &str,
    constructor: &str,
) -> Option<&'e Expr> {
    call_to(ctx, expr, module, constructor)
        .filter(|args| args.len() == 1)
        .map(|args| args[0])
}

/// Is `expr` built with `constructor`, applied or not?
fn is_constructed(ctx: &CheckContext<'_>, expr: &Expr, module: &str, constructor: &str) -> bool {
    ctx.is_reference(expr, module, constructor)
        || constructor_arg(ctx, expr, module, constructor).is_some()
}

/// `function payload`, extending `function` in place when it is already an
/// application.
fn applied_text(ctx: &CheckContext<'_>, function: &Expr, payload: &Expr) -> String {
    let function = function.strip_parens();
    let head = match &function.value {
        Expr_::Application(_) => ctx.text(function.range).to_string(),
        _ => ctx.arg_text(function),
    };
    format!("{head} {}", ctx.arg_text(payload.strip_parens()))
}

// ---------------------------------------------------------------------------
// Shared evaluators
// ---------------------------------------------------------------------------

/// `map`-like functions: `map identity`, `map f (Passed ..)`, `map f (Kept x)`.
fn map_like(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    shape: Shape,
) -> Option<Finding> {
    let name = family.display_name(call);
    let function = call.arg(0)?;
    if is_identity(ctx, function) {
        let message = format!("Using {name} with an identity function is the same as not using {name}");
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    let value = call.arg(1)?;
    if is_constructed(ctx, value, family.module(), shape.passed) {
        return Some(family.keep_arg(
            call,
            ctx,
            format!("Using {name} on {} will result in {}", shape.passed, shape.passed),
            value,
        ));
    }
    let payload = constructor_arg(ctx, value, family.module(), shape.kept)?;
    let text = format!(
        "{} ({})",
        family.qualified(ctx, shape.kept),
        applied_text(ctx, function, payload)
    );
    Some(family.replace_call(
        call,
        ctx,
        format!(
            "Calling {name} on a value that is known to be {}",
            shape.kept
        ),
        text,
        false,
    ))
}

/// `andThen Kept x`, `andThen f (Passed ..)`, `andThen f (Kept x)`.
fn and_then_like(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    shape: Shape,
) -> Option<Finding> {
    let name = family.display_name(call);
    let function = call.arg(0)?;
    if ctx.is_reference(function, family.module(), shape.kept) {
        let message = format!(
            "Using {name} with a function that will always return {} is the same as not using {name}",
            shape.kept
        );
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    let value = call.arg(1)?;
    if is_constructed(ctx, value, family.module(), shape.passed) {
        return Some(family.keep_arg(
            call,
            ctx,
            format!("Using {name} on {} will result in {}", shape.passed, shape.passed),
            value,
        ));
    }
    let payload = constructor_arg(ctx, value, family.module(), shape.kept)?;
    let text = applied_text(ctx, function, payload);
    Some(family.replace_call(
        call,
        ctx,
        format!(
            "Calling {name} on a value that is known to be {}",
            shape.kept
        ),
        text,
        false,
    ))
}

/// `withDefault d (Kept x)` is `x`, `withDefault d (Passed ..)` is `d`.
fn with_default_like(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    shape: Shape,
) -> Option<Finding> {
    let name = family.display_name(call);
    let (default, value) = (call.arg(0)?, call.arg(1)?);
    if let Some(payload) = constructor_arg(ctx, value, family.module(), shape.kept) {
        return Some(family.keep_arg(
            call,
            ctx,
            format!(
                "Using {name} on a value that is {} will result in that value",
                shape.kept
            ),
            payload,
        ));
    }
    if !is_constructed(ctx, value, family.module(), shape.passed) {
        return None;
    }
    Some(family.keep_arg(
        call,
        ctx,
        format!(
            "Using {name} on {} will result in the default value",
            shape.passed
        ),
        default,
    ))
}

// ---------------------------------------------------------------------------
// Maybe
// ---------------------------------------------------------------------------

fn maybe_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    map_like(family, call, ctx, MAYBE)
}

fn maybe_and_then(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    and_then_like(family, call, ctx, MAYBE)
}

fn maybe_with_default(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    with_default_like(family, call, ctx, MAYBE)
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

fn result_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    map_like(family, call, ctx, RESULT)
}

fn result_map_error(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    map_like(family, call, ctx, RESULT_ERROR)
}

fn result_and_then(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    and_then_like(family, call, ctx, RESULT)
}

fn result_with_default(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    with_default_like(family, call, ctx, RESULT)
}

fn result_to_maybe(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    let value = call.arg(0)?;
    if let Some(payload) = constructor_arg(ctx, value, "Result", "Ok") {
        let text = format!(
            "{} {}",
            ctx.qualify("Maybe", "Just"),
            ctx.arg_text(payload.strip_parens())
        );
        return Some(family.replace_call(
            call,
            ctx,
            "Using Result.toMaybe on a value that is Ok will result in Just that value",
            text,
            false,
        ));
    }
    if !is_constructed(ctx, value, "Result", "Err") {
        return None;
    }
    Some(family.replace_call(
        call,
        ctx,
        "Using Result.toMaybe on an error will result in Nothing",
        ctx.qualify("Maybe", "Nothing"),
        true,
    ))
}
