//! `Set` and `Dict` functions on empty collections.
//!
//! Both modules share the evaluators below; the family they run in decides
//! which module's `empty` they look for.

use simplify_repr::Expr;

use super::CallFamily;
use crate::lint::context::CheckContext;
use crate::lint::normalize::{is_always_bool, is_empty_list, is_identity, list_literal, CallInfo};
use crate::lint::rules::{Finding, RuleCode};

/// SIM017.
pub fn set_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM017,
        "Set",
        &[
            ("map", set_map),
            ("filter", set_filter),
            ("isEmpty", is_empty),
            ("member", member),
            ("fromList", set_from_list),
            ("toList", to_list),
            ("size", size),
            ("remove", remove),
            ("union", union),
            ("intersect", intersect),
            ("diff", diff),
            ("partition", partition),
        ],
    )
}

/// SIM018.
pub fn dict_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM018,
        "Dict",
        &[
            ("isEmpty", is_empty),
            ("fromList", from_list),
            ("toList", to_list),
            ("keys", to_list),
            ("values", to_list),
            ("size", size),
            ("member", member),
            ("filter", empty_stays_empty),
            ("map", empty_stays_empty),
            ("union", union),
            ("remove", remove),
            ("partition", partition),
        ],
    )
}

fn is_empty_collection(family: &CallFamily, ctx: &CheckContext<'_>, expr: &Expr) -> bool {
    ctx.is_reference(expr, family.module(), "empty")
}

/// `Set.empty` as shown in messages.
fn empty_name(family: &CallFamily) -> String {
    format!("{}.empty", family.module())
}

/// Replace the call by `result` when the argument at `index` is empty.
fn on_empty(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    index: usize,
    result: &str,
    shown: &str,
) -> Option<Finding> {
    if !is_empty_collection(family, ctx, call.arg(index)?) {
        return None;
    }
    Some(family.replace_call(
        call,
        ctx,
        format!(
            "Using {} on {} will result in {shown}",
            family.display_name(call),
            empty_name(family)
        ),
        result,
        true,
    ))
}

/// The collection argument at `index` is empty, and so is the result.
fn on_empty_keep_empty(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    index: usize,
) -> Option<Finding> {
    let empty = family.qualified(ctx, "empty");
    on_empty(family, call, ctx, index, &empty, &empty_name(family))
}

// ---------------------------------------------------------------------------
// Evaluators
// ---------------------------------------------------------------------------

fn empty_stays_empty(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    on_empty_keep_empty(family, call, ctx, 1)
}

fn remove(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    on_empty_keep_empty(family, call, ctx, 1)
}

fn set_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if is_identity(ctx, call.arg(0)?) {
        let message = "Using Set.map with an identity function is the same as not using Set.map";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    on_empty_keep_empty(family, call, ctx, 1)
}

fn set_filter(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let predicate = call.arg(0)?;
    if is_always_bool(ctx, predicate, true) {
        let message = "Using Set.filter with a function that will always return True is the same as not using Set.filter";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    if is_always_bool(ctx, predicate, false) {
        let empty = family.qualified(ctx, "empty");
        let message = "Using Set.filter with a function that will always return False will result in Set.empty";
        return Some(family.value_or_always(call, ctx, message, 1, &empty, true));
    }
    on_empty_keep_empty(family, call, ctx, 1)
}

fn is_empty(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let result = ctx.qualify("Basics", "True");
    on_empty(family, call, ctx, 0, &result, "True")
}

fn member(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let result = ctx.qualify("Basics", "False");
    on_empty(family, call, ctx, 1, &result, "False")
}

fn size(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    on_empty(family, call, ctx, 0, "0", "0")
}

/// `toList`, `keys` and `values`.
fn to_list(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    on_empty(family, call, ctx, 0, "[]", "[]")
}

fn from_list(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if !is_empty_list(call.arg(0)?) {
        return None;
    }
    Some(family.replace_call(
        call,
        ctx,
        format!(
            "{} on [] will result in {}",
            family.display_name(call),
            empty_name(family)
        ),
        family.qualified(ctx, "empty"),
        true,
    ))
}

fn set_from_list(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    if let Some([only]) = list_literal(call.arg(0)?) {
        let text = format!(
            "{} {}",
            family.qualified(ctx, "singleton"),
            ctx.arg_text(only.strip_parens())
        );
        return Some(family.replace_call(
            call,
            ctx,
            "Set.fromList with a single element can be replaced using Set.singleton",
            text,
            false,
        ));
    }
    from_list(family, call, ctx)
}

fn union(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (first, second) = (call.arg(0)?, call.arg(1)?);
    let kept = if is_empty_collection(family, ctx, first) {
        second
    } else if is_empty_collection(family, ctx, second) {
        first
    } else {
        return None;
    };
    Some(family.keep_arg(
        call,
        ctx,
        format!(
            "Unnecessary union with {}",
            empty_name(family)
        ),
        kept,
    ))
}

fn intersect(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if is_empty_collection(family, ctx, call.arg(0)?) {
        return on_empty_keep_empty(family, call, ctx, 0);
    }
    on_empty_keep_empty(family, call, ctx, 1)
}

fn diff(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (first, second) = (call.arg(0)?, call.arg(1)?);
    if is_empty_collection(family, ctx, first) {
        return on_empty_keep_empty(family, call, ctx, 0);
    }
    if !is_empty_collection(family, ctx, second) {
        return None;
    }
    Some(family.keep_arg(
        call,
        ctx,
        format!(
            "Diffing a set with {} will result in the set itself",
            empty_name(family)
        ),
        first,
    ))
}

fn partition(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let empty = family.qualified(ctx, "empty");
    let pair = format!("( {empty}, {empty} )");
    let shown = format!("( {0}, {0} )", empty_name(family));
    on_empty(family, call, ctx, 1, &pair, &shown)
}
