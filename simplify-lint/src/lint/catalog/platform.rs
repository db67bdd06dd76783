//! `Cmd` and `Sub`: batching and mapping effects that do nothing.

use simplify_repr::Expr;

use super::CallFamily;
use crate::lint::context::{remove_items, CheckContext};
use crate::lint::normalize::{is_identity, list_literal, CallInfo};
use crate::lint::rules::{Finding, RuleCode};

/// SIM019.
pub fn cmd_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM019,
        "Platform.Cmd",
        &[("batch", batch), ("map", map)],
    )
}

/// SIM020.
pub fn sub_rule() -> CallFamily {
    CallFamily::new(
        RuleCode::SIM020,
        "Platform.Sub",
        &[("batch", batch), ("map", map)],
    )
}

fn is_none(family: &CallFamily, ctx: &CheckContext<'_>, expr: &Expr) -> bool {
    ctx.is_reference(expr, family.module(), "none")
}

/// `Cmd.none` / `Sub.none` as shown in messages.
fn none_name(family: &CallFamily) -> String {
    let short = family.module().rsplit('.').next().unwrap_or(family.module());
    format!("{short}.none")
}

fn batch(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let elements = list_literal(call.arg(0)?)?;
    let none = family.qualified(ctx, "none");
    match elements {
        [] => {
            return Some(family.replace_call(
                call,
                ctx,
                format!("Replace by {}", none_name(family)),
                none,
                true,
            ))
        }
        [only] => {
            return Some(family.keep_arg(
                call,
                ctx,
                format!("Unnecessary {}", family.display_name(call)),
                only,
            ))
        }
        _ => {}
    }

    let flagged: Vec<bool> = elements.iter().map(|e| is_none(family, ctx, e)).collect();
    let first = flagged.iter().position(|&f| f)?;
    let message = format!("Unnecessary {}", none_name(family));
    if flagged.iter().all(|&f| f) {
        return Some(family.replace_call(call, ctx, message, none, true));
    }
    let ranges: Vec<_> = elements.iter().map(|e| e.range).collect();
    Some(
        family
            .finding(message, elements[first].range)
            .with_details([format!(
                "{} will be ignored by {}.",
                none_name(family),
                family.display_name(call)
            )])
            .with_fix(remove_items(&ranges, &flagged)),
    )
}

fn map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let name = family.display_name(call);
    if is_identity(ctx, call.arg(0)?) {
        let message = format!("Using {name} with an identity function is the same as not using {name}");
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    if !is_none(family, ctx, call.arg(1)?) {
        return None;
    }
    let none = none_name(family);
    Some(family.replace_call(
        call,
        ctx,
        format!("Using {name} on {none} will result in {none}"),
        family.qualified(ctx, "none"),
        true,
    ))
}
