//! `List` functions and the `++` / `::` operators on lists.

use simplify_repr::{Expr, ExprKind, Expr_, Pattern_, Range};

use super::{list_text, merge_list_literals, CallFamily, CALL_KINDS};
use crate::lint::context::CheckContext;
use crate::lint::normalize::{
    are_equal, as_int, call_to, constant_function, is_always_bool, is_empty_list, is_identity,
    is_value, list_literal, CallInfo,
};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

/// SIM013.
pub struct ListRule {
    family: CallFamily,
}

impl ListRule {
    pub fn new() -> Self {
        Self {
            family: CallFamily::new(
                RuleCode::SIM013,
                "List",
                &[
                    ("map", map),
                    ("filter", filter),
                    ("filterMap", filter_map),
                    ("concat", concat),
                    ("concatMap", concat_map),
                    ("indexedMap", indexed_map),
                    ("isEmpty", is_empty),
                    ("all", all),
                    ("any", any),
                    ("range", range),
                    ("length", length),
                    ("repeat", repeat),
                    ("reverse", reverse),
                    ("foldl", fold),
                    ("foldr", fold),
                    ("partition", partition),
                    ("head", head),
                    ("tail", tail),
                    ("minimum", extremum),
                    ("maximum", extremum),
                    ("member", member),
                    ("sum", sum),
                    ("product", product),
                    ("take", take),
                    ("drop", drop),
                    ("append", append),
                    ("singleton", singleton),
                ],
            ),
        }
    }
}

impl Rule for ListRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM013
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
            match operator.as_str() {
                "++" => return check_concat_operator(expr, left, right, ctx),
                "::" => return check_cons_operator(expr, left, right, ctx),
                _ => {}
            }
        }
        let call = CallInfo::from_node(ctx, expr)?;
        self.family.check_call(&call, ctx)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty_list_message(family: &CallFamily, call: &CallInfo<'_>, result: &str) -> String {
    format!(
        "Using {} on an empty list will result in {result}",
        family.display_name(call)
    )
}

/// `List.f ... []` evaluating to `result`.
fn on_empty_list(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    list_index: usize,
    result: &str,
    atomic: bool,
) -> Option<Finding> {
    if !is_empty_list(call.arg(list_index)?) {
        return None;
    }
    Some(family.replace_call(call, ctx, empty_list_message(family, call, result), result, atomic))
}

/// `List.singleton` or `\x -> [ x ]`.
fn is_singleton_function(ctx: &CheckContext<'_>, expr: &Expr) -> bool {
    let expr = expr.strip_parens();
    if ctx.is_reference(expr, "List", "singleton") {
        return true;
    }
    let Expr_::Lambda { parameters, body } = &expr.value else {
        return false;
    };
    let ([param], Some([element])) = (parameters.as_slice(), list_literal(body)) else {
        return false;
    };
    match (param.value.strip_parens(), &element.strip_parens().value) {
        (Pattern_::Var(p), Expr_::Variable(name)) => !name.is_qualified() && name.name == *p,
        _ => false,
    }
}

fn bool_text(ctx: &CheckContext<'_>, value: bool) -> String {
    ctx.qualify("Basics", if value { "True" } else { "False" })
}

// ---------------------------------------------------------------------------
// Evaluators
// ---------------------------------------------------------------------------

fn map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if is_identity(ctx, call.arg(0)?) {
        let message = "Using List.map with an identity function is the same as not using List.map";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn indexed_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn filter(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let predicate = call.arg(0)?;
    if is_always_bool(ctx, predicate, true) {
        let message = "Using List.filter with a function that will always return True is the same as not using List.filter";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    if is_always_bool(ctx, predicate, false) {
        let message = "Using List.filter with a function that will always return False will result in []";
        return Some(family.value_or_always(call, ctx, message, 1, "[]", true));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn filter_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let function = call.arg(0)?;
    if is_value(ctx, function, "Maybe", "Just") {
        let message = "Using List.filterMap with `Just` is the same as not using List.filterMap";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    if constant_function(ctx, function).is_some_and(|c| is_value(ctx, c, "Maybe", "Nothing")) {
        let message = "Using List.filterMap with a function that will always return Nothing will result in []";
        return Some(family.value_or_always(call, ctx, message, 1, "[]", true));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn concat(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let argument = call.arg(0)?;
    let elements = list_literal(argument)?;
    match elements {
        [] => {
            return Some(family.replace_call(
                call,
                ctx,
                empty_list_message(family, call, "[]"),
                "[]",
                true,
            ))
        }
        [only] => {
            return Some(family.keep_arg(
                call,
                ctx,
                "Unnecessary use of List.concat on a list with 1 element",
                only,
            ))
        }
        _ => {}
    }

    let literals: Vec<&Expr> = elements.iter().filter(|e| list_literal(e).is_some()).collect();
    if literals.len() == elements.len() {
        let (Some(first), Some(last)) = (elements.first(), elements.last()) else {
            return None;
        };
        let mut edits = vec![
            Edit::remove(Range::new(call.range.start, first.range.start)),
            Edit::remove(Range::new(last.range.end, call.range.end)),
        ];
        edits.extend(merge_list_literals(ctx, &literals));
        return Some(
            family
                .finding("Expression could be simplified to be a single List", call.fn_range)
                .with_details(["Try moving all the elements into a single list."])
                .with_fix(edits),
        );
    }

    // Runs of adjacent literal lists.
    let mut edits = Vec::new();
    let mut run: Vec<&Expr> = Vec::new();
    for element in elements.iter().map(Some).chain([None]) {
        match element {
            Some(e) if list_literal(e).is_some() => run.push(e),
            _ => {
                if run.len() >= 2 {
                    edits.extend(merge_list_literals(ctx, &run));
                }
                run.clear();
            }
        }
    }
    if edits.is_empty() {
        return None;
    }
    Some(
        family
            .finding("Consecutive literal lists should be merged", call.fn_range)
            .with_details(["Try moving all the elements from consecutive list literals so that they form a single list."])
            .with_fix(edits),
    )
}

fn concat_map(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let function = call.arg(0)?;
    if is_identity(ctx, function) && call.arg_is_adjacent(0) {
        let replacement = family.qualified(ctx, "concat");
        return Some(
            family
                .finding(
                    "Using List.concatMap with an identity function is the same as using List.concat",
                    call.fn_range,
                )
                .with_fix(vec![Edit::replace(
                    Range::new(call.fn_range.start, function.range.end),
                    replacement,
                )]),
        );
    }
    if is_singleton_function(ctx, function) {
        let message = "Using List.concatMap with a function that returns a singleton list is the same as not using List.concatMap";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn is_empty(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let elements = list_literal(call.arg(0)?)?;
    let result = elements.is_empty();
    let text = bool_text(ctx, result);
    Some(family.replace_call(
        call,
        ctx,
        format!("The call to List.isEmpty will result in {text}"),
        text.clone(),
        true,
    ))
}

/// `List.all` (`absorbing = true`) and `List.any` (`absorbing = false`).
fn quantifier(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    empty_result: bool,
) -> Option<Finding> {
    let name = family.display_name(call);
    if is_always_bool(ctx, call.arg(0)?, empty_result) {
        let text = bool_text(ctx, empty_result);
        let message = format!("The call to {name} will result in {text}");
        return Some(family.value_or_always(call, ctx, message, 1, &text, true));
    }
    if is_empty_list(call.arg(1)?) {
        let text = bool_text(ctx, empty_result);
        return Some(family.replace_call(
            call,
            ctx,
            format!("The call to {name} will result in {text}"),
            text.clone(),
            true,
        ));
    }
    None
}

fn all(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    quantifier(family, call, ctx, true)
}

fn any(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    quantifier(family, call, ctx, false)
}

fn range(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (low, high) = (as_int(call.arg(0)?)?, as_int(call.arg(1)?)?);
    if low <= high {
        return None;
    }
    Some(family.replace_call(call, ctx, "The call to List.range will result in []", "[]", true))
}

fn length(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let count = list_literal(call.arg(0)?)?.len();
    Some(family.replace_call(
        call,
        ctx,
        format!("The length of the list is {count}"),
        count.to_string(),
        true,
    ))
}

fn repeat(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if as_int(call.arg(0)?)? > 0 {
        return None;
    }
    let message = "List.repeat will result in an empty list";
    Some(family.value_or_always(call, ctx, message, 1, "[]", true))
}

fn reverse(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let argument = call.arg(0)?;
    if let Some(elements) = list_literal(argument) {
        return match elements {
            [] => Some(family.replace_call(
                call,
                ctx,
                empty_list_message(family, call, "[]"),
                "[]",
                true,
            )),
            [_] => Some(family.keep_arg(
                call,
                ctx,
                "Using List.reverse on a list with a single element will result in the list itself",
                argument,
            )),
            _ => None,
        };
    }
    let inner = call_to(ctx, argument, "List", "reverse").filter(|args| args.len() == 1)?;
    Some(family.keep_arg(call, ctx, "Unnecessary double reversal", inner[0]))
}

/// `List.foldl` and `List.foldr` on `[]`.
fn fold(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (initial, list) = (call.arg(1)?, call.arg(2)?);
    if !is_empty_list(list) {
        return None;
    }
    Some(family.keep_arg(
        call,
        ctx,
        format!(
            "The call to {} will result in the initial accumulator",
            family.display_name(call)
        ),
        initial,
    ))
}

fn partition(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let list = call.arg(1)?;
    if is_empty_list(list) {
        return Some(family.replace_call(
            call,
            ctx,
            empty_list_message(family, call, "( [], [] )"),
            "( [], [] )",
            true,
        ));
    }
    let predicate = call.arg(0)?;
    let items = ctx.text(list.strip_parens().range);
    if is_always_bool(ctx, predicate, true) {
        return Some(family.replace_call(
            call,
            ctx,
            "All elements will go to the first list",
            format!("( {items}, [] )"),
            true,
        ));
    }
    if is_always_bool(ctx, predicate, false) {
        return Some(family.replace_call(
            call,
            ctx,
            "All elements will go to the second list",
            format!("( [], {items} )"),
            true,
        ));
    }
    None
}

fn just_text(ctx: &CheckContext<'_>, value: &str) -> String {
    format!("{} {value}", ctx.qualify("Maybe", "Just"))
}

fn head(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let elements = list_literal(call.arg(0)?)?;
    match elements.first() {
        None => {
            let nothing = ctx.qualify("Maybe", "Nothing");
            Some(family.replace_call(
                call,
                ctx,
                empty_list_message(family, call, &nothing),
                nothing.clone(),
                true,
            ))
        }
        Some(first) => Some(family.replace_call(
            call,
            ctx,
            "Using List.head on a list with a first element will result in Just the first element",
            just_text(ctx, &ctx.arg_text(first.strip_parens())),
            false,
        )),
    }
}

fn tail(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let elements = list_literal(call.arg(0)?)?;
    let Some((_, rest)) = elements.split_first() else {
        let nothing = ctx.qualify("Maybe", "Nothing");
        return Some(family.replace_call(
            call,
            ctx,
            empty_list_message(family, call, &nothing),
            nothing.clone(),
            true,
        ));
    };
    Some(family.replace_call(
        call,
        ctx,
        "Using List.tail on a list with some elements will result in Just the elements after the first",
        just_text(ctx, &list_text(ctx, rest)),
        false,
    ))
}

/// `List.minimum` and `List.maximum`.
fn extremum(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let elements = list_literal(call.arg(0)?)?;
    match elements {
        [] => {
            let nothing = ctx.qualify("Maybe", "Nothing");
            Some(family.replace_call(
                call,
                ctx,
                empty_list_message(family, call, &nothing),
                nothing.clone(),
                true,
            ))
        }
        [only] => Some(family.replace_call(
            call,
            ctx,
            format!(
                "Using {} on a list with a single element will result in Just that element",
                family.display_name(call)
            ),
            just_text(ctx, &ctx.arg_text(only.strip_parens())),
            false,
        )),
        _ => None,
    }
}

fn member(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (needle, list) = (call.arg(0)?, call.arg(1)?);
    let elements = list_literal(list)?;
    if elements.is_empty() {
        let text = bool_text(ctx, false);
        return Some(family.replace_call(
            call,
            ctx,
            empty_list_message(family, call, &text),
            text.clone(),
            true,
        ));
    }
    if elements.iter().any(|e| are_equal(ctx, e, needle)) {
        return Some(family.replace_call(
            call,
            ctx,
            "The list contains the element, so List.member will result in True",
            bool_text(ctx, true),
            true,
        ));
    }
    None
}

/// `List.sum` / `List.product`: `[]` gives `neutral`, `[ a ]` gives `a`.
fn aggregate(
    family: &CallFamily,
    call: &CallInfo<'_>,
    ctx: &CheckContext<'_>,
    neutral: &str,
) -> Option<Finding> {
    match list_literal(call.arg(0)?)? {
        [] => Some(family.replace_call(
            call,
            ctx,
            empty_list_message(family, call, neutral),
            neutral,
            true,
        )),
        [only] => Some(family.keep_arg(
            call,
            ctx,
            format!(
                "Using {} on a list with a single element will result in that element",
                family.display_name(call)
            ),
            only,
        )),
        _ => None,
    }
}

fn sum(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    aggregate(family, call, ctx, "0")
}

fn product(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    aggregate(family, call, ctx, "1")
}

fn take(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if as_int(call.arg(0)?).is_some_and(|n| n <= 0) {
        let message = "Taking 0 items from a list will result in []";
        return Some(family.value_or_always(call, ctx, message, 1, "[]", true));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn drop(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    if as_int(call.arg(0)?).is_some_and(|n| n <= 0) {
        let message = "Dropping 0 items from a list will result in the list itself";
        return Some(family.keep_arg_or_identity(call, ctx, message, 1));
    }
    on_empty_list(family, call, ctx, 1, "[]", true)
}

fn append(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let (first, second) = (call.arg(0)?, call.arg(1)?);
    if is_empty_list(first) {
        return Some(family.keep_arg(call, ctx, "Appending [] doesn't have any effect", second));
    }
    if is_empty_list(second) {
        return Some(family.keep_arg(call, ctx, "Appending [] doesn't have any effect", first));
    }
    let (Some(a), Some(b)) = (list_literal(first), list_literal(second)) else {
        return None;
    };
    let merged: Vec<Expr> = a.iter().chain(b).cloned().collect();
    Some(family.replace_call(
        call,
        ctx,
        "Appending literal lists could be simplified to be a single List",
        list_text(ctx, &merged),
        true,
    ))
}

fn singleton(family: &CallFamily, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
    let value = call.arg(0)?.strip_parens();
    Some(family.replace_call(
        call,
        ctx,
        "Use a list literal instead of List.singleton",
        format!("[ {} ]", ctx.text(value.range)),
        true,
    ))
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn check_concat_operator(
    expr: &Expr,
    left: &Expr,
    right: &Expr,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    let finding = |message: &str, edits: Vec<Edit>| {
        Some(Finding::new(RuleCode::SIM013, message, expr.range).with_fix(edits))
    };
    if is_empty_list(left) {
        return finding(
            "Concatenating with a single list doesn't have any effect",
            ctx.keep_only(expr.range, right.strip_parens()),
        );
    }
    if is_empty_list(right) {
        return finding(
            "Concatenating with a single list doesn't have any effect",
            ctx.keep_only(expr.range, left.strip_parens()),
        );
    }
    let left_elements = list_literal(left)?;
    if list_literal(right).is_some() {
        return finding(
            "Expression could be simplified to be a single List",
            merge_list_literals(ctx, &[left, right]),
        );
    }
    let [element] = left_elements else {
        return None;
    };
    let element = element.strip_parens();
    let element_text = match &element.value {
        Expr_::Application(_) => ctx.text(element.range).to_string(),
        _ => ctx.arg_text(element),
    };
    finding(
        "Should use (::) instead of (++)",
        vec![Edit::replace(
            Range::new(left.range.start, right.range.start),
            format!("{element_text} :: "),
        )],
    )
}

fn check_cons_operator(
    expr: &Expr,
    left: &Expr,
    right: &Expr,
    ctx: &CheckContext<'_>,
) -> Option<Finding> {
    let elements = list_literal(right)?;
    let mut texts = vec![ctx.text(left.strip_parens().range)];
    texts.extend(elements.iter().map(|e| ctx.text(e.range)));
    Some(
        Finding::new(
            RuleCode::SIM013,
            "Element added to the beginning of the list could be included in the list",
            expr.range,
        )
        .with_fix(vec![Edit::replace(expr.range, format!("[ {} ]", texts.join(", ")))]),
    )
}
