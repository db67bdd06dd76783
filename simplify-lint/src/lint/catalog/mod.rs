//! The rule catalog.
//!
//! Rules that look at syntax (`||`, `if`, record updates, ...) implement
//! [`Rule`] directly. Library call rules are [`CallFamily`] tables keyed by
//! function name; a family matches a call however it is written (`f a b`,
//! `b |> f a`, `f a <| b`).

mod boolean;
mod collections;
mod conditional;
mod function;
mod list;
mod maybe_result;
mod numeric;
mod platform;
mod record;
mod string;

use rustc_hash::FxHashMap;
use simplify_repr::{Expr, ExprKind, Expr_, Range};

use super::context::CheckContext;
use super::normalize::{list_literal, CallInfo};
use super::rules::{Edit, Finding, Rule, RuleCode};

pub use boolean::{BooleanOperatorRule, EqualityRule, NotRule};
pub use collections::{dict_rule, set_rule};
pub use conditional::{CaseRule, IfRule};
pub use function::{AppliedLambdaRule, BasicsRule, PrefixOperatorRule};
pub use list::ListRule;
pub use maybe_result::{maybe_rule, result_rule};
pub use numeric::{ArithmeticRule, ComparisonRule, NegationRule};
pub use platform::{cmd_rule, sub_rule};
pub use record::RecordUpdateRule;
pub use string::StringRule;

/// Every rule in the catalog, in rule code order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(BooleanOperatorRule::new()),
        Box::new(NotRule::new()),
        Box::new(EqualityRule::new()),
        Box::new(IfRule::new()),
        Box::new(CaseRule::new()),
        Box::new(RecordUpdateRule::new()),
        Box::new(ArithmeticRule::new()),
        Box::new(NegationRule::new()),
        Box::new(ComparisonRule::new()),
        Box::new(PrefixOperatorRule::new()),
        Box::new(AppliedLambdaRule::new()),
        Box::new(BasicsRule::new()),
        Box::new(ListRule::new()),
        Box::new(StringRule::new()),
        Box::new(maybe_rule()),
        Box::new(result_rule()),
        Box::new(set_rule()),
        Box::new(dict_rule()),
        Box::new(cmd_rule()),
        Box::new(sub_rule()),
    ]
}

// ---------------------------------------------------------------------------
// Call families
// ---------------------------------------------------------------------------

/// Evaluator for calls to one library function.
pub type CallCheck = fn(&CallFamily, &CallInfo<'_>, &CheckContext<'_>) -> Option<Finding>;

/// Expression kinds a call can be written as.
pub(crate) const CALL_KINDS: &[ExprKind] = &[ExprKind::Application, ExprKind::Operator];

/// A table of call evaluators for the functions of one module.
pub struct CallFamily {
    code: RuleCode,
    module: &'static str,
    checks: FxHashMap<&'static str, CallCheck>,
}

impl CallFamily {
    pub fn new(code: RuleCode, module: &'static str, checks: &[(&'static str, CallCheck)]) -> Self {
        Self {
            code,
            module,
            checks: checks.iter().copied().collect(),
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Evaluate a call already normalized from `expr`.
    pub fn check_call(&self, call: &CallInfo<'_>, ctx: &CheckContext<'_>) -> Option<Finding> {
        if !call.function.module.is(self.module) {
            return None;
        }
        let check = self.checks.get(call.function.name.as_str())?;
        check(self, call, ctx)
    }

    /// `module.name` written the way this module refers to it.
    pub fn qualified(&self, ctx: &CheckContext<'_>, name: &str) -> String {
        ctx.qualify(self.module, name)
    }

    /// `Module.function` as shown in messages.
    pub fn display_name(&self, call: &CallInfo<'_>) -> String {
        let module = self.module.rsplit('.').next().unwrap_or(self.module);
        format!("{module}.{}", call.function.name)
    }

    pub fn finding(&self, message: impl Into<String>, range: Range) -> Finding {
        Finding::new(self.code, message, range)
    }

    /// Replace the whole call by `text`.
    pub fn replace_call(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
        text: impl Into<String>,
        atomic: bool,
    ) -> Finding {
        self.finding(message, call.fn_range)
            .with_fix(vec![ctx.replace_by(call.range, text, atomic)])
    }

    /// Replace the whole call by one of its arguments.
    pub fn keep_arg(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
        kept: &Expr,
    ) -> Finding {
        self.finding(message, call.fn_range)
            .with_fix(ctx.keep_only(call.range, kept.strip_parens()))
    }

    /// Replace a point-free call by `identity`.
    pub fn replace_by_identity(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
    ) -> Finding {
        let identity = ctx.qualify("Basics", "identity");
        self.replace_call(call, ctx, message, identity, true)
    }

    /// Replace a point-free call by `always value`.
    pub fn replace_by_always(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
        value: &str,
    ) -> Finding {
        let text = format!("{} {value}", ctx.qualify("Basics", "always"));
        self.replace_call(call, ctx, message, text, false)
    }

    /// Keep the argument at `index`, or become `identity` when the call
    /// stops before it.
    pub fn keep_arg_or_identity(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
        index: usize,
    ) -> Finding {
        match call.arg(index) {
            Some(kept) => self.keep_arg(call, ctx, message, kept),
            None => self.replace_by_identity(call, ctx, message),
        }
    }

    /// Become `value`, or `always value` when the call stops before the
    /// argument at `index`.
    pub fn value_or_always(
        &self,
        call: &CallInfo<'_>,
        ctx: &CheckContext<'_>,
        message: impl Into<String>,
        index: usize,
        value: &str,
        atomic: bool,
    ) -> Finding {
        if call.args.len() > index {
            self.replace_call(call, ctx, message, value, atomic)
        } else {
            self.replace_by_always(call, ctx, message, value)
        }
    }
}

impl Rule for CallFamily {
    fn code(&self) -> RuleCode {
        self.code
    }

    fn kinds(&self) -> &'static [ExprKind] {
        CALL_KINDS
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let call = CallInfo::from_node(ctx, expr)?;
        self.check_call(&call, ctx)
    }
}

// ---------------------------------------------------------------------------
// Shared edit builders
// ---------------------------------------------------------------------------

/// Edits merging consecutive list literals `lists` (elements of an outer
/// sequence, or the two operands of `++`) into the first one's brackets.
///
/// The text between the last element of one literal and the first element
/// of the next becomes `, `, so the elements keep their original text. Empty literals cannot be joined that way; the
/// whole span is then rewritten.
pub(crate) fn merge_list_literals(ctx: &CheckContext<'_>, lists: &[&Expr]) -> Vec<Edit> {
    let elements: Vec<&Expr> = lists
        .iter()
        .filter_map(|l| list_literal(l))
        .flatten()
        .collect();
    let (Some(first), Some(last)) = (lists.first(), lists.last()) else {
        return Vec::new();
    };
    let span = Range::new(first.range.start, last.range.end);
    let all_direct_non_empty = lists
        .iter()
        .all(|l| matches!(&l.value, Expr_::List(items) if !items.is_empty()));
    if !all_direct_non_empty {
        let texts: Vec<&str> = elements.iter().map(|e| ctx.text(e.range)).collect();
        return if texts.is_empty() {
            vec![Edit::replace(span, "[]")]
        } else {
            vec![Edit::replace(span, format!("[ {} ]", texts.join(", ")))]
        };
    }
    lists
        .windows(2)
        .filter_map(|pair| {
            let left_end = list_literal(pair[0])?.last()?.range.end;
            let right_start = list_literal(pair[1])?.first()?.range.start;
            Some(Edit::replace(Range::new(left_end, right_start), ", "))
        })
        .collect()
}

/// Text of a list literal made of `elements`.
pub(crate) fn list_text(ctx: &CheckContext<'_>, elements: &[Expr]) -> String {
    if elements.is_empty() {
        return "[]".to_string();
    }
    let texts: Vec<&str> = elements.iter().map(|e| ctx.text(e.range)).collect();
    format!("[ {} ]", texts.join(", "))
}

/// `function` applied to `args`, each parenthesized unless atomic.
pub(crate) fn call_text(ctx: &CheckContext<'_>, function: &str, args: &[&Expr]) -> String {
    let mut text = function.to_string();
    for arg in args {
        text.push(' ');
        text.push_str(&ctx.arg_text(arg.strip_parens()));
    }
    text
}
