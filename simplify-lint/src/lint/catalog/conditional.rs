//! `if` and `case` expressions.

use rustc_hash::FxHashSet;
use simplify_repr::{CaseBranch, Expr, ExprKind, Expr_, Pattern_, QualifiedName, Range};

use super::boolean::bool_name;
use crate::lint::context::CheckContext;
use crate::lint::knowledge::TypeName;
use crate::lint::normalize::{are_equal, as_bool};
use crate::lint::rules::{Edit, Finding, Rule, RuleCode};

/// `not cond`, parenthesizing the condition when needed.
fn negated_text(ctx: &CheckContext<'_>, condition: &Expr) -> String {
    format!(
        "{} {}",
        ctx.qualify("Basics", "not"),
        ctx.arg_text(condition.strip_parens())
    )
}

// ---------------------------------------------------------------------------
// SIM004: if
// ---------------------------------------------------------------------------

pub struct IfRule;

impl IfRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for IfRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM004
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::If]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::If {
            condition,
            then_branch,
            else_branch,
        } = &expr.value
        else {
            return None;
        };
        let head = Range::new(expr.range.start, condition.range.end);

        if let Some(value) = as_bool(ctx, condition) {
            let (kept, branch) = if value {
                (then_branch, "then")
            } else {
                (else_branch, "else")
            };
            return Some(
                Finding::new(
                    self.code(),
                    format!("The condition will always evaluate to {}", bool_name(value)),
                    head,
                )
                .with_details([format!(
                    "The expression can be replaced by what is inside the '{branch}' branch."
                )])
                .with_fix(ctx.keep_only(expr.range, kept.strip_parens())),
            );
        }

        match (as_bool(ctx, then_branch), as_bool(ctx, else_branch)) {
            (Some(true), Some(false)) => {
                return Some(
                    Finding::new(self.code(), "The if expression's value is the same as the condition", head)
                        .with_details(["The expression can be replaced by the condition."])
                        .with_fix(ctx.keep_only(expr.range, condition.strip_parens())),
                );
            }
            (Some(false), Some(true)) => {
                return Some(
                    Finding::new(self.code(), "The if expression's value is the inverse of the condition", head)
                        .with_details(["The expression can be replaced by the condition wrapped by `not`."])
                        .with_fix(vec![ctx.replace_by(expr.range, negated_text(ctx, condition), false)]),
                );
            }
            _ => {}
        }

        if are_equal(ctx, then_branch, else_branch) {
            return Some(
                Finding::new(self.code(), "The values in both branches is the same.", head)
                    .with_details(["The expression can be replaced by the contents of either branch."])
                    .with_fix(ctx.keep_only(expr.range, then_branch.strip_parens())),
            );
        }
        None
    }
}

// ---------------------------------------------------------------------------
// SIM005: case
// ---------------------------------------------------------------------------

pub struct CaseRule;

impl CaseRule {
    pub fn new() -> Self {
        Self
    }

    /// All branches return the same thing and the patterns neither bind
    /// anything nor leave a constructor uncovered.
    fn check_same_bodies(
        &self,
        expr: &Expr,
        scrutinee: &Expr,
        branches: &[CaseBranch],
        ctx: &CheckContext<'_>,
    ) -> Option<Finding> {
        let (first, rest) = branches.split_first()?;
        if !rest.iter().all(|b| are_equal(ctx, &first.body, &b.body)) {
            return None;
        }
        if branches.iter().any(|b| !b.pattern.value.bound_vars().is_empty()) {
            return None;
        }
        if touches_ignored_type(ctx, branches) || !is_exhaustive(ctx, branches) {
            return None;
        }
        Some(
            Finding::new(
                self.code(),
                "Unnecessary case expression",
                Range::new(expr.range.start, scrutinee.range.end),
            )
            .with_details(["All the branches of this case expression resolve to the same value. You can remove the case expression and replace it with the body of one of the branches."])
            .with_fix(ctx.keep_only(expr.range, first.body.strip_parens())),
        )
    }

    /// `case b of True -> x; False -> y` and the wildcard variants.
    fn check_boolean_case(
        &self,
        expr: &Expr,
        scrutinee: &Expr,
        branches: &[CaseBranch],
        ctx: &CheckContext<'_>,
    ) -> Option<Finding> {
        let [first, second] = branches else {
            return None;
        };
        let first_value = bool_pattern(ctx, &first.pattern.value)??;
        match bool_pattern(ctx, &second.pattern.value)? {
            Some(second_value) if second_value == first_value => return None,
            _ => {}
        }

        let condition = if first_value {
            ctx.text(scrutinee.range).to_string()
        } else {
            negated_text(ctx, scrutinee)
        };
        let open = if ctx.is_free() { "" } else { "(" };
        let mut edits = vec![
            Edit::replace(
                Range::new(expr.range.start, first.body.range.start),
                format!("{open}if {condition} then "),
            ),
            Edit::replace(Range::new(first.body.range.end, second.body.range.start), " else "),
        ];
        if !ctx.is_free() {
            edits.push(Edit::insert(expr.range.end, ")"));
        }
        Some(
            Finding::new(
                self.code(),
                "Replace `case..of` by an `if` condition",
                Range::new(expr.range.start, scrutinee.range.end),
            )
            .with_details([
                "The idiomatic way to check for a condition is to use an `if` expression.",
                "Read more about it at: https://guide.elm-lang.org/core_language.html#if-expressions",
            ])
            .with_fix(edits),
        )
    }
}

/// `Some(Some(b))` for a `True`/`False` pattern, `Some(None)` for a
/// wildcard, `None` for anything else.
fn bool_pattern(ctx: &CheckContext<'_>, pattern: &Pattern_) -> Option<Option<bool>> {
    match pattern.strip_parens() {
        Pattern_::Wild => Some(None),
        Pattern_::Constructor { name, args } if args.is_empty() => {
            let resolved = ctx.resolve_name(name)?;
            if resolved.is("Basics", "True") {
                Some(Some(true))
            } else if resolved.is("Basics", "False") {
                Some(Some(false))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Type of a constructor referenced in a pattern.
fn constructor_type(ctx: &CheckContext<'_>, name: &QualifiedName) -> Option<TypeName> {
    let resolved = ctx.resolve_name(name)?;
    ctx.knowledge()
        .type_of_constructor(&resolved.module, &resolved.name)
}

fn touches_ignored_type(ctx: &CheckContext<'_>, branches: &[CaseBranch]) -> bool {
    let ignored = ctx.ignored_types();
    if ignored.is_empty() {
        return false;
    }
    branches
        .iter()
        .flat_map(|b| b.pattern.value.constructors())
        .filter_map(|name| constructor_type(ctx, name))
        .any(|type_name| ignored.contains(&type_name))
}

/// Do the patterns cover every value? A catch-all branch anywhere covers
/// everything; otherwise only a full set of argument-ignoring constructors
/// of one type is recognized.
fn is_exhaustive(ctx: &CheckContext<'_>, branches: &[CaseBranch]) -> bool {
    if branches.iter().any(|b| b.pattern.value.is_catch_all()) {
        return true;
    }
    let mut owner: Option<TypeName> = None;
    let mut seen = FxHashSet::default();
    for branch in branches {
        let pattern = branch.pattern.value.strip_parens();
        if !pattern.ignores_value() {
            return false;
        }
        let Pattern_::Constructor { name, .. } = pattern else {
            return false;
        };
        let Some(type_name) = constructor_type(ctx, name) else {
            return false;
        };
        match &owner {
            Some(existing) if *existing != type_name => return false,
            Some(_) => {}
            None => owner = Some(type_name),
        }
        seen.insert(name.name.as_str());
    }
    let Some(type_name) = owner else {
        return false;
    };
    ctx.knowledge()
        .constructors_of(&type_name)
        .is_some_and(|all| all.len() == seen.len() && all.iter().all(|c| seen.contains(c.as_str())))
}

impl Rule for CaseRule {
    fn code(&self) -> RuleCode {
        RuleCode::SIM005
    }

    fn kinds(&self) -> &'static [ExprKind] {
        &[ExprKind::Case]
    }

    fn check(&self, expr: &Expr, ctx: &CheckContext<'_>) -> Option<Finding> {
        let Expr_::Case {
            scrutinee,
            branches,
        } = &expr.value
        else {
            return None;
        };
        self.check_same_bodies(expr, scrutinee, branches, ctx)
            .or_else(|| self.check_boolean_case(expr, scrutinee, branches, ctx))
    }
}
