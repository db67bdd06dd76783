//! Expression normalizer shared by the rule catalog.
//!
//! Everything here looks through redundant parentheses and compares names by
//! what they resolve to, so `(Basics.True)` and `True` are the same value and
//! `x |> f a` is the same call as `f a x`.

use simplify_repr::{Expr, Expr_, Literal, Pattern_, Range, ResolvedName};

use super::context::CheckContext;
use super::rules::Edit;

// ---------------------------------------------------------------------------
// Structural equality
// ---------------------------------------------------------------------------

/// Are `a` and `b` the same expression, ignoring parentheses everywhere and
/// comparing references by resolved name?
pub fn are_equal(ctx: &CheckContext<'_>, a: &Expr, b: &Expr) -> bool {
    let (a, b) = (a.strip_parens(), b.strip_parens());
    let all = |xs: &[Expr], ys: &[Expr]| {
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| are_equal(ctx, x, y))
    };
    match (&a.value, &b.value) {
        (Expr_::Unit, Expr_::Unit) => true,
        (Expr_::Literal(x), Expr_::Literal(y)) => x.same_value(y),
        (Expr_::Variable(x), Expr_::Variable(y)) => {
            match (ctx.resolve_name(x), ctx.resolve_name(y)) {
                (Some(rx), Some(ry)) => rx == ry,
                (None, None) => x == y,
                _ => false,
            }
        }
        (Expr_::PrefixOperator(x), Expr_::PrefixOperator(y)) => x == y,
        (Expr_::RecordAccessFunction(x), Expr_::RecordAccessFunction(y)) => x == y,
        (Expr_::Application(xs), Expr_::Application(ys))
        | (Expr_::List(xs), Expr_::List(ys))
        | (Expr_::Tuple(xs), Expr_::Tuple(ys)) => all(xs, ys),
        (
            Expr_::Operator {
                operator: o1,
                left: l1,
                right: r1,
            },
            Expr_::Operator {
                operator: o2,
                left: l2,
                right: r2,
            },
        ) => o1 == o2 && are_equal(ctx, l1, l2) && are_equal(ctx, r1, r2),
        (Expr_::Negation(x), Expr_::Negation(y)) => are_equal(ctx, x, y),
        (Expr_::Record(xs), Expr_::Record(ys)) => {
            xs.len() == ys.len()
                && xs.iter().zip(ys).all(|(x, y)| {
                    x.field.value == y.field.value && are_equal(ctx, &x.value, &y.value)
                })
        }
        (
            Expr_::RecordUpdate {
                base: b1,
                setters: s1,
            },
            Expr_::RecordUpdate {
                base: b2,
                setters: s2,
            },
        ) => {
            b1.value == b2.value
                && s1.len() == s2.len()
                && s1.iter().zip(s2).all(|(x, y)| {
                    x.field.value == y.field.value && are_equal(ctx, &x.value, &y.value)
                })
        }
        (
            Expr_::RecordAccess {
                record: r1,
                field: f1,
            },
            Expr_::RecordAccess {
                record: r2,
                field: f2,
            },
        ) => f1.value == f2.value && are_equal(ctx, r1, r2),
        (
            Expr_::If {
                condition: c1,
                then_branch: t1,
                else_branch: e1,
            },
            Expr_::If {
                condition: c2,
                then_branch: t2,
                else_branch: e2,
            },
        ) => are_equal(ctx, c1, c2) && are_equal(ctx, t1, t2) && are_equal(ctx, e1, e2),
        (
            Expr_::Case {
                scrutinee: s1,
                branches: b1,
            },
            Expr_::Case {
                scrutinee: s2,
                branches: b2,
            },
        ) => {
            are_equal(ctx, s1, s2)
                && b1.len() == b2.len()
                && b1.iter().zip(b2).all(|(x, y)| {
                    x.pattern.value.same_shape(&y.pattern.value) && are_equal(ctx, &x.body, &y.body)
                })
        }
        (
            Expr_::Lambda {
                parameters: p1,
                body: body1,
            },
            Expr_::Lambda {
                parameters: p2,
                body: body2,
            },
        ) => {
            p1.len() == p2.len()
                && p1.iter().zip(p2).all(|(x, y)| x.value.same_shape(&y.value))
                && are_equal(ctx, body1, body2)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Literal views
// ---------------------------------------------------------------------------

/// `Some(b)` when the expression is the boolean `True`/`False`.
pub fn as_bool(ctx: &CheckContext<'_>, expr: &Expr) -> Option<bool> {
    let resolved = ctx.resolve(expr)?;
    if resolved.is("Basics", "True") {
        Some(true)
    } else if resolved.is("Basics", "False") {
        Some(false)
    } else {
        None
    }
}

/// Numeric value of a number literal, following negation.
pub fn as_number(expr: &Expr) -> Option<f64> {
    match &expr.strip_parens().value {
        Expr_::Literal(literal) => literal.as_number(),
        Expr_::Negation(inner) => as_number(inner).map(|n| -n),
        _ => None,
    }
}

/// Integer value of an integer literal, following negation.
pub fn as_int(expr: &Expr) -> Option<i64> {
    match &expr.strip_parens().value {
        Expr_::Literal(literal) => literal.as_int(),
        Expr_::Negation(inner) => as_int(inner).and_then(i64::checked_neg),
        _ => None,
    }
}

pub fn is_zero(expr: &Expr) -> bool {
    as_number(expr) == Some(0.0)
}

pub fn is_one(expr: &Expr) -> bool {
    as_number(expr) == Some(1.0)
}

pub fn literal(expr: &Expr) -> Option<&Literal> {
    match &expr.strip_parens().value {
        Expr_::Literal(literal) => Some(literal),
        _ => None,
    }
}

pub fn string_literal(expr: &Expr) -> Option<&str> {
    match literal(expr)? {
        Literal::String(s) => Some(s),
        _ => None,
    }
}

/// Elements of a list literal.
pub fn list_literal(expr: &Expr) -> Option<&[Expr]> {
    match &expr.strip_parens().value {
        Expr_::List(items) => Some(items),
        _ => None,
    }
}

pub fn is_empty_list(expr: &Expr) -> bool {
    list_literal(expr).is_some_and(<[Expr]>::is_empty)
}

// ---------------------------------------------------------------------------
// Function views
// ---------------------------------------------------------------------------

/// `identity`, or a lambda `\x -> x`.
pub fn is_identity(ctx: &CheckContext<'_>, expr: &Expr) -> bool {
    let expr = expr.strip_parens();
    if ctx.is_reference(expr, "Basics", "identity") {
        return true;
    }
    match &expr.value {
        Expr_::Lambda { parameters, body } if parameters.len() == 1 => {
            match (parameters[0].value.strip_parens(), &body.strip_parens().value) {
                (Pattern_::Var(param), Expr_::Variable(name)) => {
                    !name.is_qualified() && name.name == *param
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// The value a one-argument constant function returns: `always c`, or a
/// lambda `\_ -> c` whose parameter ignores its value.
pub fn constant_function<'e>(ctx: &CheckContext<'_>, expr: &'e Expr) -> Option<&'e Expr> {
    let expr = expr.strip_parens();
    match &expr.value {
        Expr_::Application(items)
            if items.len() == 2 && ctx.is_reference(&items[0], "Basics", "always") =>
        {
            Some(&items[1])
        }
        Expr_::Lambda { parameters, body }
            if parameters.len() == 1 && parameters[0].value.ignores_value() =>
        {
            Some(body)
        }
        _ => None,
    }
}

/// Is `expr` a one-argument function that always returns `constant`?
pub fn is_always_constant(ctx: &CheckContext<'_>, expr: &Expr, constant: &Expr) -> bool {
    constant_function(ctx, expr).is_some_and(|c| are_equal(ctx, c, constant))
}

/// Is `expr` a function that always returns the boolean `value`?
pub fn is_always_bool(ctx: &CheckContext<'_>, expr: &Expr, value: bool) -> bool {
    constant_function(ctx, expr).is_some_and(|c| as_bool(ctx, c) == Some(value))
}

/// Is `expr` a reference to the constructor or value `module.name`?
pub fn is_value(ctx: &CheckContext<'_>, expr: &Expr, module: &str, name: &str) -> bool {
    ctx.is_reference(expr, module, name)
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

/// How a call was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallForm {
    /// `f a b`
    Direct,
    /// `b |> f a`
    PipeRight,
    /// `f a <| b`
    PipeLeft,
}

/// A call to a resolved function, independent of how it was written.
#[derive(Debug, Clone)]
pub struct CallInfo<'e> {
    pub function: ResolvedName,
    /// Range of the function reference.
    pub fn_range: Range,
    /// Arguments in application order.
    pub args: Vec<&'e Expr>,
    pub form: CallForm,
    /// Range of the whole call expression.
    pub range: Range,
}

impl<'e> CallInfo<'e> {
    /// Normalize `f a b`, `b |> f a` and `f a <| b`. A bare reference is a
    /// call with no arguments.
    pub fn from_node(ctx: &CheckContext<'_>, expr: &'e Expr) -> Option<Self> {
        let range = expr.range;
        let expr = expr.strip_parens();
        match &expr.value {
            Expr_::Variable(name) => Some(Self {
                function: ctx.resolve_name(name)?,
                fn_range: expr.range,
                args: Vec::new(),
                form: CallForm::Direct,
                range,
            }),
            Expr_::Application(items) => {
                let (head, rest) = items.split_first()?;
                let mut call = Self::from_node(ctx, head)?;
                if call.form != CallForm::Direct {
                    return None;
                }
                call.args.extend(rest);
                call.range = range;
                Some(call)
            }
            Expr_::Operator {
                operator,
                left,
                right,
            } => {
                let (function, argument, form) = match operator.as_str() {
                    "|>" => (right, left, CallForm::PipeRight),
                    "<|" => (left, right, CallForm::PipeLeft),
                    _ => return None,
                };
                let mut call = Self::from_node(ctx, function)?;
                if call.form != CallForm::Direct {
                    return None;
                }
                call.args.push(argument);
                call.form = form;
                call.range = range;
                Some(call)
            }
            _ => None,
        }
    }

    pub fn is(&self, module: &str, name: &str) -> bool {
        self.function.is(module, name)
    }

    pub fn arg(&self, index: usize) -> Option<&'e Expr> {
        self.args.get(index).copied()
    }

    /// The last argument, usually the data structure being operated on.
    pub fn last_arg(&self) -> Option<&'e Expr> {
        self.args.last().copied()
    }

    /// Is the argument at `index` written right after the function name, so
    /// that `fn_range.start..arg.end` covers exactly `f arg`?
    pub fn arg_is_adjacent(&self, index: usize) -> bool {
        match self.form {
            CallForm::Direct => index < self.args.len(),
            CallForm::PipeRight | CallForm::PipeLeft => index + 1 < self.args.len(),
        }
    }
}

/// `Some(args)` when `expr` is a call to `module.name` (possibly piped).
pub fn call_to<'e>(
    ctx: &CheckContext<'_>,
    expr: &'e Expr,
    module: &str,
    name: &str,
) -> Option<Vec<&'e Expr>> {
    CallInfo::from_node(ctx, expr)
        .filter(|call| call.is(module, name))
        .map(|call| call.args)
}

// ---------------------------------------------------------------------------
// Composition chains
// ---------------------------------------------------------------------------

/// A `>>` or `<<` chain flattened into its terms, in source order.
///
/// Parenthesized sub-chains stay single terms.
#[derive(Debug, Clone)]
pub struct CompositionChain<'e> {
    pub operator: &'e str,
    pub terms: Vec<&'e Expr>,
    pub range: Range,
}

impl<'e> CompositionChain<'e> {
    pub fn flatten(expr: &'e Expr) -> Option<Self> {
        let Expr_::Operator { operator, .. } = &expr.value else {
            return None;
        };
        if operator != ">>" && operator != "<<" {
            return None;
        }
        let mut terms = Vec::new();
        collect_terms(expr, operator, &mut terms);
        Some(Self {
            operator,
            terms,
            range: expr.range,
        })
    }

    /// Terms in the order they are applied to the argument.
    pub fn application_order(&self) -> Vec<&'e Expr> {
        if self.operator == ">>" {
            self.terms.clone()
        } else {
            self.terms.iter().rev().copied().collect()
        }
    }

    /// Edits removing the terms `first..=last` (source order) while keeping
    /// the chain well formed. Removing every term leaves `replacement`.
    pub fn remove_terms(&self, first: usize, last: usize, replacement: &str) -> Vec<Edit> {
        let terms = &self.terms;
        if first == 0 && last + 1 == terms.len() {
            return vec![Edit::replace(self.range, replacement)];
        }
        if last + 1 < terms.len() {
            vec![Edit::remove(Range::new(
                terms[first].range.start,
                terms[last + 1].range.start,
            ))]
        } else {
            vec![Edit::remove(Range::new(
                terms[first - 1].range.end,
                terms[last].range.end,
            ))]
        }
    }
}

fn collect_terms<'e>(expr: &'e Expr, operator: &str, out: &mut Vec<&'e Expr>) {
    match &expr.value {
        Expr_::Operator {
            operator: op,
            left,
            right,
        } if op == operator => {
            collect_terms(left, operator, out);
            collect_terms(right, operator, out);
        }
        _ => out.push(expr),
    }
}
