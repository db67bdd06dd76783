//! Expression types (17 variants)

use serde::{Deserialize, Serialize};

use super::literal::Literal;
use super::location::{Node, Range};
use super::pattern::Pattern;
use crate::name::QualifiedName;

/// Expression with source location
pub type Expr = Node<Expr_>;

/// Expression underlying type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr_ {
    // === Atoms ===
    /// Unit `()`
    Unit,
    /// Number, string or char literal
    Literal(Literal),
    /// Value or constructor reference `x`, `List.map`, `True`
    Variable(QualifiedName),
    /// Operator used as a function `(+)`
    PrefixOperator(String),
    /// Field accessor function `.name`
    RecordAccessFunction(String),

    // === Compound ===
    /// Function application `f a b`; the first element is the function
    Application(Vec<Expr>),
    /// Binary operator `a + b`
    Operator {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Number negation `-x`
    Negation(Box<Expr>),
    /// `( expr )`
    Parenthesized(Box<Expr>),
    /// `[ a, b ]`
    List(Vec<Expr>),
    /// `( a, b )`
    Tuple(Vec<Expr>),
    /// `{ a = 1, b = 2 }`
    Record(Vec<RecordSetter>),
    /// `{ r | a = 1 }`
    RecordUpdate {
        base: Node<String>,
        setters: Vec<RecordSetter>,
    },
    /// `r.field`
    RecordAccess {
        record: Box<Expr>,
        field: Node<String>,
    },

    // === Control flow ===
    /// `if c then a else b`
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `case e of p -> b ...`
    Case {
        scrutinee: Box<Expr>,
        branches: Vec<CaseBranch>,
    },
    /// `\p q -> body`
    Lambda {
        parameters: Vec<Pattern>,
        body: Box<Expr>,
    },
}

/// Variant tag of [`Expr_`], used to key rule dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExprKind {
    Unit,
    Literal,
    Variable,
    PrefixOperator,
    RecordAccessFunction,
    Application,
    Operator,
    Negation,
    Parenthesized,
    List,
    Tuple,
    Record,
    RecordUpdate,
    RecordAccess,
    If,
    Case,
    Lambda,
}

impl ExprKind {
    pub fn all() -> &'static [ExprKind] {
        &[
            ExprKind::Unit,
            ExprKind::Literal,
            ExprKind::Variable,
            ExprKind::PrefixOperator,
            ExprKind::RecordAccessFunction,
            ExprKind::Application,
            ExprKind::Operator,
            ExprKind::Negation,
            ExprKind::Parenthesized,
            ExprKind::List,
            ExprKind::Tuple,
            ExprKind::Record,
            ExprKind::RecordUpdate,
            ExprKind::RecordAccess,
            ExprKind::If,
            ExprKind::Case,
            ExprKind::Lambda,
        ]
    }
}

/// A `field = value` pair inside a record or record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSetter {
    pub field: Node<String>,
    pub value: Expr,
}

impl RecordSetter {
    pub fn new(field: Node<String>, value: Expr) -> Self {
        Self { field, value }
    }

    /// From the field name to the end of the value.
    pub fn range(&self) -> Range {
        self.field.range.merge(self.value.range)
    }
}

/// One `pattern -> body` branch of a case expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBranch {
    pub pattern: Pattern,
    pub body: Expr,
}

impl CaseBranch {
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        Self { pattern, body }
    }
}

impl Expr_ {
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Unit => ExprKind::Unit,
            Self::Literal(_) => ExprKind::Literal,
            Self::Variable(_) => ExprKind::Variable,
            Self::PrefixOperator(_) => ExprKind::PrefixOperator,
            Self::RecordAccessFunction(_) => ExprKind::RecordAccessFunction,
            Self::Application(_) => ExprKind::Application,
            Self::Operator { .. } => ExprKind::Operator,
            Self::Negation(_) => ExprKind::Negation,
            Self::Parenthesized(_) => ExprKind::Parenthesized,
            Self::List(_) => ExprKind::List,
            Self::Tuple(_) => ExprKind::Tuple,
            Self::Record(_) => ExprKind::Record,
            Self::RecordUpdate { .. } => ExprKind::RecordUpdate,
            Self::RecordAccess { .. } => ExprKind::RecordAccess,
            Self::If { .. } => ExprKind::If,
            Self::Case { .. } => ExprKind::Case,
            Self::Lambda { .. } => ExprKind::Lambda,
        }
    }

    /// Can this expression appear as a function argument without parentheses?
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Self::Unit
                | Self::Literal(_)
                | Self::Variable(_)
                | Self::PrefixOperator(_)
                | Self::RecordAccessFunction(_)
                | Self::Parenthesized(_)
                | Self::List(_)
                | Self::Tuple(_)
                | Self::Record(_)
                | Self::RecordUpdate { .. }
                | Self::RecordAccess { .. }
        )
    }

    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Unit
            | Self::Literal(_)
            | Self::Variable(_)
            | Self::PrefixOperator(_)
            | Self::RecordAccessFunction(_) => vec![],
            Self::Application(items) | Self::List(items) | Self::Tuple(items) => {
                items.iter().collect()
            }
            Self::Operator { left, right, .. } => vec![left, right],
            Self::Negation(inner) | Self::Parenthesized(inner) => vec![inner],
            Self::Record(setters) | Self::RecordUpdate { setters, .. } => {
                setters.iter().map(|s| &s.value).collect()
            }
            Self::RecordAccess { record, .. } => vec![record],
            Self::If {
                condition,
                then_branch,
                else_branch,
            } => vec![condition, then_branch, else_branch],
            Self::Case {
                scrutinee,
                branches,
            } => {
                let mut children = Vec::with_capacity(branches.len() + 1);
                children.push(scrutinee.as_ref());
                children.extend(branches.iter().map(|b| &b.body));
                children
            }
            Self::Lambda { body, .. } => vec![body],
        }
    }
}

impl Expr {
    /// The expression with any number of surrounding parentheses removed.
    pub fn strip_parens(&self) -> &Expr {
        match &self.value {
            Expr_::Parenthesized(inner) => inner.strip_parens(),
            _ => self,
        }
    }

    /// Do the direct children sit where any expression fits without
    /// parentheses?
    ///
    /// Operands, application items, negated values and accessed records do
    /// not; everything else (branch bodies, list elements, ...) does.
    pub fn children_are_free(&self) -> bool {
        !matches!(
            &self.value,
            Expr_::Application(_)
                | Expr_::Operator { .. }
                | Expr_::Negation(_)
                | Expr_::RecordAccess { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Node::new(
            Expr_::Variable(QualifiedName::unqualified(name)),
            Range::default(),
        )
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Expr_::Unit.kind(), ExprKind::Unit);
        assert_eq!(var("x").value.kind(), ExprKind::Variable);
        assert_eq!(ExprKind::all().len(), 17);
    }

    #[test]
    fn test_strip_parens_nested() {
        let inner = var("x");
        let wrapped = Node::new(
            Expr_::Parenthesized(Box::new(Node::new(
                Expr_::Parenthesized(Box::new(inner.clone())),
                Range::default(),
            ))),
            Range::default(),
        );
        assert_eq!(wrapped.strip_parens(), &inner);
    }

    #[test]
    fn test_children_in_source_order() {
        let app = Expr_::Application(vec![var("f"), var("a"), var("b")]);
        let names: Vec<_> = app
            .children()
            .iter()
            .map(|c| match &c.value {
                Expr_::Variable(n) => n.name.clone(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(names, vec!["f", "a", "b"]);
    }

    #[test]
    fn test_atomic() {
        assert!(var("x").value.is_atomic());
        assert!(!Expr_::Application(vec![var("f"), var("x")]).is_atomic());
        assert!(!Expr_::Negation(Box::new(var("x"))).is_atomic());
    }
}
