//! Pattern types for case branches, lambda parameters and declaration arguments

use serde::{Deserialize, Serialize};

use super::literal::Literal;
use super::location::Node;
use crate::name::QualifiedName;

/// Pattern with source location
pub type Pattern = Node<Pattern_>;

/// Pattern underlying type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern_ {
    /// Wildcard `_`
    Wild,
    /// Unit `()`
    Unit,
    /// Variable binding `x`
    Var(String),
    /// Literal `1`, `"s"`, `'c'`
    Lit(Literal),
    /// Constructor `Just x`, `Maybe.Nothing`
    Constructor {
        name: QualifiedName,
        args: Vec<Pattern>,
    },
    /// Tuple `( a, b )`
    Tuple(Vec<Pattern>),
    /// List `[ a, b ]`
    List(Vec<Pattern>),
    /// Cons `head :: tail`
    Cons(Box<Pattern>, Box<Pattern>),
    /// Record destructuring `{ a, b }`
    Record(Vec<Node<String>>),
    /// Alias `pattern as name`
    As(Box<Pattern>, Node<String>),
    /// Parenthesized `( pattern )`
    Paren(Box<Pattern>),
}

impl Pattern_ {
    /// The pattern with any number of surrounding parentheses removed.
    pub fn strip_parens(&self) -> &Pattern_ {
        match self {
            Self::Paren(inner) => inner.value.strip_parens(),
            other => other,
        }
    }

    /// Does this pattern match without inspecting or binding the value?
    ///
    /// True for `_` and `()`, and for tuples, parentheses and constructors
    /// made only of those. A constructor pattern still selects a variant, so
    /// callers that need a catch-all also check [`Pattern_::constructors`].
    pub fn ignores_value(&self) -> bool {
        match self {
            Self::Wild | Self::Unit => true,
            Self::Paren(p) => p.value.ignores_value(),
            Self::Tuple(pats) | Self::Constructor { args: pats, .. } => {
                pats.iter().all(|p| p.value.ignores_value())
            }
            _ => false,
        }
    }

    /// Does this pattern match every value without binding anything?
    ///
    /// `_`, `()`, and tuples or parentheses made only of those.
    pub fn is_catch_all(&self) -> bool {
        match self {
            Self::Wild | Self::Unit => true,
            Self::Paren(p) => p.value.is_catch_all(),
            Self::Tuple(pats) => pats.iter().all(|p| p.value.is_catch_all()),
            _ => false,
        }
    }

    /// Get all bound variable names, in source order
    pub fn bound_vars(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        self.collect_bound_vars(&mut vars);
        vars
    }

    fn collect_bound_vars<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Wild | Self::Unit | Self::Lit(_) => {}
            Self::Var(name) => out.push(name),
            Self::Record(fields) => out.extend(fields.iter().map(|f| f.value.as_str())),
            Self::As(p, name) => {
                p.value.collect_bound_vars(out);
                out.push(&name.value);
            }
            Self::Constructor { args, .. } => {
                for arg in args {
                    arg.value.collect_bound_vars(out);
                }
            }
            Self::Tuple(pats) | Self::List(pats) => {
                for p in pats {
                    p.value.collect_bound_vars(out);
                }
            }
            Self::Cons(head, tail) => {
                head.value.collect_bound_vars(out);
                tail.value.collect_bound_vars(out);
            }
            Self::Paren(p) => p.value.collect_bound_vars(out),
        }
    }

    /// All constructor references in the pattern, outermost first.
    pub fn constructors(&self) -> Vec<&QualifiedName> {
        let mut names = Vec::new();
        self.collect_constructors(&mut names);
        names
    }

    fn collect_constructors<'a>(&'a self, out: &mut Vec<&'a QualifiedName>) {
        match self {
            Self::Constructor { name, args } => {
                out.push(name);
                for arg in args {
                    arg.value.collect_constructors(out);
                }
            }
            Self::Tuple(pats) | Self::List(pats) => {
                for p in pats {
                    p.value.collect_constructors(out);
                }
            }
            Self::Cons(head, tail) => {
                head.value.collect_constructors(out);
                tail.value.collect_constructors(out);
            }
            Self::As(p, _) | Self::Paren(p) => p.value.collect_constructors(out),
            Self::Wild | Self::Unit | Self::Var(_) | Self::Lit(_) | Self::Record(_) => {}
        }
    }

    /// Structural equality ignoring source ranges.
    pub fn same_shape(&self, other: &Pattern_) -> bool {
        fn all_same(a: &[Pattern], b: &[Pattern]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.value.same_shape(&y.value))
        }

        match (self.strip_parens(), other.strip_parens()) {
            (Self::Wild, Self::Wild) | (Self::Unit, Self::Unit) => true,
            (Self::Var(a), Self::Var(b)) => a == b,
            (Self::Lit(a), Self::Lit(b)) => a.same_value(b),
            (
                Self::Constructor { name: n1, args: a1 },
                Self::Constructor { name: n2, args: a2 },
            ) => n1 == n2 && all_same(a1, a2),
            (Self::Tuple(a), Self::Tuple(b)) | (Self::List(a), Self::List(b)) => all_same(a, b),
            (Self::Cons(h1, t1), Self::Cons(h2, t2)) => {
                h1.value.same_shape(&h2.value) && t1.value.same_shape(&t2.value)
            }
            (Self::Record(a), Self::Record(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.value == y.value)
            }
            (Self::As(p1, n1), Self::As(p2, n2)) => n1.value == n2.value && p1.value.same_shape(&p2.value),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Range;

    fn at(p: Pattern_) -> Pattern {
        Node::new(p, Range::default())
    }

    #[test]
    fn test_ignores_value() {
        assert!(Pattern_::Wild.ignores_value());
        assert!(Pattern_::Unit.ignores_value());
        assert!(Pattern_::Paren(Box::new(at(Pattern_::Wild))).ignores_value());
        assert!(Pattern_::Tuple(vec![at(Pattern_::Wild), at(Pattern_::Unit)]).ignores_value());
        assert!(!Pattern_::Var("x".into()).ignores_value());
        assert!(!Pattern_::Lit(Literal::Int(1)).ignores_value());
        let just_wild = Pattern_::Constructor {
            name: QualifiedName::unqualified("Just"),
            args: vec![at(Pattern_::Wild)],
        };
        assert!(just_wild.ignores_value());
        let just_var = Pattern_::Constructor {
            name: QualifiedName::unqualified("Just"),
            args: vec![at(Pattern_::Var("x".into()))],
        };
        assert!(!just_var.ignores_value());
    }

    #[test]
    fn test_is_catch_all() {
        assert!(Pattern_::Wild.is_catch_all());
        assert!(Pattern_::Tuple(vec![at(Pattern_::Wild), at(Pattern_::Unit)]).is_catch_all());
        assert!(Pattern_::Paren(Box::new(at(Pattern_::Wild))).is_catch_all());
        assert!(!Pattern_::Lit(Literal::Int(1)).is_catch_all());
        assert!(!Pattern_::Var("x".into()).is_catch_all());
        let just_wild = Pattern_::Constructor {
            name: QualifiedName::unqualified("Just"),
            args: vec![at(Pattern_::Wild)],
        };
        assert!(!just_wild.is_catch_all());
        assert!(!Pattern_::Tuple(vec![at(just_wild), at(Pattern_::Wild)]).is_catch_all());
    }

    #[test]
    fn test_bound_vars() {
        let pattern = Pattern_::Constructor {
            name: QualifiedName::unqualified("Just"),
            args: vec![at(Pattern_::Tuple(vec![
                at(Pattern_::Var("a".into())),
                at(Pattern_::Wild),
                at(Pattern_::As(
                    Box::new(at(Pattern_::Var("b".into()))),
                    Node::new("c".into(), Range::default()),
                )),
            ]))],
        };
        assert_eq!(pattern.bound_vars(), vec!["a", "b", "c"]);
        assert!(Pattern_::Wild.bound_vars().is_empty());
    }

    #[test]
    fn test_constructors_are_collected_outermost_first() {
        let pattern = Pattern_::Constructor {
            name: QualifiedName::unqualified("Just"),
            args: vec![at(Pattern_::Constructor {
                name: QualifiedName::unqualified("Nothing"),
                args: vec![],
            })],
        };
        let names: Vec<String> = pattern.constructors().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["Just", "Nothing"]);
    }

    #[test]
    fn test_same_shape_ignores_parens_and_ranges() {
        let a = Pattern_::Paren(Box::new(Node::new(
            Pattern_::Var("x".into()),
            Range::from_coords(1, 1, 1, 2),
        )));
        let b = Pattern_::Var("x".into());
        assert!(a.same_shape(&b));
        assert!(!b.same_shape(&Pattern_::Var("y".into())));
    }
}
