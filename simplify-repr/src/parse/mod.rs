//! Fixture reader: source text to ranged AST.
//!
//! Covers the surface syntax the simplifier reasons about: module header,
//! imports, custom types, value declarations (annotations are skipped) and
//! every expression and pattern form of [`Expr_`](crate::expr::Expr_).
//! `let` blocks are rejected.

mod lexer;
mod parser;

use crate::decl::Module;
use crate::error::{ParseError, ParseResult};
use crate::expr::Expr;

/// Parse a whole module.
pub fn parse_module(source: &str) -> ParseResult<Module> {
    let tokens = lexer::tokenize(source)?;
    parser::Parser::new(&tokens).module(source)
}

/// Parse a single expression spanning the whole input.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = parser::Parser::new(&tokens);
    let expr = parser.expression(0)?;
    match tokens.iter().find(|t| t.range.start >= expr.range.end) {
        Some(token) if token.kind != lexer::TokenKind::Eof => Err(ParseError::Unexpected {
            location: token.range.start,
            found: token.kind.describe(),
            expected: "end of input",
        }),
        _ => Ok(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Declaration, ExposedItem, Exposing};
    use crate::expr::{Expr_, Literal, Pattern_, Range};

    fn body(source: &str) -> Expr {
        let module = parse_module(source).unwrap();
        let body = module.values().next().unwrap().body.clone();
        body
    }

    fn operator_of(expr: &Expr) -> (&str, &Expr, &Expr) {
        match &expr.value {
            Expr_::Operator {
                operator,
                left,
                right,
            } => (operator.as_str(), left, right),
            other => panic!("expected operator, got {other:?}"),
        }
    }

    // =========================================================================
    // Module structure
    // =========================================================================

    #[test]
    fn test_module_header_and_imports() {
        let module = parse_module(
            "module A exposing (a, T(..), (+))\nimport Html.Attributes as Attr exposing (class)\nimport Set\na = 1\n",
        )
        .unwrap();
        assert!(module.name.value.is("A"));
        assert_eq!(
            module.exposing,
            Exposing::Explicit(vec![
                ExposedItem::Value("a".into()),
                ExposedItem::Type {
                    name: "T".into(),
                    open: true
                },
                ExposedItem::Operator("+".into()),
            ])
        );
        assert_eq!(module.imports.len(), 2);
        assert!(module.imports[0].module.value.is("Html.Attributes"));
        assert!(module.imports[0].qualifier().is("Attr"));
        assert!(module.imports[1].qualifier().is("Set"));
    }

    #[test]
    fn test_custom_types_and_annotations() {
        let module = parse_module(
            "module A exposing (..)\ntype alias R = { a : Int }\ntype T a\n    = B\n    | C (List a) Int\nf : Int -> Int\nf x = x\n",
        )
        .unwrap();
        assert_eq!(module.declarations.len(), 2);
        match &module.declarations[0] {
            Declaration::CustomType(t) => {
                assert_eq!(t.name.value, "T");
                assert_eq!(t.constructor_names(), vec!["B", "C"]);
                assert_eq!(t.constructors[1].value.arity, 2);
            }
            other => panic!("expected type, got {other:?}"),
        }
        let f = module.values().next().unwrap();
        assert_eq!(f.name.value, "f");
        assert_eq!(f.arguments.len(), 1);
    }

    #[test]
    fn test_let_is_rejected() {
        let err = parse_module("a =\n    let\n        b = 1\n    in\n    b\n").unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { construct: "let", .. }));
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    #[test]
    fn test_operator_precedence() {
        let expr = parse_expression("a || b && c == d + e * f").unwrap();
        let (op, _, right) = operator_of(&expr);
        assert_eq!(op, "||");
        let (op, _, right) = operator_of(right);
        assert_eq!(op, "&&");
        let (op, _, right) = operator_of(right);
        assert_eq!(op, "==");
        let (op, _, right) = operator_of(right);
        assert_eq!(op, "+");
        assert_eq!(operator_of(right).0, "*");
    }

    #[test]
    fn test_pipe_is_left_associative() {
        let expr = parse_expression("x |> f |> g").unwrap();
        let (_, left, right) = operator_of(&expr);
        assert_eq!(operator_of(left).0, "|>");
        assert!(matches!(right.value, Expr_::Variable(_)));
    }

    #[test]
    fn test_composition_is_right_associative() {
        let expr = parse_expression("f >> g >> h").unwrap();
        let (_, left, right) = operator_of(&expr);
        assert!(matches!(left.value, Expr_::Variable(_)));
        assert_eq!(operator_of(right).0, ">>");
    }

    #[test]
    fn test_application_ranges() {
        let expr = parse_expression("List.map f [ 1, 2 ]").unwrap();
        assert_eq!(expr.range, Range::from_coords(1, 1, 1, 20));
        match &expr.value {
            Expr_::Application(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[2].range, Range::from_coords(1, 12, 1, 20));
            }
            other => panic!("expected application, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_operator_unit_and_tuple() {
        assert!(matches!(
            parse_expression("(+)").unwrap().value,
            Expr_::PrefixOperator(ref op) if op == "+"
        ));
        assert!(matches!(parse_expression("()").unwrap().value, Expr_::Unit));
        assert!(matches!(
            parse_expression("( a, b )").unwrap().value,
            Expr_::Tuple(ref items) if items.len() == 2
        ));
    }

    #[test]
    fn test_negation() {
        let expr = parse_expression("-(-n)").unwrap();
        match &expr.value {
            Expr_::Negation(inner) => {
                assert!(matches!(inner.value, Expr_::Parenthesized(_)));
            }
            other => panic!("expected negation, got {other:?}"),
        }
        assert_eq!(operator_of(&parse_expression("a - 1").unwrap()).0, "-");
    }

    #[test]
    fn test_record_forms() {
        let expr = parse_expression("{ r | a = r.a, b = 1 }").unwrap();
        match &expr.value {
            Expr_::RecordUpdate { base, setters } => {
                assert_eq!(base.value, "r");
                assert_eq!(setters.len(), 2);
                assert_eq!(setters[0].range(), Range::from_coords(1, 7, 1, 14));
                match &setters[0].value.value {
                    Expr_::RecordAccess { field, .. } => {
                        assert_eq!(field.value, "a");
                        assert_eq!(field.range, Range::from_coords(1, 13, 1, 14));
                    }
                    other => panic!("expected access, got {other:?}"),
                }
            }
            other => panic!("expected record update, got {other:?}"),
        }
        assert!(matches!(
            parse_expression(".name").unwrap().value,
            Expr_::RecordAccessFunction(ref f) if f == "name"
        ));
    }

    #[test]
    fn test_if_and_lambda() {
        let expr = parse_expression("if c then \\_ -> 1 else \\() -> 2.5").unwrap();
        match &expr.value {
            Expr_::If { else_branch, .. } => match &else_branch.value {
                Expr_::Lambda { parameters, body } => {
                    assert_eq!(parameters[0].value, Pattern_::Unit);
                    assert_eq!(body.value, Expr_::Literal(Literal::float(2.5)));
                }
                other => panic!("expected lambda, got {other:?}"),
            },
            other => panic!("expected if, got {other:?}"),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn test_case_branches_by_column() {
        let expr = body("a = case x of\n True -> 1\n False ->\n    f\n      2\n");
        match &expr.value {
            Expr_::Case { branches, .. } => {
                assert_eq!(branches.len(), 2);
                assert!(matches!(branches[1].body.value, Expr_::Application(_)));
                assert_eq!(expr.range, Range::from_coords(1, 5, 5, 8));
            }
            other => panic!("expected case, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_case_ends_at_outer_branch() {
        let source = "a =\n    case x of\n        A ->\n            case y of\n                B -> 1\n                C -> 2\n        D -> 3\n";
        match &body(source).value {
            Expr_::Case { branches, .. } => {
                assert_eq!(branches.len(), 2);
                match &branches[0].body.value {
                    Expr_::Case { branches: inner, .. } => assert_eq!(inner.len(), 2),
                    other => panic!("expected inner case, got {other:?}"),
                }
            }
            other => panic!("expected case, got {other:?}"),
        }
    }

    #[test]
    fn test_declarations_split_at_column_one() {
        let module = parse_module("a = f\n    x\nb = 2\n").unwrap();
        let values: Vec<_> = module.values().collect();
        assert_eq!(values.len(), 2);
        assert!(matches!(values[0].body.value, Expr_::Application(_)));
    }

    #[test]
    fn test_patterns() {
        let expr = parse_expression("case v of\n Just (a, _) :: rest as all -> 1\n").unwrap();
        match &expr.value {
            Expr_::Case { branches, .. } => match &branches[0].pattern.value {
                Pattern_::As(inner, name) => {
                    assert_eq!(name.value, "all");
                    assert!(matches!(inner.value, Pattern_::Cons(_, _)));
                    assert_eq!(branches[0].pattern.value.bound_vars(), vec!["a", "rest", "all"]);
                }
                other => panic!("expected alias pattern, got {other:?}"),
            },
            other => panic!("expected case, got {other:?}"),
        }
    }
}
