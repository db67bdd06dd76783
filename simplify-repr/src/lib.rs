//! Ranged syntax tree for an Elm-like functional language.
//!
//! Every node carries the exact source range it was read from so that
//! simplification rules can express fixes as text edits.
//!
//! # Layout
//! - [`expr`] - expressions, patterns, literals, locations
//! - [`decl`] - modules, imports, declarations
//! - [`name`] - module paths and qualified/resolved names
//! - [`parse`] - fixture reader producing the above from source text

pub mod decl;
pub mod expr;
pub mod name;
pub mod parse;
mod error;

pub use decl::{
    Constructor, CustomType, Declaration, ExposedItem, Exposing, Import, Module, ValueDecl,
};
pub use error::{ParseError, ParseResult};
pub use expr::{
    CaseBranch, Expr, ExprKind, Expr_, FloatBits, Literal, Location, Node, Pattern, Pattern_,
    Range, RecordSetter,
};
pub use name::{ModuleName, QualifiedName, ResolvedName};
pub use parse::{parse_expression, parse_module};
