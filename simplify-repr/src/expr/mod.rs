//! Expression and pattern types with source location tracking.

mod expression;
mod literal;
mod location;
mod pattern;

pub use expression::{CaseBranch, Expr, ExprKind, Expr_, RecordSetter};
pub use literal::{FloatBits, Literal};
pub use location::{Location, Node, Range};
pub use pattern::{Pattern, Pattern_};
