//! Literal value types

use serde::{Deserialize, Serialize};

/// Literal values as written in source.
///
/// Booleans are not literals: `True`/`False` are constructors of `Basics`
/// and appear as [`Expr_::Variable`](super::Expr_::Variable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Decimal integer `42`
    Int(i64),
    /// Hexadecimal integer `0x2A`
    Hex(i64),
    /// Float `3.14`
    Float(FloatBits),
    /// String `"hello"` (escapes already resolved)
    String(String),
    /// Character `'a'`
    Char(char),
}

/// Float represented as bits for exact equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatBits(pub u64);

impl FloatBits {
    pub fn from_f64(v: f64) -> Self {
        Self(v.to_bits())
    }

    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl Literal {
    pub fn float(v: f64) -> Self {
        Self::Float(FloatBits::from_f64(v))
    }

    /// Integer value of an `Int` or `Hex` literal.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) | Self::Hex(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value of any number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) | Self::Hex(n) => Some(*n as f64),
            Self::Float(bits) => Some(bits.to_f64()),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Value equality: `0x10 == 16`, `1.0 == 1.0`; numbers never equal strings.
    pub fn same_value(&self, other: &Literal) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Float(_), Self::Int(_) | Self::Hex(_))
            | (Self::Int(_) | Self::Hex(_), Self::Float(_)) => false,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}
