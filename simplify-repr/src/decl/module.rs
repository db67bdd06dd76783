//! Module, import and declaration types

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Node, Pattern};
use crate::name::ModuleName;

/// A parsed source module together with the text it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: Node<ModuleName>,
    pub exposing: Exposing,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
    /// Original source text; fixes are computed against it.
    pub source: String,
}

impl Module {
    /// Value declarations in source order.
    pub fn values(&self) -> impl Iterator<Item = &ValueDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Value(v) => Some(v),
            Declaration::CustomType(_) => None,
        })
    }

    /// Custom type declarations in source order.
    pub fn custom_types(&self) -> impl Iterator<Item = &CustomType> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::CustomType(t) => Some(t),
            Declaration::Value(_) => None,
        })
    }

    /// Is `name` (a value or constructor) visible to importers of this module?
    pub fn exposes_value(&self, name: &str) -> bool {
        match &self.exposing {
            Exposing::All => {
                self.values().any(|v| v.name.value == name)
                    || self
                        .custom_types()
                        .any(|t| t.constructors.iter().any(|c| c.value.name == name))
            }
            Exposing::Explicit(items) => items.iter().any(|item| match item {
                ExposedItem::Value(v) => v == name,
                ExposedItem::Type { name: ty, open: true } => self
                    .custom_types()
                    .filter(|t| &t.name.value == ty)
                    .any(|t| t.constructors.iter().any(|c| c.value.name == name)),
                ExposedItem::Type { .. } | ExposedItem::Operator(_) => false,
            }),
        }
    }
}

/// An exposing list: `exposing (..)` or `exposing (a, T(..))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exposing {
    All,
    Explicit(Vec<ExposedItem>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExposedItem {
    /// `value`
    Value(String),
    /// `Type` or `Type(..)` when `open`
    Type { name: String, open: bool },
    /// `(+)`
    Operator(String),
}

/// `import A.B as C exposing (..)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub module: Node<ModuleName>,
    pub alias: Option<ModuleName>,
    pub exposing: Option<Exposing>,
}

impl Import {
    pub fn new(module: Node<ModuleName>, alias: Option<ModuleName>, exposing: Option<Exposing>) -> Self {
        Self {
            module,
            alias,
            exposing,
        }
    }

    /// The prefix used to reference this module's values qualified.
    pub fn qualifier(&self) -> &ModuleName {
        self.alias.as_ref().unwrap_or(&self.module.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Value(ValueDecl),
    CustomType(CustomType),
}

/// `name arg1 arg2 = body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDecl {
    pub name: Node<String>,
    pub arguments: Vec<Pattern>,
    pub body: Expr,
}

/// `type T a = A | B a`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomType {
    pub name: Node<String>,
    pub constructors: Vec<Node<Constructor>>,
}

impl CustomType {
    pub fn constructor_names(&self) -> Vec<String> {
        self.constructors.iter().map(|c| c.value.name.clone()).collect()
    }
}

/// One variant of a custom type. Argument types are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    pub arity: usize,
}
