//! Module-level declarations

mod module;

pub use module::{
    Constructor, CustomType, Declaration, ExposedItem, Exposing, Import, Module, ValueDecl,
};
