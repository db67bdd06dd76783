//! Simplification infrastructure.

pub mod catalog;
pub mod context;
mod emitter;
mod engine;
pub mod fix_applicator;
pub mod knowledge;
pub mod lookup;
pub mod normalize;
pub mod rules;
pub mod source;
#[cfg(test)]
mod test_support;

pub use catalog::all_rules;
pub use emitter::conflicting_edits;
pub use engine::{ModuleReport, Project, ProjectModule, Simplifier};
pub use fix_applicator::{apply_all_fixes, apply_edits, apply_fix};
pub use knowledge::{ModuleInterface, ProjectIndex, ProjectKnowledge, TypeName};
pub use rules::{Edit, Finding, Rule, RuleCode};
