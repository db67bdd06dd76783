//! Read-only context handed to every rule evaluation, plus the fix helpers
//! rules build their edits with.

use simplify_repr::{Expr, Expr_, QualifiedName, Range, ResolvedName};

use super::knowledge::{ProjectKnowledge, TypeName};
use super::lookup::ModuleLookup;
use super::rules::Edit;
use super::source::SourceText;

/// Everything that stays fixed while one module is analyzed.
pub struct ModuleContext<'a> {
    pub source: SourceText<'a>,
    pub lookup: ModuleLookup<'a>,
    pub knowledge: &'a dyn ProjectKnowledge,
    /// Types whose case expressions are never collapsed.
    pub ignored_types: &'a [TypeName],
}

/// Context for one node.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    module: &'a ModuleContext<'a>,
    /// Pattern-bound variables in scope at this node.
    scope: &'a [String],
    /// Whether the node sits where any expression fits without parentheses.
    free: bool,
}

impl<'a> CheckContext<'a> {
    pub fn new(module: &'a ModuleContext<'a>, scope: &'a [String], free: bool) -> Self {
        Self {
            module,
            scope,
            free,
        }
    }

    pub fn knowledge(&self) -> &'a dyn ProjectKnowledge {
        self.module.knowledge
    }

    pub fn ignored_types(&self) -> &'a [TypeName] {
        self.module.ignored_types
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    // -----------------------------------------------------------------------
    // Names
    // -----------------------------------------------------------------------

    pub fn resolve_name(&self, name: &QualifiedName) -> Option<ResolvedName> {
        if !name.is_qualified() && self.scope.iter().any(|s| *s == name.name) {
            return None;
        }
        self.module.lookup.resolve(name)
    }

    /// Resolve a variable reference, looking through parentheses.
    pub fn resolve(&self, expr: &Expr) -> Option<ResolvedName> {
        match &expr.strip_parens().value {
            Expr_::Variable(name) => self.resolve_name(name),
            _ => None,
        }
    }

    /// Is `expr` a reference to `module.name`?
    pub fn is_reference(&self, expr: &Expr, module: &str, name: &str) -> bool {
        self.resolve(expr).is_some_and(|r| r.is(module, name))
    }

    /// How to write `module.name` at this node.
    pub fn qualify(&self, module: &str, name: &str) -> String {
        self.module.lookup.qualify(module, name, self.scope)
    }

    // -----------------------------------------------------------------------
    // Source text
    // -----------------------------------------------------------------------

    pub fn text(&self, range: Range) -> &'a str {
        self.module.source.extract(range)
    }

    /// Source of `expr`, parenthesized unless it can stand as an argument.
    pub fn arg_text(&self, expr: &Expr) -> String {
        let text = self.text(expr.range);
        if expr.value.is_atomic() {
            text.to_string()
        } else {
            format!("({text})")
        }
    }

    // -----------------------------------------------------------------------
    // Fix helpers
    // -----------------------------------------------------------------------

    /// Replace the node at `whole` by `text`, adding parentheses when the
    /// node is not in a free position and `text` is not atomic.
    pub fn replace_by(&self, whole: Range, text: impl Into<String>, atomic: bool) -> Edit {
        let text = text.into();
        if self.free || atomic {
            Edit::replace(whole, text)
        } else {
            Edit::replace(whole, format!("({text})"))
        }
    }

    /// Shrink the node at `whole` down to `kept`, a sub-expression of it.
    /// Only the text around `kept` is touched, so nested findings inside
    /// `kept` stay valid.
    pub fn keep_only(&self, whole: Range, kept: &Expr) -> Vec<Edit> {
        let before = Range::new(whole.start, kept.range.start);
        let after = Range::new(kept.range.end, whole.end);
        let wrap = !self.free && !kept.value.is_atomic();
        let mut edits = Vec::with_capacity(2);
        match (wrap, before.is_empty()) {
            (true, true) => edits.push(Edit::insert(kept.range.start, "(")),
            (true, false) => edits.push(Edit::replace(before, "(")),
            (false, false) => edits.push(Edit::remove(before)),
            (false, true) => {}
        }
        match (wrap, after.is_empty()) {
            (true, true) => edits.push(Edit::insert(kept.range.end, ")")),
            (true, false) => edits.push(Edit::replace(after, ")")),
            (false, false) => edits.push(Edit::remove(after)),
            (false, true) => {}
        }
        edits
    }
}

/// Remove the items flagged in `remove` from a comma-separated sequence,
/// taking the separators with them. Runs of removed items become a single
/// edit; a run at the end eats the separator before it. At least one item
/// must be kept.
pub fn remove_items(items: &[Range], remove: &[bool]) -> Vec<Edit> {
    let mut edits = Vec::new();
    let mut i = 0;
    while i < items.len() {
        if !remove[i] {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < items.len() && remove[i] {
            i += 1;
        }
        let run_end = i - 1;
        if i < items.len() {
            edits.push(Edit::remove(Range::new(items[run_start].start, items[i].start)));
        } else if run_start > 0 {
            edits.push(Edit::remove(Range::new(
                items[run_start - 1].end,
                items[run_end].end,
            )));
        }
    }
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::fix_applicator::apply_edits;
    use crate::lint::knowledge::ProjectIndex;
    use simplify_repr::{parse_module, Declaration};

    fn body(module: &simplify_repr::Module) -> &Expr {
        match &module.declarations[0] {
            Declaration::Value(v) => &v.body,
            Declaration::CustomType(_) => panic!("expected value"),
        }
    }

    fn with_context<R>(source: &str, free: bool, f: impl FnOnce(&Expr, &CheckContext<'_>) -> R) -> R {
        let module = parse_module(source).unwrap();
        let index = ProjectIndex::new();
        let module_ctx = ModuleContext {
            source: SourceText::new(&module.source),
            lookup: ModuleLookup::new(&module, &index),
            knowledge: &index,
            ignored_types: &[],
        };
        let ctx = CheckContext::new(&module_ctx, &[], free);
        f(body(&module), &ctx)
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn test_resolve_through_parens() {
        with_context("a = (identity)", true, |expr, ctx| {
            assert!(ctx.is_reference(expr, "Basics", "identity"));
        });
    }

    #[test]
    fn test_scope_shadows_names() {
        let module = parse_module("a = identity").unwrap();
        let index = ProjectIndex::new();
        let module_ctx = ModuleContext {
            source: SourceText::new(&module.source),
            lookup: ModuleLookup::new(&module, &index),
            knowledge: &index,
            ignored_types: &[],
        };
        let scope = vec!["identity".to_string()];
        let ctx = CheckContext::new(&module_ctx, &scope, true);
        assert!(ctx.resolve(body(&module)).is_none());
        assert_eq!(ctx.qualify("Basics", "identity"), "Basics.identity");
    }

    // =========================================================================
    // Fix helpers
    // =========================================================================

    #[test]
    fn test_keep_only_free_position() {
        let source = "a = not (not x)";
        with_context(source, true, |expr, ctx| {
            let Expr_::Application(items) = &expr.value else { panic!() };
            let Expr_::Application(inner) = &items[1].strip_parens().value else { panic!() };
            let edits = ctx.keep_only(expr.range, &inner[1]);
            assert_eq!(apply_edits(source, &edits).unwrap(), "a = x");
        });
    }

    #[test]
    fn test_keep_only_wraps_when_not_free() {
        let source = "a = identity (f x)";
        with_context(source, false, |expr, ctx| {
            let Expr_::Application(items) = &expr.value else { panic!() };
            let kept = items[1].strip_parens();
            let edits = ctx.keep_only(expr.range, kept);
            assert_eq!(apply_edits(source, &edits).unwrap(), "a = (f x)");
        });
    }

    #[test]
    fn test_replace_by_wraps_non_atomic() {
        with_context("a = b", false, |expr, ctx| {
            assert_eq!(ctx.replace_by(expr.range, "not b", false).text(), "(not b)");
            assert_eq!(ctx.replace_by(expr.range, "[]", true).text(), "[]");
        });
    }

    #[test]
    fn test_arg_text() {
        with_context("a = f (g x) y", true, |expr, ctx| {
            let Expr_::Application(items) = &expr.value else { panic!() };
            assert_eq!(ctx.arg_text(&items[1]), "(g x)");
            assert_eq!(ctx.arg_text(items[1].strip_parens()), "(g x)");
            assert_eq!(ctx.arg_text(&items[2]), "y");
        });
    }

    #[test]
    fn test_remove_items_runs() {
        let source = "a = [ x, n, n, y, n ]";
        let ranges = [
            Range::from_coords(1, 7, 1, 8),
            Range::from_coords(1, 10, 1, 11),
            Range::from_coords(1, 13, 1, 14),
            Range::from_coords(1, 16, 1, 17),
            Range::from_coords(1, 19, 1, 20),
        ];
        let edits = remove_items(&ranges, &[false, true, true, false, true]);
        assert_eq!(apply_edits(source, &edits).unwrap(), "a = [ x, y ]");

        let edits = remove_items(&ranges, &[true, false, false, false, false]);
        assert_eq!(apply_edits(source, &edits).unwrap(), "a = [ n, n, y, n ]");
    }
}
