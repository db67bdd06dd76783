//! The simplification engine.
//!
//! Each module is walked once, top-down. At every node the rules registered
//! for that node's shape are tried in rule code order and the first one that
//! reports wins. Modules are independent and analyzed in parallel with rayon.

use std::path::PathBuf;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use simplify_repr::{Expr, ExprKind, Expr_, Module, ModuleName, Range};
use tracing::{debug, trace, warn};

use super::catalog::all_rules;
use super::context::{CheckContext, ModuleContext};
use super::emitter::emit;
use super::fix_applicator::apply_all_fixes;
use super::knowledge::{ModuleInterface, ProjectIndex, ProjectKnowledge, TypeName};
use super::lookup::ModuleLookup;
use super::rules::{Finding, Rule, RuleCode};
use super::source::SourceText;
use crate::config::SimplifyConfig;
use crate::error::{ConfigurationError, FixError};

// ---------------------------------------------------------------------------
// Project input and output
// ---------------------------------------------------------------------------

/// One module of the project under analysis.
#[derive(Debug, Clone)]
pub struct ProjectModule {
    pub path: PathBuf,
    pub module: Module,
}

/// Modules to analyze plus the interfaces of the dependencies they import.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub modules: Vec<ProjectModule>,
    pub dependencies: Vec<ModuleInterface>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a project module.
    pub fn with_module(mut self, path: impl Into<PathBuf>, module: Module) -> Self {
        self.modules.push(ProjectModule {
            path: path.into(),
            module,
        });
        self
    }

    /// Builder: add a dependency interface.
    pub fn with_dependency(mut self, interface: ModuleInterface) -> Self {
        self.dependencies.push(interface);
        self
    }

    /// Knowledge about every module and dependency in the project.
    pub fn index(&self) -> ProjectIndex {
        ProjectIndex::from_modules(
            self.modules.iter().map(|m| &m.module),
            self.dependencies.iter().cloned(),
        )
    }
}

/// Findings for one module, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
    pub path: PathBuf,
    pub module: ModuleName,
    pub findings: Vec<Finding>,
}

impl ModuleReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The simplification engine.
pub struct Simplifier {
    config: SimplifyConfig,
    /// Enabled rules in rule code order.
    rules: Vec<Box<dyn Rule>>,
    /// Indices into `rules` for each expression shape.
    dispatch: FxHashMap<ExprKind, Vec<usize>>,
    ignored_types: Vec<TypeName>,
}

impl Simplifier {
    /// Create an engine, rejecting malformed type names in `config`.
    pub fn new(config: SimplifyConfig) -> Result<Self, ConfigurationError> {
        let ignored_types = config.validate().map_err(|e| {
            warn!("{}", e);
            e
        })?;

        if config.has_empty_selection() {
            warn!("Rule selection is empty; no rule will run");
        }
        let mut rules = all_rules();
        rules.retain(|r| config.is_rule_enabled(r.code()));
        rules.sort_by_key(|r| r.code());

        let mut dispatch: FxHashMap<ExprKind, Vec<usize>> = FxHashMap::default();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.kinds() {
                dispatch.entry(*kind).or_default().push(index);
            }
        }
        debug!(
            "Simplifier ready with {} rule(s), ignoring case expressions over {} type(s)",
            rules.len(),
            ignored_types.len()
        );

        Ok(Self {
            config,
            rules,
            dispatch,
            ignored_types,
        })
    }

    pub fn config(&self) -> &SimplifyConfig {
        &self.config
    }

    /// Codes of the enabled rules.
    pub fn rule_codes(&self) -> Vec<RuleCode> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    pub fn ignored_types(&self) -> &[TypeName] {
        &self.ignored_types
    }

    /// Fail when a configured type is declared nowhere in the project or
    /// its dependencies.
    pub fn check_types_exist(
        &self,
        knowledge: &dyn ProjectKnowledge,
    ) -> Result<(), ConfigurationError> {
        let unknown: Vec<String> = self
            .ignored_types
            .iter()
            .filter(|t| !knowledge.type_exists(t))
            .map(ToString::to_string)
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        let err = ConfigurationError::UnknownTypeNames(unknown);
        warn!("{}", err);
        Err(err)
    }

    /// Analyze every module of `project`. Reports come back in input order.
    pub fn analyze(&self, project: &Project) -> Result<Vec<ModuleReport>, ConfigurationError> {
        let index = project.index();
        self.check_types_exist(&index)?;
        debug!("Analyzing {} module(s)", project.modules.len());

        let reports: Vec<ModuleReport> = project
            .modules
            .par_iter()
            .map(|m| ModuleReport {
                path: m.path.clone(),
                module: m.module.name.value.clone(),
                findings: self.analyze_module(&m.module, &index),
            })
            .collect();
        Ok(reports)
    }

    /// Findings for one module, in document order.
    pub fn analyze_module(&self, module: &Module, knowledge: &dyn ProjectKnowledge) -> Vec<Finding> {
        let module_ctx = ModuleContext {
            source: SourceText::new(&module.source),
            lookup: ModuleLookup::new(module, knowledge),
            knowledge,
            ignored_types: &self.ignored_types,
        };
        let mut walker = Walker {
            simplifier: self,
            module: &module_ctx,
            scope: Vec::new(),
            consumed: Vec::new(),
            findings: Vec::new(),
        };
        for value in module.values() {
            walker.scope = value
                .arguments
                .iter()
                .flat_map(|p| p.value.bound_vars())
                .map(str::to_string)
                .collect();
            walker.visit(&value.body, true);
        }
        debug!(
            "Analyzed module {}: {} finding(s)",
            module.name.value,
            walker.findings.len()
        );
        walker.findings
    }

    /// The module source with every fix applied.
    pub fn fix_module(
        &self,
        module: &Module,
        knowledge: &dyn ProjectKnowledge,
    ) -> Result<String, FixError> {
        let findings = self.analyze_module(module, knowledge);
        apply_all_fixes(&module.source, &findings)
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

struct Walker<'s, 'm> {
    simplifier: &'s Simplifier,
    module: &'m ModuleContext<'m>,
    /// Pattern variables bound around the current node.
    scope: Vec<String>,
    /// Ranges already rewritten by an emitted fix.
    consumed: Vec<Range>,
    findings: Vec<Finding>,
}

impl Walker<'_, '_> {
    fn visit(&mut self, expr: &Expr, free: bool) {
        if !self.is_consumed(expr.range) {
            if let Some(finding) = self.check(expr, free) {
                self.record(finding);
            }
        }
        self.visit_children(expr);
    }

    fn check(&self, expr: &Expr, free: bool) -> Option<Finding> {
        let candidates = self.simplifier.dispatch.get(&expr.value.kind())?;
        let ctx = CheckContext::new(self.module, &self.scope, free);
        candidates
            .iter()
            .find_map(|&index| self.simplifier.rules[index].check(expr, &ctx))
    }

    fn record(&mut self, finding: Finding) {
        let edits = finding.edit_ranges();
        if edits.iter().any(|r| self.is_consumed(*r)) {
            trace!(
                "Skipping {} at {}: its fix touches an already rewritten range",
                finding.rule,
                finding.range
            );
            return;
        }
        trace!("{} at {}: {}", finding.rule, finding.range, finding.message);
        self.consumed.extend(edits);
        self.findings.push(emit(finding));
    }

    fn is_consumed(&self, range: Range) -> bool {
        self.consumed.iter().any(|c| {
            c.overlaps(&range) || (c.is_empty() && range.is_empty() && c.start == range.start)
        })
    }

    fn visit_children(&mut self, expr: &Expr) {
        match &expr.value {
            Expr_::Lambda { parameters, body } => {
                let depth = self.scope.len();
                self.scope.extend(
                    parameters
                        .iter()
                        .flat_map(|p| p.value.bound_vars())
                        .map(str::to_string),
                );
                self.visit(body, true);
                self.scope.truncate(depth);
            }
            Expr_::Case {
                scrutinee,
                branches,
            } => {
                self.visit(scrutinee, true);
                for branch in branches {
                    let depth = self.scope.len();
                    self.scope.extend(
                        branch
                            .pattern
                            .value
                            .bound_vars()
                            .into_iter()
                            .map(str::to_string),
                    );
                    self.visit(&branch.body, true);
                    self.scope.truncate(depth);
                }
            }
            _ => {
                let free = expr.children_are_free();
                for child in expr.value.children() {
                    self.visit(child, free);
                }
            }
        }
    }
}
