//! Per-module name resolution.
//!
//! Turns a reference as written (`List.map`, `Cmd.none`, `map` from an
//! exposing list) into the module that defines it, using the module's import
//! table plus the implicit default imports.

use rustc_hash::{FxHashMap, FxHashSet};
use simplify_repr::{
    ExposedItem, Exposing, Import, Module, ModuleName, Node, QualifiedName, Range, ResolvedName,
};

use super::knowledge::{ProjectKnowledge, TypeName};

fn implicit(module: &str, alias: Option<&str>, exposing: Option<Exposing>) -> Import {
    Import::new(
        Node::new(ModuleName::from_dotted(module), Range::default()),
        alias.map(ModuleName::from_dotted),
        exposing,
    )
}

fn expose_type(name: &str, open: bool) -> ExposedItem {
    ExposedItem::Type {
        name: name.to_string(),
        open,
    }
}

/// Imports every module gets without writing them.
pub fn default_imports() -> Vec<Import> {
    vec![
        implicit("Basics", None, Some(Exposing::All)),
        implicit(
            "List",
            None,
            Some(Exposing::Explicit(vec![
                expose_type("List", false),
                ExposedItem::Operator("::".to_string()),
            ])),
        ),
        implicit("Maybe", None, Some(Exposing::Explicit(vec![expose_type("Maybe", true)]))),
        implicit("Result", None, Some(Exposing::Explicit(vec![expose_type("Result", true)]))),
        implicit("String", None, Some(Exposing::Explicit(vec![expose_type("String", false)]))),
        implicit("Char", None, Some(Exposing::Explicit(vec![expose_type("Char", false)]))),
        implicit("Tuple", None, None),
        implicit("Debug", None, None),
        implicit("Platform", None, Some(Exposing::Explicit(vec![expose_type("Program", false)]))),
        implicit(
            "Platform.Cmd",
            Some("Cmd"),
            Some(Exposing::Explicit(vec![expose_type("Cmd", false)])),
        ),
        implicit(
            "Platform.Sub",
            Some("Sub"),
            Some(Exposing::Explicit(vec![expose_type("Sub", false)])),
        ),
    ]
}

/// Qualifier → modules table for the default imports followed by `imports`.
pub fn alias_table(imports: &[Import]) -> FxHashMap<String, Vec<ModuleName>> {
    let mut table: FxHashMap<String, Vec<ModuleName>> = FxHashMap::default();
    for import in default_imports().iter().chain(imports) {
        let modules = table.entry(import.qualifier().to_dotted()).or_default();
        if !modules.contains(&import.module.value) {
            modules.push(import.module.value.clone());
        }
    }
    table
}

/// Name resolution table for one module.
pub struct ModuleLookup<'k> {
    module_name: ModuleName,
    knowledge: &'k dyn ProjectKnowledge,
    /// Top-level values and constructors declared in this module.
    locals: FxHashSet<String>,
    /// User imports first, then the defaults.
    imports: Vec<Import>,
    aliases: FxHashMap<String, Vec<ModuleName>>,
    /// Names brought in by explicit exposing lists.
    exposed: FxHashMap<String, ModuleName>,
    /// Modules imported with `exposing (..)`.
    open: Vec<ModuleName>,
}

impl<'k> ModuleLookup<'k> {
    pub fn new(module: &Module, knowledge: &'k dyn ProjectKnowledge) -> Self {
        let mut locals: FxHashSet<String> =
            module.values().map(|v| v.name.value.clone()).collect();
        for custom_type in module.custom_types() {
            locals.extend(custom_type.constructor_names());
        }

        let defaults = default_imports();
        let mut exposed = FxHashMap::default();
        let mut open = Vec::new();
        for import in defaults.iter().chain(&module.imports) {
            let source = &import.module.value;
            match &import.exposing {
                Some(Exposing::All) => {
                    if !open.contains(source) {
                        open.push(source.clone());
                    }
                }
                Some(Exposing::Explicit(items)) => {
                    for item in items {
                        match item {
                            ExposedItem::Value(name) => {
                                exposed.insert(name.clone(), source.clone());
                            }
                            ExposedItem::Type { name, open: true } => {
                                let type_name = TypeName::new(source.clone(), name.clone());
                                for constructor in
                                    knowledge.constructors_of(&type_name).unwrap_or_default()
                                {
                                    exposed.insert(constructor, source.clone());
                                }
                            }
                            ExposedItem::Type { .. } | ExposedItem::Operator(_) => {}
                        }
                    }
                }
                None => {}
            }
        }

        let mut imports = module.imports.clone();
        imports.extend(defaults);

        Self {
            module_name: module.name.value.clone(),
            knowledge,
            locals,
            aliases: alias_table(&module.imports),
            imports,
            exposed,
            open,
        }
    }

    pub fn module_name(&self) -> &ModuleName {
        &self.module_name
    }

    /// Resolve a reference to its defining module. `None` when the name
    /// cannot be traced to any import or local declaration.
    pub fn resolve(&self, name: &QualifiedName) -> Option<ResolvedName> {
        if name.is_qualified() {
            let candidates = self.aliases.get(&name.module.to_dotted())?;
            let module = candidates
                .iter()
                .find(|m| self.knowledge.module_exposes(m, &name.name))
                .or_else(|| candidates.first())?;
            return Some(ResolvedName::new(module.clone(), name.name.clone()));
        }

        if self.locals.contains(&name.name) {
            return Some(ResolvedName::new(self.module_name.clone(), name.name.clone()));
        }
        if let Some(module) = self.exposed.get(&name.name) {
            return Some(ResolvedName::new(module.clone(), name.name.clone()));
        }
        self.open
            .iter()
            .find(|m| self.knowledge.module_exposes(m, &name.name))
            .map(|m| ResolvedName::new(m.clone(), name.name.clone()))
    }

    /// Shortest way to write `module.name` in this module. `shadowed` lists
    /// local variables in scope at the point of use.
    pub fn qualify(&self, module: &str, name: &str, shadowed: &[String]) -> String {
        let target = ModuleName::from_dotted(module);
        let unqualified_target = self.resolve(&QualifiedName::unqualified(name));
        if !shadowed.iter().any(|s| s == name)
            && unqualified_target.is_some_and(|r| r.module == target)
        {
            return name.to_string();
        }
        match self.imports.iter().find(|i| i.module.value == target) {
            Some(import) => format!("{}.{}", import.qualifier(), name),
            None => format!("{module}.{name}"),
        }
    }
}
