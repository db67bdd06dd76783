//! Project knowledge: which modules exist, what they expose, and which
//! constructors each custom type has.
//!
//! Rules only ever match references that resolve to a known module; anything
//! this layer cannot answer is treated as "no match".

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use simplify_repr::{Module, ModuleName};

use super::lookup::alias_table;

/// Fully qualified custom type name, e.g. `Element.Font.Weight`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    pub module: ModuleName,
    pub name: String,
}

impl TypeName {
    pub fn new(module: ModuleName, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }

    /// Split `A.B.T` into module `A.B` and type `T`. No syntax validation.
    pub fn from_dotted(path: &str) -> Option<Self> {
        let (module, name) = path.rsplit_once('.')?;
        Some(Self::new(ModuleName::from_dotted(module), name))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// Read-only facts about the project and its dependencies.
pub trait ProjectKnowledge: Send + Sync {
    /// Modules that `alias` refers to inside `module`. Several imports may
    /// share one alias.
    fn resolve_module_alias(&self, module: &ModuleName, alias: &str) -> Vec<ModuleName>;

    /// Constructors of a custom type, `None` when the type is unknown.
    fn constructors_of(&self, type_name: &TypeName) -> Option<Vec<String>>;

    fn module_exists(&self, module: &ModuleName) -> bool;

    /// Does `module` expose a value or constructor called `name`?
    fn module_exposes(&self, module: &ModuleName, name: &str) -> bool;

    /// The custom type a constructor belongs to.
    fn type_of_constructor(&self, module: &ModuleName, constructor: &str) -> Option<TypeName>;

    fn type_exists(&self, type_name: &TypeName) -> bool {
        self.constructors_of(type_name).is_some()
    }
}

// ---------------------------------------------------------------------------
// Module interfaces
// ---------------------------------------------------------------------------

/// What one module makes available to others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleInterface {
    pub name: ModuleName,
    values: FxHashSet<String>,
    types: FxHashMap<String, Vec<String>>,
}

impl ModuleInterface {
    pub fn new(name: &str) -> Self {
        Self {
            name: ModuleName::from_dotted(name),
            ..Self::default()
        }
    }

    /// Builder: expose plain values.
    pub fn with_values(mut self, values: &[&str]) -> Self {
        self.values.extend(values.iter().map(|v| v.to_string()));
        self
    }

    /// Builder: declare a custom type and expose its constructors.
    pub fn with_type(mut self, name: &str, constructors: &[&str]) -> Self {
        self.values.extend(constructors.iter().map(|c| c.to_string()));
        self.types.insert(
            name.to_string(),
            constructors.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    /// Interface of a parsed project module. Every custom type is recorded
    /// with all its constructors; only exposed names count as exposed.
    pub fn from_module(module: &Module) -> Self {
        let mut interface = Self {
            name: module.name.value.clone(),
            ..Self::default()
        };
        for value in module.values() {
            if module.exposes_value(&value.name.value) {
                interface.values.insert(value.name.value.clone());
            }
        }
        for custom_type in module.custom_types() {
            for constructor in &custom_type.constructors {
                if module.exposes_value(&constructor.value.name) {
                    interface.values.insert(constructor.value.name.clone());
                }
            }
            interface
                .types
                .insert(custom_type.name.value.clone(), custom_type.constructor_names());
        }
        interface
    }

    pub fn exposes(&self, name: &str) -> bool {
        self.values.contains(name)
    }

    pub fn constructors_of(&self, type_name: &str) -> Option<&[String]> {
        self.types.get(type_name).map(Vec::as_slice)
    }
}

/// Interfaces of the core library modules every program can use.
pub fn core_interfaces() -> Vec<ModuleInterface> {
    vec![
        ModuleInterface::new("Basics")
            .with_type("Bool", &["True", "False"])
            .with_type("Order", &["LT", "EQ", "GT"])
            .with_type("Int", &[])
            .with_type("Float", &[])
            .with_type("Never", &[])
            .with_values(&[
                "identity", "always", "not", "xor", "negate", "never", "compare", "min", "max",
                "abs", "clamp", "sqrt", "logBase", "toFloat", "round", "floor", "ceiling",
                "truncate", "modBy", "remainderBy", "isNaN", "isInfinite", "e", "pi", "cos",
                "sin", "tan", "acos", "asin", "atan", "atan2", "degrees", "radians", "turns",
                "toPolar", "fromPolar",
            ]),
        ModuleInterface::new("List")
            .with_type("List", &[])
            .with_values(&[
                "singleton", "repeat", "range", "map", "indexedMap", "foldl", "foldr", "filter",
                "filterMap", "length", "reverse", "member", "all", "any", "maximum", "minimum",
                "sum", "product", "append", "concat", "concatMap", "intersperse", "map2", "map3",
                "map4", "map5", "sort", "sortBy", "sortWith", "isEmpty", "head", "tail", "take",
                "drop", "partition", "unzip",
            ]),
        ModuleInterface::new("Maybe")
            .with_type("Maybe", &["Just", "Nothing"])
            .with_values(&["withDefault", "map", "map2", "map3", "map4", "map5", "andThen"]),
        ModuleInterface::new("Result")
            .with_type("Result", &["Ok", "Err"])
            .with_values(&[
                "map", "map2", "map3", "map4", "map5", "andThen", "withDefault", "toMaybe",
                "fromMaybe", "mapError",
            ]),
        ModuleInterface::new("String")
            .with_type("String", &[])
            .with_values(&[
                "isEmpty", "length", "reverse", "repeat", "replace", "append", "concat", "split",
                "join", "words", "lines", "slice", "left", "right", "dropLeft", "dropRight",
                "contains", "startsWith", "endsWith", "indexes", "indices", "toInt", "fromInt",
                "toFloat", "fromFloat", "fromChar", "cons", "uncons", "toList", "fromList",
                "toUpper", "toLower", "pad", "padLeft", "padRight", "trim", "trimLeft",
                "trimRight", "map", "filter", "foldl", "foldr", "any", "all",
            ]),
        ModuleInterface::new("Char")
            .with_type("Char", &[])
            .with_values(&[
                "isUpper", "isLower", "isAlpha", "isAlphaNum", "isDigit", "isOctDigit",
                "isHexDigit", "toUpper", "toLower", "toLocaleUpper", "toLocaleLower", "toCode",
                "fromCode",
            ]),
        ModuleInterface::new("Tuple").with_values(&["pair", "first", "second", "mapFirst", "mapSecond", "mapBoth"]),
        ModuleInterface::new("Debug").with_values(&["toString", "log", "todo"]),
        ModuleInterface::new("Set")
            .with_type("Set", &[])
            .with_values(&[
                "empty", "singleton", "insert", "remove", "isEmpty", "member", "size", "union",
                "intersect", "diff", "toList", "fromList", "map", "foldl", "foldr", "filter",
                "partition",
            ]),
        ModuleInterface::new("Dict")
            .with_type("Dict", &[])
            .with_values(&[
                "empty", "singleton", "insert", "update", "remove", "isEmpty", "member", "get",
                "size", "keys", "values", "toList", "fromList", "map", "foldl", "foldr",
                "filter", "partition", "union", "intersect", "diff", "merge",
            ]),
        ModuleInterface::new("Platform").with_type("Program", &[]).with_values(&["worker"]),
        ModuleInterface::new("Platform.Cmd")
            .with_type("Cmd", &[])
            .with_values(&["none", "batch", "map"]),
        ModuleInterface::new("Platform.Sub")
            .with_type("Sub", &[])
            .with_values(&["none", "batch", "map"]),
    ]
}

// ---------------------------------------------------------------------------
// Project index
// ---------------------------------------------------------------------------

/// [`ProjectKnowledge`] built from module interfaces.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    modules: FxHashMap<ModuleName, ModuleInterface>,
    constructor_types: FxHashMap<(ModuleName, String), TypeName>,
    aliases: FxHashMap<ModuleName, FxHashMap<String, Vec<ModuleName>>>,
}

impl ProjectIndex {
    /// An index containing only the core library.
    pub fn new() -> Self {
        let mut index = Self::default();
        for interface in core_interfaces() {
            index.add_interface(interface);
        }
        index
    }

    /// Core library plus the given project modules and dependency interfaces.
    pub fn from_modules<'m>(
        modules: impl IntoIterator<Item = &'m Module>,
        dependencies: impl IntoIterator<Item = ModuleInterface>,
    ) -> Self {
        let mut index = Self::new();
        for interface in dependencies {
            index.add_interface(interface);
        }
        for module in modules {
            index.add_module(module);
        }
        index
    }

    pub fn add_interface(&mut self, interface: ModuleInterface) {
        for (type_name, constructors) in &interface.types {
            let owner = TypeName::new(interface.name.clone(), type_name.clone());
            for constructor in constructors {
                self.constructor_types
                    .insert((interface.name.clone(), constructor.clone()), owner.clone());
            }
        }
        self.modules.insert(interface.name.clone(), interface);
    }

    pub fn add_module(&mut self, module: &Module) {
        self.aliases
            .insert(module.name.value.clone(), alias_table(&module.imports));
        self.add_interface(ModuleInterface::from_module(module));
    }

    pub fn interface(&self, module: &ModuleName) -> Option<&ModuleInterface> {
        self.modules.get(module)
    }
}

impl ProjectKnowledge for ProjectIndex {
    fn resolve_module_alias(&self, module: &ModuleName, alias: &str) -> Vec<ModuleName> {
        match self.aliases.get(module) {
            Some(table) => table.get(alias).cloned().unwrap_or_default(),
            None => alias_table(&[]).remove(alias).unwrap_or_default(),
        }
    }

    fn constructors_of(&self, type_name: &TypeName) -> Option<Vec<String>> {
        self.modules
            .get(&type_name.module)?
            .constructors_of(&type_name.name)
            .map(<[String]>::to_vec)
    }

    fn module_exists(&self, module: &ModuleName) -> bool {
        self.modules.contains_key(module)
    }

    fn module_exposes(&self, module: &ModuleName, name: &str) -> bool {
        self.modules
            .get(module)
            .is_some_and(|interface| interface.exposes(name))
    }

    fn type_of_constructor(&self, module: &ModuleName, constructor: &str) -> Option<TypeName> {
        self.constructor_types
            .get(&(module.clone(), constructor.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplify_repr::parse_module;

    fn m(name: &str) -> ModuleName {
        ModuleName::from_dotted(name)
    }

    #[test]
    fn test_type_name_from_dotted() {
        let name = TypeName::from_dotted("Element.Font.Weight").unwrap();
        assert!(name.module.is("Element.Font"));
        assert_eq!(name.name, "Weight");
        assert_eq!(name.to_string(), "Element.Font.Weight");
        assert!(TypeName::from_dotted("Weight").is_none());
    }

    #[test]
    fn test_core_knowledge() {
        let index = ProjectIndex::new();
        assert!(index.module_exists(&m("List")));
        assert!(index.module_exposes(&m("Basics"), "identity"));
        assert!(index.module_exposes(&m("Maybe"), "Just"));
        assert_eq!(
            index.constructors_of(&TypeName::new(m("Basics"), "Bool")),
            Some(vec!["True".to_string(), "False".to_string()])
        );
        assert_eq!(
            index.type_of_constructor(&m("Maybe"), "Nothing"),
            Some(TypeName::new(m("Maybe"), "Maybe"))
        );
        assert!(!index.type_exists(&TypeName::new(m("Basics"), "Missing")));
    }

    #[test]
    fn test_project_module_interface() {
        let module = parse_module(
            "module Other exposing (B(..), visible)\ntype B = C | D\ntype Hidden = E\nvisible = 1\nhidden = 2\n",
        )
        .unwrap();
        let index = ProjectIndex::from_modules([&module], []);
        let other = m("Other");
        assert!(index.module_exposes(&other, "C"));
        assert!(index.module_exposes(&other, "visible"));
        assert!(!index.module_exposes(&other, "hidden"));
        assert!(!index.module_exposes(&other, "E"));
        assert!(index.type_exists(&TypeName::new(other.clone(), "Hidden")));
        assert_eq!(
            index.type_of_constructor(&other, "D"),
            Some(TypeName::new(other, "B"))
        );
    }

    #[test]
    fn test_dependency_interface() {
        let font = ModuleInterface::new("Element.Font").with_type("Weight", &["Bold", "Light"]);
        let index = ProjectIndex::from_modules([], [font]);
        assert!(index.type_exists(&TypeName::from_dotted("Element.Font.Weight").unwrap()));
    }

    #[test]
    fn test_resolve_module_alias() {
        let module = parse_module("module A exposing (..)\nimport Html.Attributes as Attr\na = 1\n").unwrap();
        let index = ProjectIndex::from_modules([&module], []);
        assert_eq!(
            index.resolve_module_alias(&m("A"), "Attr"),
            vec![m("Html.Attributes")]
        );
        assert_eq!(index.resolve_module_alias(&m("A"), "Cmd"), vec![m("Platform.Cmd")]);
        assert!(index.resolve_module_alias(&m("A"), "Html.Attributes").is_empty());
        assert_eq!(index.resolve_module_alias(&m("Unknown"), "List"), vec![m("List")]);
    }
}
