//! Module and value names

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dotted module path, e.g. `Platform.Cmd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ModuleName(pub Vec<String>);

impl ModuleName {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Split a dotted path. Empty segments are dropped.
    pub fn from_dotted(path: &str) -> Self {
        Self(
            path.split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare against a dotted path without allocating.
    pub fn is(&self, dotted: &str) -> bool {
        let mut parts = dotted.split('.');
        for segment in &self.0 {
            match parts.next() {
                Some(part) if part == segment => {}
                _ => return false,
            }
        }
        parts.next().is_none()
    }

    pub fn to_dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A reference as written in source: optional module qualifier plus name.
///
/// `List.map` has module `["List"]`, `map` has an empty module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub module: ModuleName,
    pub name: String,
}

impl QualifiedName {
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            module: ModuleName::default(),
            name: name.into(),
        }
    }

    pub fn qualified(module: ModuleName, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        !self.module.is_empty()
    }

    /// Constructor references start with an uppercase letter.
    pub fn is_constructor(&self) -> bool {
        self.name.starts_with(|c: char| c.is_uppercase())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.module, self.name)
        }
    }
}

/// A name after resolution: the module that defines it plus the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolvedName {
    pub module: ModuleName,
    pub name: String,
}

impl ResolvedName {
    pub fn new(module: ModuleName, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }

    /// `resolved.is("List", "map")`
    pub fn is(&self, module: &str, name: &str) -> bool {
        self.name == name && self.module.is(module)
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}
