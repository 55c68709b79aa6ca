//! Provider registry collaborator
//!
//! Diagram tags name a provider by its qualified name. The registry resolves
//! that name and tells the parser which extra options the provider accepts.

mod declared;

pub use declared::DeclaredProvider;

use crate::config::runtime::ProviderDeclaration;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// How a provider-specific option value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Compiled with the expression compiler
    Expression,
    /// Kept verbatim
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DiagramProvider,
}

pub trait Provider: Send + Sync + fmt::Debug {
    fn qualified_name(&self) -> &str;

    /// Extra option names and their types; `None` when the provider declares none
    fn option_types(&self) -> Option<&BTreeMap<String, OptionType>> {
        None
    }

    fn has_capability(&self, capability: Capability) -> bool;
}

/// Shared reference to a registered provider
///
/// Compares and serializes by qualified name.
#[derive(Debug, Clone)]
pub struct ProviderHandle(Arc<dyn Provider>);

impl ProviderHandle {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self(provider)
    }

    pub fn qualified_name(&self) -> &str {
        self.0.qualified_name()
    }

    pub fn provider(&self) -> &dyn Provider {
        self.0.as_ref()
    }
}

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl Serialize for ProviderHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualified_name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderHandle>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one [`DeclaredProvider`] per declaration
    pub fn from_declarations(declarations: &[ProviderDeclaration]) -> Self {
        let mut registry = Self::new();
        for declaration in declarations {
            registry.register(Arc::new(DeclaredProvider::from(declaration)));
        }
        registry
    }

    /// Register a provider, replacing any previous one with the same name
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        let name = provider.qualified_name().to_string();
        self.providers.insert(name, ProviderHandle::new(provider));
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<&ProviderHandle> {
        self.providers.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(DeclaredProvider::diagram("org.example.Diagrams")));

        let handle = registry.lookup("org.example.Diagrams").unwrap();
        assert!(handle.provider().has_capability(Capability::DiagramProvider));
        assert!(registry.lookup("org.example.Missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_declarations() {
        let declarations = vec![
            ProviderDeclaration {
                name: "a.Diagram".to_string(),
                diagram: true,
                options: BTreeMap::from([("layers".to_string(), OptionType::Expression)]),
            },
            ProviderDeclaration {
                name: "a.Other".to_string(),
                diagram: false,
                options: BTreeMap::new(),
            },
        ];

        let registry = ProviderRegistry::from_declarations(&declarations);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a.Diagram", "a.Other"]);
        let other = registry.lookup("a.Other").unwrap();
        assert!(!other.provider().has_capability(Capability::DiagramProvider));
    }

    #[test]
    fn test_handle_equality_and_serialization() {
        let a = ProviderHandle::new(Arc::new(DeclaredProvider::diagram("x.Y")));
        let b = ProviderHandle::new(Arc::new(DeclaredProvider::diagram("x.Y")));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"x.Y\"");
    }
}
