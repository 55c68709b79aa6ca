use super::{Capability, OptionType, Provider};
use crate::config::runtime::ProviderDeclaration;
use std::collections::BTreeMap;

/// Provider described entirely by data, typically from the runtime config
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredProvider {
    name: String,
    diagram: bool,
    option_types: BTreeMap<String, OptionType>,
}

impl DeclaredProvider {
    pub fn diagram(name: &str) -> Self {
        Self {
            name: name.to_string(),
            diagram: true,
            option_types: BTreeMap::new(),
        }
    }

    /// A provider that is registered but cannot render diagrams
    pub fn non_diagram(name: &str) -> Self {
        Self {
            diagram: false,
            ..Self::diagram(name)
        }
    }

    pub fn with_option(mut self, name: &str, option_type: OptionType) -> Self {
        self.option_types.insert(name.to_string(), option_type);
        self
    }
}

impl From<&ProviderDeclaration> for DeclaredProvider {
    fn from(declaration: &ProviderDeclaration) -> Self {
        Self {
            name: declaration.name.clone(),
            diagram: declaration.diagram,
            option_types: declaration.options.clone(),
        }
    }
}

impl Provider for DeclaredProvider {
    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn option_types(&self) -> Option<&BTreeMap<String, OptionType>> {
        if self.option_types.is_empty() {
            None
        } else {
            Some(&self.option_types)
        }
    }

    fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::DiagramProvider => self.diagram,
        }
    }
}
