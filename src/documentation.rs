use crate::analyzer::{display_name, PreviewAnalyzer};
use crate::metadata::{ComponentExample, ComponentMetadata};
use crate::property::PropSpec;
use crate::registry::PreviewRegistry;

/// Read-only documentation view for one component: metadata and prop
/// descriptors for display, with section toggles for the template layer.
#[derive(Debug, Clone)]
pub struct ComponentDocumentation<'a> {
    registry: &'a PreviewRegistry,
    component: String,
    pub show_properties: bool,
    pub show_examples: bool,
    pub show_metadata: bool,
}

impl<'a> ComponentDocumentation<'a> {
    pub fn new(registry: &'a PreviewRegistry, component: &str) -> Self {
        Self {
            registry,
            component: component.to_string(),
            show_properties: true,
            show_examples: true,
            show_metadata: true,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.component)
    }

    pub fn metadata(&self) -> Option<&'a ComponentMetadata> {
        PreviewAnalyzer::new(self.registry).component_metadata(&self.component)
    }

    pub fn properties(&self) -> &'a [PropSpec] {
        PreviewAnalyzer::new(self.registry).preview_properties(&self.component)
    }

    /// Declared example configurations, empty when the component has no
    /// metadata.
    pub fn examples(&self) -> &'a [ComponentExample] {
        self.metadata()
            .map(|metadata| metadata.examples.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropType;
    use crate::registry::ComponentEntry;
    use crate::value::ValueMap;
    use serde_json::json;

    #[test]
    fn test_documentation_view() {
        let mut registry = PreviewRegistry::new();
        let mut values = ValueMap::new();
        values.insert("title".to_string(), json!("Hello"));
        registry
            .register(
                ComponentEntry::new("acme::ui::Card")
                    .metadata(
                        ComponentMetadata::new()
                            .name("Card")
                            .description("A content card")
                            .category("Content")
                            .example("Basic", values),
                    )
                    .prop(PropSpec::new("title", PropType::String)),
            )
            .unwrap();

        let docs = ComponentDocumentation::new(&registry, "acme::ui::Card");
        assert_eq!(docs.display_name(), "Card");
        assert_eq!(docs.metadata().unwrap().category.as_deref(), Some("Content"));
        assert_eq!(docs.properties().len(), 1);
        assert_eq!(docs.examples().len(), 1);
        assert_eq!(docs.examples()[0].label, "Basic");
        assert!(docs.show_properties && docs.show_examples && docs.show_metadata);
    }

    #[test]
    fn test_unknown_component_is_empty_not_an_error() {
        let registry = PreviewRegistry::new();
        let docs = ComponentDocumentation::new(&registry, "ghost::Widget");
        assert!(docs.metadata().is_none());
        assert!(docs.properties().is_empty());
        assert!(docs.examples().is_empty());
        assert_eq!(docs.display_name(), "Widget");
    }
}
