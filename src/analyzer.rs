use std::collections::HashMap;

use crate::metadata::ComponentMetadata;
use crate::property::PropSpec;
use crate::registry::{PreviewInstance, PreviewRegistry};
use crate::value::is_empty_value;

const REQUIRED_MESSAGE: &str = "This field is required";

/// Human-readable component name: the last `::` segment of the component id.
pub fn display_name(component: &str) -> &str {
    component.rsplit("::").next().unwrap_or(component)
}

/// Read-only introspection over registered preview declarations.
///
/// Stateless — lookups that miss return negative/absent results rather than
/// errors, and nothing here mutates the registry.
#[derive(Debug, Clone, Copy)]
pub struct PreviewAnalyzer<'a> {
    registry: &'a PreviewRegistry,
}

impl<'a> PreviewAnalyzer<'a> {
    pub fn new(registry: &'a PreviewRegistry) -> Self {
        Self { registry }
    }

    /// Whether the component is registered for preview.
    pub fn is_previewable(&self, component: &str) -> bool {
        self.registry.contains(component)
    }

    /// Declared prop specs in declaration order. Empty for unknown components.
    pub fn preview_properties(&self, component: &str) -> &'a [PropSpec] {
        self.registry
            .get(component)
            .map(|entry| entry.props())
            .unwrap_or(&[])
    }

    /// Documentation metadata, if the component declares any.
    pub fn component_metadata(&self, component: &str) -> Option<&'a ComponentMetadata> {
        self.registry
            .get(component)
            .and_then(|entry| entry.component_metadata())
    }

    /// Check every required prop of the instance for an empty current value.
    ///
    /// Returns prop-name keyed messages. Advisory only — an instance with
    /// validation errors still renders.
    pub fn validate_instance(&self, instance: &dyn PreviewInstance) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for prop in self.preview_properties(instance.type_name()) {
            if !prop.required {
                continue;
            }
            let value = instance.get(&prop.name).unwrap_or_default();
            if is_empty_value(&value) {
                errors.insert(prop.name.clone(), REQUIRED_MESSAGE.to_string());
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropType;
    use crate::registry::{ComponentEntry, SetOutcome, ValueInstance};
    use serde_json::json;

    fn registry() -> PreviewRegistry {
        let mut registry = PreviewRegistry::new();
        registry
            .register(
                ComponentEntry::new("acme::ui::Card")
                    .metadata(ComponentMetadata::new().name("Card").category("Content"))
                    .prop(PropSpec::new("title", PropType::String).required())
                    .prop(PropSpec::new("featured", PropType::Boolean).kind("checkbox")),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_is_previewable() {
        let registry = registry();
        let analyzer = PreviewAnalyzer::new(&registry);
        assert!(analyzer.is_previewable("acme::ui::Card"));
        assert!(!analyzer.is_previewable("acme::ui::Missing"));
    }

    #[test]
    fn test_unknown_component_has_no_properties() {
        let registry = registry();
        let analyzer = PreviewAnalyzer::new(&registry);
        assert!(analyzer.preview_properties("acme::ui::Missing").is_empty());
        assert!(analyzer.component_metadata("acme::ui::Missing").is_none());
    }

    #[test]
    fn test_properties_preserve_declaration_order() {
        let registry = registry();
        let analyzer = PreviewAnalyzer::new(&registry);
        let names: Vec<_> = analyzer
            .preview_properties("acme::ui::Card")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["title", "featured"]);
    }

    #[test]
    fn test_validate_instance_reports_empty_required() {
        let registry = registry();
        let analyzer = PreviewAnalyzer::new(&registry);
        let mut instance = ValueInstance::new("acme::ui::Card", ["title", "featured"]);

        let errors = analyzer.validate_instance(&instance);
        assert_eq!(errors.get("title").map(String::as_str), Some(REQUIRED_MESSAGE));
        assert!(!errors.contains_key("featured"));

        assert_eq!(instance.set("title", json!("Hello")), SetOutcome::Applied);
        assert!(analyzer.validate_instance(&instance).is_empty());
    }

    #[test]
    fn test_validate_instance_treats_zero_as_empty() {
        let mut registry = PreviewRegistry::new();
        registry
            .register(
                ComponentEntry::new("Meter")
                    .prop(PropSpec::new("value", PropType::Number).kind("number").required()),
            )
            .unwrap();
        let analyzer = PreviewAnalyzer::new(&registry);
        let mut instance = ValueInstance::new("Meter", ["value"]);
        instance.set("value", json!(0));
        assert!(analyzer.validate_instance(&instance).contains_key("value"));
        instance.set("value", json!(5));
        assert!(analyzer.validate_instance(&instance).is_empty());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("acme::ui::Card"), "Card");
        assert_eq!(display_name("Card"), "Card");
    }
}
