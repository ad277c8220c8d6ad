use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::analyzer::display_name;
use crate::error::{PreviewError, PreviewResult};
use crate::factory::InstanceFactory;
use crate::form::{FormSpec, PreviewFormBuilder, PropertyGroup};
use crate::metadata::ComponentMetadata;
use crate::registry::{PreviewInstance, PreviewRegistry};
use crate::value::ValueMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageLayout {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageTheme {
    Light,
    Dark,
}

/// Display options for the preview stage. Opaque to the core pipeline;
/// exposed to the template layer as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOptions {
    pub show_documentation: bool,
    pub show_code_example: bool,
    pub show_examples: bool,
    pub layout: StageLayout,
    pub theme: StageTheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_width: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_options: BTreeMap<String, Value>,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            show_documentation: true,
            show_code_example: true,
            show_examples: false,
            layout: StageLayout::Horizontal,
            theme: StageTheme::Light,
            form_width: None,
            custom_options: BTreeMap::new(),
        }
    }
}

/// The live preview orchestrator for one component.
///
/// Holds the full prop value map across update events within a session, so a
/// partial live-update (e.g. an unchecked checkbox that submits no field at
/// all) merges into current state instead of silently dropping keys. Every
/// read of the instance or the prop map goes through the full-set cleaning
/// pass first.
pub struct PreviewStage<'a> {
    registry: &'a PreviewRegistry,
    component: String,
    values: ValueMap,
    options: StageOptions,
}

impl<'a> PreviewStage<'a> {
    /// Mount a stage for `component`, seeding the value map from declared
    /// defaults merged with `initial` (caller values win on collision).
    ///
    /// Fails with [`PreviewError::UnknownComponent`] when the component is
    /// not registered — the one fatal error of the pipeline.
    pub fn mount(
        registry: &'a PreviewRegistry,
        component: &str,
        initial: ValueMap,
        options: StageOptions,
    ) -> PreviewResult<Self> {
        if !registry.contains(component) {
            return Err(PreviewError::UnknownComponent {
                component: component.to_string(),
            });
        }
        let mut values = InstanceFactory::new(registry).default_values_for(component);
        values.extend(initial);
        Ok(Self {
            registry,
            component: component.to_string(),
            values,
            options,
        })
    }

    /// Merge a live-update event into the persistent value map, key-wise.
    /// Keys not present in `patch` keep their current value.
    pub fn apply_update(&mut self, patch: ValueMap) {
        self.values.extend(patch);
    }

    /// The form specification for the current component.
    pub fn form(&self) -> FormSpec {
        PreviewFormBuilder::new(self.registry).build_form_spec(&self.component)
    }

    /// Prop names bucketed by declared group, for form layout.
    pub fn groups(&self) -> Vec<PropertyGroup> {
        PreviewFormBuilder::new(self.registry).property_groups(&self.component)
    }

    /// The cleaned prop value map exposed to the template layer.
    pub fn props(&self) -> ValueMap {
        InstanceFactory::new(self.registry).clean_form_data(&self.component, &self.values)
    }

    /// Materialize a component instance from the cleaned value map.
    pub fn instance(&self) -> PreviewResult<Box<dyn PreviewInstance>> {
        InstanceFactory::new(self.registry).create_from_form_data(&self.component, &self.props())
    }

    /// The component id this stage previews.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Human-readable component name (last path segment of the id).
    pub fn component_name(&self) -> &str {
        display_name(&self.component)
    }

    pub fn metadata(&self) -> Option<&ComponentMetadata> {
        self.registry
            .get(&self.component)
            .and_then(|entry| entry.component_metadata())
    }

    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    /// The raw (un-cleaned) persistent value map.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }
}
