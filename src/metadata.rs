use serde::Serialize;

use crate::value::ValueMap;

/// Documentation metadata for a previewable component.
///
/// Declared once per component, read at render time, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentMetadata {
    /// Display name shown in the preview header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description of the component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label (e.g. "Form", "Layout")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Named example configurations, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ComponentExample>,
}

/// A named example configuration: a label plus literal prop values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentExample {
    pub label: String,
    pub values: ValueMap,
}

impl ComponentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn example(mut self, label: impl Into<String>, values: ValueMap) -> Self {
        self.examples.push(ComponentExample {
            label: label.into(),
            values,
        });
        self
    }

    /// True when no field carries any information.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.examples.is_empty()
    }
}
