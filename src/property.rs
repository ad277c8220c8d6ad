use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The group name used for props that do not declare one.
pub const DEFAULT_GROUP: &str = "default";

/// Semantic value type of a previewable prop.
///
/// This drives value coercion: `Boolean` props normalize submitted checkbox
/// values, nullable `String`/`Color` props normalize the empty string to null.
/// Everything else passes through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Number,
    Boolean,
    Color,
}

impl PropType {
    /// String-like types carry the nullable-empty-string normalization.
    pub fn is_string_like(self) -> bool {
        matches!(self, PropType::String | PropType::Color)
    }
}

/// How one prop of a previewable component is edited and displayed.
///
/// The `kind` is the raw form-control tag (`text`, `textarea`, `number`,
/// `checkbox`, `choice`). It is kept verbatim here; unknown tags degrade to a
/// text field when the form spec is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropSpec {
    /// camelCase prop name
    pub name: String,
    /// Form-control tag (default `text`)
    pub kind: String,
    /// Semantic value type
    #[serde(rename = "type")]
    pub prop_type: PropType,
    /// Whether the prop accepts null
    pub nullable: bool,
    /// Form label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Help text shown next to the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Allowed values for `choice` fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Default value (if absent, the prop starts unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Required flag, checked by instance validation
    pub required: bool,
    /// Opaque per-field options merged over the built form options
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub form_options: BTreeMap<String, Value>,
    /// Group name for form layout (buckets under `"default"` when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl PropSpec {
    /// Create a prop spec with the given name and semantic type.
    ///
    /// The form-control tag defaults to `text`; everything else starts unset.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            kind: "text".to_string(),
            prop_type,
            nullable: false,
            label: None,
            help: None,
            choices: Vec::new(),
            default: None,
            required: false,
            form_options: BTreeMap::new(),
            group: None,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn form_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.form_options.insert(key.into(), value.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The group this prop belongs to, falling back to [`DEFAULT_GROUP`].
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(DEFAULT_GROUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_defaults() {
        let prop = PropSpec::new("title", PropType::String);
        assert_eq!(prop.kind, "text");
        assert!(!prop.required);
        assert!(!prop.nullable);
        assert!(prop.default.is_none());
        assert_eq!(prop.group_name(), DEFAULT_GROUP);
    }

    #[test]
    fn test_builder_chain() {
        let prop = PropSpec::new("variant", PropType::String)
            .kind("choice")
            .choices(["primary", "danger"])
            .default_value("primary")
            .label("Variant")
            .group("appearance");
        assert_eq!(prop.kind, "choice");
        assert_eq!(prop.choices, vec!["primary", "danger"]);
        assert_eq!(prop.default, Some(json!("primary")));
        assert_eq!(prop.group_name(), "appearance");
    }

    #[test]
    fn test_string_like() {
        assert!(PropType::String.is_string_like());
        assert!(PropType::Color.is_string_like());
        assert!(!PropType::Boolean.is_string_like());
        assert!(!PropType::Number.is_string_like());
    }
}
