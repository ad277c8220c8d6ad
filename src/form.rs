use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::property::PropSpec;
use crate::registry::PreviewRegistry;
use crate::value::is_truthy;

/// Concrete field kind a prop's control tag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    TextArea,
    Number,
    Checkbox,
    Choice,
}

impl FieldType {
    /// Resolve a raw control tag. The lookup is total: unrecognized tags
    /// degrade to a text field instead of erroring.
    pub fn from_tag(tag: &str) -> FieldType {
        match tag {
            "text" => FieldType::Text,
            "textarea" => FieldType::TextArea,
            "number" => FieldType::Number,
            "checkbox" => FieldType::Checkbox,
            "choice" => FieldType::Choice,
            _ => FieldType::Text,
        }
    }
}

/// One selectable option of a choice field.
///
/// The label is a display convenience (first character capitalized); the
/// value is the verbatim choice string and is what gets submitted back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

/// Rendering options for one form field.
///
/// `required` and `attr` are always present; the optional entries are omitted
/// entirely when the prop does not provide them, so they never override a
/// renderer's own defaults with explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldOptions {
    pub required: bool,
    pub attr: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Initial field value, from the prop's declared default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Opaque pass-through options the renderer may interpret
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// One editable field of a form specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    pub field_type: FieldType,
    pub options: FieldOptions,
}

/// The derived, per-request description of editable fields for a component.
/// Field order follows prop declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub component: String,
    pub fields: Vec<FormField>,
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Props bucketed under one group name, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyGroup {
    pub name: String,
    pub props: Vec<String>,
}

/// Builds form specifications from registered prop specs. Never touches an
/// instance.
#[derive(Debug, Clone, Copy)]
pub struct PreviewFormBuilder<'a> {
    registry: &'a PreviewRegistry,
}

impl<'a> PreviewFormBuilder<'a> {
    pub fn new(registry: &'a PreviewRegistry) -> Self {
        Self { registry }
    }

    /// One field per declared prop, in declaration order. Unknown components
    /// yield an empty form, consistent with the analyzer's lookup-miss
    /// semantics.
    pub fn build_form_spec(&self, component: &str) -> FormSpec {
        let props = self
            .registry
            .get(component)
            .map(|entry| entry.props())
            .unwrap_or(&[]);
        FormSpec {
            component: component.to_string(),
            fields: props
                .iter()
                .map(|prop| FormField {
                    name: prop.name.clone(),
                    field_type: FieldType::from_tag(&prop.kind),
                    options: build_field_options(prop),
                })
                .collect(),
        }
    }

    /// Bucket prop names by group. Bucket order is first-seen declaration
    /// order; within a bucket, declaration order is preserved.
    pub fn property_groups(&self, component: &str) -> Vec<PropertyGroup> {
        let props = self
            .registry
            .get(component)
            .map(|entry| entry.props())
            .unwrap_or(&[]);
        let mut groups: Vec<PropertyGroup> = Vec::new();
        for prop in props {
            let name = prop.group_name();
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.props.push(prop.name.clone()),
                None => groups.push(PropertyGroup {
                    name: name.to_string(),
                    props: vec![prop.name.clone()],
                }),
            }
        }
        groups
    }
}

fn build_field_options(prop: &PropSpec) -> FieldOptions {
    let mut options = FieldOptions {
        required: prop.required,
        ..FieldOptions::default()
    };
    if let Some(label) = &prop.label {
        options.label = Some(label.clone());
    }
    if let Some(help) = &prop.help {
        options.help = Some(help.clone());
    }
    if let Some(default) = &prop.default {
        options.data = Some(default.clone());
    }
    if !prop.choices.is_empty() {
        options.choices = prop
            .choices
            .iter()
            .map(|choice| Choice {
                label: capitalize_first(choice),
                value: choice.clone(),
            })
            .collect();
    }
    apply_form_options(&mut options, &prop.form_options);
    options
}

/// Shallow-merge the prop's opaque options over the built ones. Keys naming a
/// built-in option replace it; anything else lands in `extra`. Explicit
/// per-prop overrides always win.
fn apply_form_options(options: &mut FieldOptions, overrides: &BTreeMap<String, Value>) {
    for (key, value) in overrides {
        match (key.as_str(), value) {
            ("required", v) => options.required = is_truthy(v),
            ("label", Value::Null) => options.label = None,
            ("label", Value::String(s)) => options.label = Some(s.clone()),
            ("help", Value::Null) => options.help = None,
            ("help", Value::String(s)) => options.help = Some(s.clone()),
            ("data", Value::Null) => options.data = None,
            ("data", v) => options.data = Some(v.clone()),
            ("attr", Value::Object(map)) => {
                options.attr = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            }
            ("choices", Value::Object(map)) => {
                options.choices = map
                    .iter()
                    .map(|(label, v)| Choice {
                        label: label.clone(),
                        value: match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        },
                    })
                    .collect();
            }
            _ => {
                options.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Uppercase the first character (display convenience for choice labels).
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropType, DEFAULT_GROUP};
    use crate::registry::ComponentEntry;
    use serde_json::json;

    fn registry() -> PreviewRegistry {
        let mut registry = PreviewRegistry::new();
        registry
            .register(
                ComponentEntry::new("acme::ui::Button")
                    .prop(
                        PropSpec::new("text", PropType::String)
                            .label("Button text")
                            .required(),
                    )
                    .prop(
                        PropSpec::new("variant", PropType::String)
                            .kind("choice")
                            .choices(["primary", "danger"])
                            .default_value("primary")
                            .group("appearance"),
                    )
                    .prop(
                        PropSpec::new("disabled", PropType::Boolean)
                            .kind("checkbox")
                            .group("behavior"),
                    )
                    .prop(PropSpec::new("tooltip", PropType::String).kind("hologram")),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_from_tag_lookup_is_total() {
        assert_eq!(FieldType::from_tag("text"), FieldType::Text);
        assert_eq!(FieldType::from_tag("textarea"), FieldType::TextArea);
        assert_eq!(FieldType::from_tag("number"), FieldType::Number);
        assert_eq!(FieldType::from_tag("checkbox"), FieldType::Checkbox);
        assert_eq!(FieldType::from_tag("choice"), FieldType::Choice);
        assert_eq!(FieldType::from_tag("hologram"), FieldType::Text);
        assert_eq!(FieldType::from_tag(""), FieldType::Text);
    }

    #[test]
    fn test_one_field_per_prop_in_order() {
        let registry = registry();
        let builder = PreviewFormBuilder::new(&registry);
        let form = builder.build_form_spec("acme::ui::Button");
        let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["text", "variant", "disabled", "tooltip"]);
        // unknown control tag degrades to a text field
        assert_eq!(form.field("tooltip").unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn test_unknown_component_yields_empty_form() {
        let registry = registry();
        let builder = PreviewFormBuilder::new(&registry);
        assert!(builder.build_form_spec("acme::ui::Missing").is_empty());
    }

    #[test]
    fn test_absent_options_are_omitted() {
        let registry = registry();
        let builder = PreviewFormBuilder::new(&registry);
        let form = builder.build_form_spec("acme::ui::Button");
        let disabled = form.field("disabled").unwrap();
        assert!(disabled.options.label.is_none());
        assert!(disabled.options.help.is_none());
        assert!(disabled.options.data.is_none());
        assert!(disabled.options.attr.is_empty());
    }

    #[test]
    fn test_choice_labels_capitalized_values_verbatim() {
        let registry = registry();
        let builder = PreviewFormBuilder::new(&registry);
        let form = builder.build_form_spec("acme::ui::Button");
        let variant = form.field("variant").unwrap();
        assert_eq!(variant.field_type, FieldType::Choice);
        assert_eq!(
            variant.options.choices,
            vec![
                Choice { label: "Primary".to_string(), value: "primary".to_string() },
                Choice { label: "Danger".to_string(), value: "danger".to_string() },
            ]
        );
        assert_eq!(variant.options.data, Some(json!("primary")));
    }

    #[test]
    fn test_extra_options_override_built_ones() {
        let mut registry = PreviewRegistry::new();
        registry
            .register(
                ComponentEntry::new("Banner").prop(
                    PropSpec::new("message", PropType::String)
                        .label("Message")
                        .form_option("label", "Override")
                        .form_option("rows", 4)
                        .form_option("required", true),
                ),
            )
            .unwrap();
        let builder = PreviewFormBuilder::new(&registry);
        let form = builder.build_form_spec("Banner");
        let field = form.field("message").unwrap();
        assert_eq!(field.options.label.as_deref(), Some("Override"));
        assert!(field.options.required);
        assert_eq!(field.options.extra.get("rows"), Some(&json!(4)));
    }

    #[test]
    fn test_property_groups_first_seen_order() {
        let mut registry = PreviewRegistry::new();
        registry
            .register(
                ComponentEntry::new("Panel")
                    .prop(PropSpec::new("p1", PropType::String).group("layout"))
                    .prop(PropSpec::new("p2", PropType::String))
                    .prop(PropSpec::new("p3", PropType::String).group("layout")),
            )
            .unwrap();
        let builder = PreviewFormBuilder::new(&registry);
        let groups = builder.property_groups("Panel");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "layout");
        assert_eq!(groups[0].props, vec!["p1", "p3"]);
        assert_eq!(groups[1].name, DEFAULT_GROUP);
        assert_eq!(groups[1].props, vec!["p2"]);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("primary"), "Primary");
        assert_eq!(capitalize_first("a"), "A");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }
}
