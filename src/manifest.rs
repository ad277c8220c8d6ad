//! YAML manifest declarations for previewable components.
//!
//! A manifest declares one component or a `components:` list. Per component:
//! the `component` id, optional documentation metadata (`name`,
//! `description`, `category`, `examples`) and a `props` list mirroring
//! [`PropSpec`]:
//!
//! ```yaml
//! component: acme::ui::Card
//! name: Card
//! category: Content
//! props:
//!   - name: title
//!     type: string
//!     required: true
//!     default: Untitled
//!   - name: featured
//!     kind: checkbox
//!     default: false
//! ```
//!
//! Manifest-declared components instantiate as map-backed value instances;
//! a concrete constructor can still be attached after parsing.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::error::{PreviewError, PreviewResult};
use crate::metadata::{ComponentExample, ComponentMetadata};
use crate::property::{PropSpec, PropType};
use crate::registry::{ComponentEntry, PreviewRegistry};
use crate::value::{coerce_value, ValueMap};

static COMPONENT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static PROP_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn component_name_regex() -> &'static Regex {
    COMPONENT_NAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$").unwrap())
}

fn prop_name_regex() -> &'static Regex {
    PROP_NAME_REGEX.get_or_init(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").unwrap())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Many { components: Vec<ManifestComponent> },
    Single(ManifestComponent),
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestComponent {
    component: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    examples: Vec<ManifestExample>,
    #[serde(default)]
    props: Vec<ManifestProp>,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestExample {
    label: String,
    #[serde(default)]
    values: ValueMap,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestProp {
    name: String,
    #[serde(rename = "type", default)]
    prop_type: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: BTreeMap<String, Value>,
    #[serde(default)]
    group: Option<String>,
}

/// Parse a manifest into component entries, without registering them.
pub fn parse_manifest(yaml: &str) -> PreviewResult<Vec<ComponentEntry>> {
    let file: ManifestFile = serde_yaml::from_str(yaml)?;
    let components = match file {
        ManifestFile::Many { components } => components,
        ManifestFile::Single(component) => vec![component],
    };
    components.into_iter().map(convert_component).collect()
}

/// Parse a manifest and register everything into a fresh registry.
pub fn registry_from_manifest(yaml: &str) -> PreviewResult<PreviewRegistry> {
    let mut registry = PreviewRegistry::new();
    registry.register_manifest(yaml)?;
    Ok(registry)
}

impl PreviewRegistry {
    /// Parse a manifest and register its components into this registry.
    pub fn register_manifest(&mut self, yaml: &str) -> PreviewResult<()> {
        for entry in parse_manifest(yaml)? {
            self.register(entry)?;
        }
        Ok(())
    }
}

fn convert_component(manifest: ManifestComponent) -> PreviewResult<ComponentEntry> {
    if !component_name_regex().is_match(&manifest.component) {
        return Err(PreviewError::InvalidComponentName {
            name: manifest.component,
        });
    }

    let mut entry = ComponentEntry::new(manifest.component.as_str());

    let metadata = build_metadata(&manifest);
    if !metadata.is_empty() {
        entry = entry.metadata(metadata);
    }

    let mut seen = HashSet::new();
    for prop in manifest.props {
        if !seen.insert(prop.name.clone()) {
            return Err(PreviewError::DuplicateProp {
                component: manifest.component.clone(),
                prop: prop.name,
            });
        }
        entry = entry.prop(convert_prop(&manifest.component, prop)?);
    }

    Ok(entry)
}

fn build_metadata(manifest: &ManifestComponent) -> ComponentMetadata {
    let mut metadata = ComponentMetadata::new();
    metadata.name = manifest.name.clone();
    metadata.description = manifest.description.clone();
    metadata.category = manifest.category.clone();
    metadata.examples = manifest
        .examples
        .iter()
        .map(|example| ComponentExample {
            label: example.label.clone(),
            values: example.values.clone(),
        })
        .collect();
    metadata
}

fn convert_prop(component: &str, manifest: ManifestProp) -> PreviewResult<PropSpec> {
    if !prop_name_regex().is_match(&manifest.name) {
        return Err(PreviewError::InvalidPropName {
            component: component.to_string(),
            name: manifest.name,
        });
    }

    let kind = manifest.kind.unwrap_or_else(|| "text".to_string());
    let prop_type =
        resolve_prop_type(component, &manifest.name, manifest.prop_type.as_deref(), &kind)?;

    if kind == "choice" && manifest.choices.is_empty() {
        return Err(PreviewError::MissingChoices {
            component: component.to_string(),
            prop: manifest.name,
        });
    }

    let mut spec = PropSpec::new(manifest.name, prop_type).kind(kind);
    if manifest.nullable {
        spec = spec.nullable();
    }
    if let Some(label) = manifest.label {
        spec = spec.label(label);
    }
    if let Some(help) = manifest.help {
        spec = spec.help(help);
    }
    if !manifest.choices.is_empty() {
        spec = spec.choices(manifest.choices);
    }
    if manifest.required {
        spec = spec.required();
    }
    if let Some(group) = manifest.group {
        spec = spec.group(group);
    }
    spec.form_options = manifest.options;

    if let Some(default) = manifest.default {
        let coerced = coerce_value(&spec, default.clone());
        if coerced != default {
            return Err(PreviewError::InvalidDefault {
                component: component.to_string(),
                prop: spec.name,
                reason: format!("declared {} but coerces to {}", default, coerced),
            });
        }
        spec.default = Some(default);
    }

    Ok(spec)
}

/// Resolve the declared value type. When `type` is omitted it is inferred
/// from the control kind: checkboxes hold booleans, number fields hold
/// numbers, everything else holds strings.
fn resolve_prop_type(
    component: &str,
    prop: &str,
    declared: Option<&str>,
    kind: &str,
) -> PreviewResult<PropType> {
    match declared {
        Some("string") | Some("text") => Ok(PropType::String),
        Some("number") => Ok(PropType::Number),
        Some("boolean") => Ok(PropType::Boolean),
        Some("color") => Ok(PropType::Color),
        Some(other) => Err(PreviewError::UnknownPropType {
            component: component.to_string(),
            prop: prop.to_string(),
            value: other.to_string(),
        }),
        None => Ok(match kind {
            "checkbox" => PropType::Boolean,
            "number" => PropType::Number,
            _ => PropType::String,
        }),
    }
}
