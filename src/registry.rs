use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::error::{PreviewError, PreviewResult};
use crate::metadata::ComponentMetadata;
use crate::property::PropSpec;
use crate::value::ValueMap;

/// Outcome of a property write on a preview instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Applied,
    NoSuchProperty,
}

/// The instance capability every previewable component provides: read and
/// write props by name. Writes to unknown props report
/// [`SetOutcome::NoSuchProperty`] instead of failing, so callers can ignore
/// extra form fields.
pub trait PreviewInstance {
    /// The component id this instance belongs to (e.g. `"acme::ui::Card"`)
    fn type_name(&self) -> &str;

    /// Current value of a prop; `None` when the instance does not expose it.
    /// Exposed-but-unset props read as `Some(Value::Null)`.
    fn get(&self, prop: &str) -> Option<Value>;

    /// Write a prop value.
    fn set(&mut self, prop: &str, value: Value) -> SetOutcome;
}

type Constructor = Box<dyn Fn() -> Box<dyn PreviewInstance> + Send + Sync>;

/// A registered previewable component: id, optional documentation metadata,
/// prop specs in declaration order, and a constructor.
///
/// Without an explicit constructor the component instantiates as a map-backed
/// [`ValueInstance`] whose prop set is exactly the declared props.
pub struct ComponentEntry {
    name: String,
    metadata: Option<ComponentMetadata>,
    props: Vec<PropSpec>,
    constructor: Option<Constructor>,
}

impl ComponentEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
            props: Vec::new(),
            constructor: None,
        }
    }

    pub fn metadata(mut self, metadata: ComponentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn prop(mut self, prop: PropSpec) -> Self {
        self.props.push(prop);
        self
    }

    /// Provide a constructor for a struct-backed component.
    pub fn constructor<F, T>(mut self, ctor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: PreviewInstance + 'static,
    {
        self.constructor = Some(Box::new(move || Box::new(ctor())));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_metadata(&self) -> Option<&ComponentMetadata> {
        self.metadata.as_ref()
    }

    pub fn props(&self) -> &[PropSpec] {
        &self.props
    }

    /// Look up one prop spec by name.
    pub fn prop_spec(&self, name: &str) -> Option<&PropSpec> {
        self.props.iter().find(|p| p.name == name)
    }

    pub(crate) fn instantiate(&self) -> Box<dyn PreviewInstance> {
        match &self.constructor {
            Some(ctor) => ctor(),
            None => Box::new(ValueInstance::for_entry(self)),
        }
    }
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .field("props", &self.props)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

/// A map-backed preview instance for components declared without a concrete
/// type (e.g. from a manifest). Its prop set is fixed at creation; writes to
/// other names report `NoSuchProperty`.
#[derive(Debug, Clone)]
pub struct ValueInstance {
    type_name: String,
    declared: Vec<String>,
    values: ValueMap,
}

impl ValueInstance {
    pub fn new<I, S>(type_name: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            declared: props.into_iter().map(Into::into).collect(),
            values: ValueMap::new(),
        }
    }

    fn for_entry(entry: &ComponentEntry) -> Self {
        Self::new(entry.name(), entry.props().iter().map(|p| p.name.clone()))
    }
}

impl PreviewInstance for ValueInstance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get(&self, prop: &str) -> Option<Value> {
        if !self.declared.iter().any(|p| p == prop) {
            return None;
        }
        Some(self.values.get(prop).cloned().unwrap_or(Value::Null))
    }

    fn set(&mut self, prop: &str, value: Value) -> SetOutcome {
        if !self.declared.iter().any(|p| p == prop) {
            return SetOutcome::NoSuchProperty;
        }
        self.values.insert(prop.to_string(), value);
        SetOutcome::Applied
    }
}

/// The static registry mapping component ids to their preview declarations.
///
/// Populated once at startup and read everywhere else. All read paths take
/// `&self`; a shared registry can serve concurrent requests.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    components: HashMap<String, ComponentEntry>,
    order: Vec<String>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component entry.
    ///
    /// Rejects duplicate component ids and duplicate prop names within the
    /// entry.
    pub fn register(&mut self, entry: ComponentEntry) -> PreviewResult<()> {
        if self.components.contains_key(entry.name()) {
            return Err(PreviewError::DuplicateComponent {
                component: entry.name().to_string(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for prop in entry.props() {
            if !seen.insert(prop.name.as_str()) {
                return Err(PreviewError::DuplicateProp {
                    component: entry.name().to_string(),
                    prop: prop.name.clone(),
                });
            }
        }
        self.order.push(entry.name().to_string());
        self.components.insert(entry.name().to_string(), entry);
        Ok(())
    }

    pub fn get(&self, component: &str) -> Option<&ComponentEntry> {
        self.components.get(component)
    }

    pub fn contains(&self, component: &str) -> bool {
        self.components.contains_key(component)
    }

    /// Registered entries in registration order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentEntry> {
        self.order.iter().filter_map(|name| self.components.get(name))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
