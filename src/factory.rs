use serde_json::Value;

use crate::error::{PreviewError, PreviewResult};
use crate::registry::{ComponentEntry, PreviewInstance, PreviewRegistry};
use crate::value::{coerce_value, ValueMap};

/// Creates and updates component instances from raw form data, applying the
/// type-directed coercion rule on every write.
#[derive(Debug, Clone, Copy)]
pub struct InstanceFactory<'a> {
    registry: &'a PreviewRegistry,
}

impl<'a> InstanceFactory<'a> {
    pub fn new(registry: &'a PreviewRegistry) -> Self {
        Self { registry }
    }

    fn entry(&self, component: &str) -> PreviewResult<&'a ComponentEntry> {
        self.registry
            .get(component)
            .ok_or_else(|| PreviewError::UnknownComponent {
                component: component.to_string(),
            })
    }

    /// Construct an instance and set every declared default, coerced.
    pub fn create_with_defaults(
        &self,
        component: &str,
    ) -> PreviewResult<Box<dyn PreviewInstance>> {
        let entry = self.entry(component)?;
        let mut instance = entry.instantiate();
        for prop in entry.props() {
            if let Some(default) = &prop.default {
                instance.set(&prop.name, coerce_value(prop, default.clone()));
            }
        }
        Ok(instance)
    }

    /// Construct an instance from submitted form data.
    ///
    /// Entries naming props the instance does not expose are silently
    /// ignored, so stray form fields never fail a render.
    pub fn create_from_form_data(
        &self,
        component: &str,
        data: &ValueMap,
    ) -> PreviewResult<Box<dyn PreviewInstance>> {
        let entry = self.entry(component)?;
        let mut instance = entry.instantiate();
        apply_form_data(entry, instance.as_mut(), data);
        Ok(instance)
    }

    /// Apply submitted form data to an existing instance, same rules as
    /// [`create_from_form_data`](Self::create_from_form_data).
    ///
    /// Props without a registered spec pass through uncoerced.
    pub fn update_from_form_data(&self, instance: &mut dyn PreviewInstance, data: &ValueMap) {
        let entry = self.registry.get(instance.type_name());
        for (name, value) in data {
            let coerced = match entry.and_then(|e| e.prop_spec(name)) {
                Some(spec) => coerce_value(spec, value.clone()),
                None => value.clone(),
            };
            instance.set(name, coerced);
        }
    }

    /// Current values of every declared prop. Props the instance does not
    /// expose read as `Null` rather than failing.
    pub fn extract_property_values(&self, instance: &dyn PreviewInstance) -> ValueMap {
        let mut values = ValueMap::new();
        if let Some(entry) = self.registry.get(instance.type_name()) {
            for prop in entry.props() {
                values.insert(
                    prop.name.clone(),
                    instance.get(&prop.name).unwrap_or(Value::Null),
                );
            }
        }
        values
    }

    /// The subset of declared props carrying a non-absent default, with the
    /// declared (uncoerced) default values. Empty for unknown components.
    pub fn default_values_for(&self, component: &str) -> ValueMap {
        let mut defaults = ValueMap::new();
        if let Some(entry) = self.registry.get(component) {
            for prop in entry.props() {
                if let Some(default) = &prop.default {
                    defaults.insert(prop.name.clone(), default.clone());
                }
            }
        }
        defaults
    }

    /// Run the full-set cleaning pass over submitted data.
    ///
    /// Every declared prop is visited — keys absent from `data` read as
    /// `Null` before coercion, so an unchecked checkbox that submits no field
    /// still resolves to `false`. Extra non-declared keys pass through
    /// untouched. Unknown components yield the data unchanged.
    pub fn clean_form_data(&self, component: &str, data: &ValueMap) -> ValueMap {
        let Some(entry) = self.registry.get(component) else {
            return data.clone();
        };
        let mut cleaned = ValueMap::new();
        for prop in entry.props() {
            let raw = data.get(&prop.name).cloned().unwrap_or(Value::Null);
            cleaned.insert(prop.name.clone(), coerce_value(prop, raw));
        }
        for (name, value) in data {
            cleaned
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        cleaned
    }
}

fn apply_form_data(entry: &ComponentEntry, instance: &mut dyn PreviewInstance, data: &ValueMap) {
    for (name, value) in data {
        let coerced = match entry.prop_spec(name) {
            Some(spec) => coerce_value(spec, value.clone()),
            None => value.clone(),
        };
        instance.set(name, coerced);
    }
}
