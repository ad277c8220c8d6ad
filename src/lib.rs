//! # propstage
//!
//! A property-driven preview stage for server-rendered UI components.
//!
//! Components declare preview metadata — display name, category, example
//! configurations, per-prop form hints — in a static registry (or a YAML
//! manifest), and `propstage` derives everything a preview page needs: a
//! form specification for editing props, instances materialized from
//! submitted form data with type-directed value coercion, and a
//! documentation view.
//!
//! ## Features
//! - Explicit registry of previewable components, no runtime reflection
//! - Form specs derived from prop declarations, grouped for layout
//! - Checkbox and nullable-string normalization applied on every update
//! - Live preview stage that merges partial updates into persistent state
//! - YAML manifest declarations with load-time validation
//!
//! ## Example — registering and mounting a preview
//! ```ignore
//! use propstage::{ComponentEntry, PreviewRegistry, PreviewStage, PropSpec, PropType, StageOptions};
//!
//! let mut registry = PreviewRegistry::new();
//! registry.register(
//!     ComponentEntry::new("acme::ui::Card")
//!         .prop(PropSpec::new("title", PropType::String).required().default_value("Untitled"))
//!         .prop(PropSpec::new("featured", PropType::Boolean).kind("checkbox").default_value(false)),
//! )?;
//!
//! let stage = PreviewStage::mount(&registry, "acme::ui::Card", Default::default(), StageOptions::default())?;
//! let form = stage.form();
//! let instance = stage.instance()?;
//! ```
//!
//! ## Example — declaring components in a manifest
//! ```ignore
//! let registry = propstage::registry_from_manifest(r#"
//! component: acme::ui::Card
//! props:
//!   - name: title
//!     required: true
//! "#)?;
//! ```

pub mod analyzer;
pub mod documentation;
pub mod error;
pub mod factory;
pub mod form;
pub mod manifest;
pub mod metadata;
pub mod property;
pub mod registry;
pub mod stage;
pub mod value;

// --- Core types ---
pub use error::{PreviewError, PreviewResult};
pub use metadata::{ComponentExample, ComponentMetadata};
pub use property::{PropSpec, PropType, DEFAULT_GROUP};
pub use registry::{ComponentEntry, PreviewInstance, PreviewRegistry, SetOutcome, ValueInstance};
pub use value::{coerce_value, is_empty_value, is_truthy, ValueMap};

// --- Services ---
pub use analyzer::{display_name, PreviewAnalyzer};
pub use documentation::ComponentDocumentation;
pub use factory::InstanceFactory;
pub use form::{Choice, FieldOptions, FieldType, FormField, FormSpec, PreviewFormBuilder, PropertyGroup};
pub use stage::{PreviewStage, StageLayout, StageOptions, StageTheme};

/// Parse a YAML manifest into component entries, without registering them.
pub fn parse_manifest(yaml: &str) -> PreviewResult<Vec<ComponentEntry>> {
    manifest::parse_manifest(yaml)
}

/// Parse a YAML manifest and register everything into a fresh registry.
pub fn registry_from_manifest(yaml: &str) -> PreviewResult<PreviewRegistry> {
    manifest::registry_from_manifest(yaml)
}
