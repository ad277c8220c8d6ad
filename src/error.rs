use thiserror::Error;

pub type PreviewResult<T> = Result<T, PreviewError>;

#[derive(Error, Debug, Clone)]
pub enum PreviewError {
    #[error("Unknown component '{component}': not registered for preview")]
    UnknownComponent { component: String },

    #[error("Component '{component}' is already registered")]
    DuplicateComponent { component: String },

    #[error("Duplicate prop '{prop}' for component '{component}'")]
    DuplicateProp { component: String, prop: String },

    #[error("Invalid component name '{name}': must be identifier segments separated by '::'")]
    InvalidComponentName { name: String },

    #[error("Invalid prop name '{name}' for component '{component}': must be a camelCase identifier")]
    InvalidPropName { component: String, name: String },

    #[error("Unknown prop type '{value}' for prop '{prop}' in component '{component}'. Expected one of: string, text, number, boolean, color")]
    UnknownPropType {
        component: String,
        prop: String,
        value: String,
    },

    #[error("Prop '{prop}' in component '{component}' is a choice field but declares no choices")]
    MissingChoices { component: String, prop: String },

    #[error("Invalid default for prop '{prop}' in component '{component}': {reason}")]
    InvalidDefault {
        component: String,
        prop: String,
        reason: String,
    },

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("YAML error: {0}")]
    YamlError(String),
}

impl From<serde_yaml::Error> for PreviewError {
    fn from(err: serde_yaml::Error) -> Self {
        PreviewError::YamlError(err.to_string())
    }
}
