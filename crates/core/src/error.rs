use thiserror::Error;

/// Errors raised while rendering a single block.
///
/// These never escape the renderer: each one is caught at the block boundary,
/// reported to the caller's error hook, and replaced with a fallback outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The component rejected its input or failed while producing output.
    #[error("component `{component}` failed to render: {message}")]
    Render {
        /// Component name
        component: String,
        /// Error message
        message: String,
    },
    /// The component panicked while rendering.
    #[error("component `{component}` panicked: {message}")]
    Panicked {
        /// Component name
        component: String,
        /// Panic payload, when it was a string
        message: String,
    },
    /// A deferred component could not be constructed.
    #[error("component `{component}` failed to load: {message}")]
    ComponentLoad {
        /// Component name
        component: String,
        /// Error message
        message: String,
    },
}

impl BlockError {
    /// Create a render error for the named component
    pub fn render(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a panic error for the named component
    pub fn panicked(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Panicked {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a load error for the named component
    pub fn load(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ComponentLoad {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Name of the component that produced this error.
    pub fn component(&self) -> &str {
        match self {
            BlockError::Render { component, .. }
            | BlockError::Panicked { component, .. }
            | BlockError::ComponentLoad { component, .. } => component,
        }
    }
}

/// Errors that can occur while loading registry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON configuration could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML configuration could not be parsed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(String),
    /// The file extension does not name a supported format.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
    /// A registry key in the configuration is empty or otherwise unusable.
    #[error("invalid registry key `{key}`: {reason}")]
    InvalidKey {
        /// Offending key as written
        key: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
