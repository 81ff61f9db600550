//! Typed error handling for hyperexpress
//!
//! Link resolution never fails: unresolved tokens are either left in place or
//! the optional link is dropped. Errors only come from the edges of the
//! system, namely building a resource for a content type and loading
//! configuration.
//!
//! # Error Categories
//!
//! - [`ResourceError`]: Errors raised while creating a resource
//! - [`ConfigError`]: Errors related to configuration parsing and applying

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HyperError>;

/// The main error type for hyperexpress
#[derive(Debug, Error)]
pub enum HyperError {
    /// Resource creation errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HyperError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HyperError::Resource(ResourceError::UnsupportedContentType { .. }) => {
                "UNSUPPORTED_CONTENT_TYPE"
            }
            HyperError::Resource(ResourceError::Conversion { .. }) => "CONVERSION_ERROR",
            HyperError::Config(_) => "CONFIG_ERROR",
        }
    }
}

// =============================================================================
// Resource Errors
// =============================================================================

/// Errors related to resource creation
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No factory strategy is registered for the content type
    #[error("No resource factory strategy registered for content type '{content_type}'")]
    UnsupportedContentType { content_type: String },

    /// The domain object could not be converted into a resource
    #[error("Failed to convert '{type_name}' into a resource: {source}")]
    Conversion {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to relationship configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configuration section names a type that was never registered
    #[error("Unknown type '{type_name}' in relationship configuration")]
    UnknownType { type_name: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
