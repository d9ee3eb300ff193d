use thiserror::Error;

/// Main error type for the authenticator core.
///
/// Matching and lookups never fail; these errors only come out of loading,
/// validating and serializing configuration or hand-off data.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid provider table or configuration values
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File system errors while reading or writing configuration
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl AuthError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

/// Convert from TOML parse errors
impl From<toml::de::Error> for AuthError {
    fn from(err: toml::de::Error) -> Self {
        AuthError::serialization("TOML deserialization failed", err)
    }
}

/// Convert from TOML write errors
impl From<toml::ser::Error> for AuthError {
    fn from(err: toml::ser::Error) -> Self {
        AuthError::serialization("TOML serialization failed", err)
    }
}

/// Convert from query string encoding errors
impl From<serde_urlencoded::ser::Error> for AuthError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        AuthError::serialization("Query string serialization failed", err)
    }
}
