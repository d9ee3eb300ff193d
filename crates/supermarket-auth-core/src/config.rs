use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AuthError;
use crate::provider::{ProviderDescriptor, builtin_providers};
use crate::registry::ProviderRegistry;

/// Declarative provider table, usually read from TOML.
///
/// ```toml
/// include_builtin = true
///
/// [[providers]]
/// id = "plus"
/// name = "PLUS"
/// authorization_url = "https://www.plus.nl/inloggen"
/// redirect_prefix = "plus://callback"
/// code_param = "code"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Register the shipped supermarkets ahead of `providers`
    pub include_builtin: bool,
    /// Extra providers, matched after the built-ins in file order
    pub providers: Vec<ProviderDescriptor>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            providers: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Load from a TOML file; a missing or empty file gives the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthError::io(format!("Failed to read {}", path.display()), e)
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// The full ordered provider table this configuration describes
    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        let mut providers = if self.include_builtin {
            builtin_providers()
        } else {
            Vec::new()
        };
        providers.extend(self.providers.iter().cloned());
        providers
    }

    pub fn into_registry(self) -> Result<ProviderRegistry, AuthError> {
        ProviderRegistry::new(self.providers())
    }
}
