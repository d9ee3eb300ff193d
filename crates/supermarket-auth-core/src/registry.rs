//! Ordered table of known providers.
//!
//! Registration order is significant: the matcher scans providers front to
//! back and the first one yielding a code wins.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::AuthError;
use crate::provider::{ProviderDescriptor, builtin_providers};

static BUILTIN: Lazy<ProviderRegistry> = Lazy::new(|| ProviderRegistry {
    providers: builtin_providers(),
});

/// Immutable, ordered collection of [`ProviderDescriptor`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build a registry from a configured provider table.
    ///
    /// Rejects an empty table, blank ids, prefixes or code parameters, and
    /// duplicate ids.
    pub fn new(providers: Vec<ProviderDescriptor>) -> Result<Self, AuthError> {
        if providers.is_empty() {
            return Err(AuthError::configuration(
                "At least one provider must be registered",
            ));
        }

        let mut seen = HashSet::new();
        for provider in &providers {
            if provider.id.trim().is_empty() {
                return Err(AuthError::configuration("Provider id cannot be empty"));
            }
            if provider.redirect_prefix.is_empty() {
                return Err(AuthError::configuration(format!(
                    "Provider '{}' has an empty redirect prefix",
                    provider.id
                )));
            }
            if provider.code_param.is_empty() {
                return Err(AuthError::configuration(format!(
                    "Provider '{}' has an empty code parameter",
                    provider.id
                )));
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(AuthError::configuration(format!(
                    "Duplicate provider id '{}'",
                    provider.id
                )));
            }
        }

        log::debug!("Registered {} providers", providers.len());
        Ok(Self { providers })
    }

    /// The built-in supermarket table, created on first use.
    pub fn builtin() -> &'static ProviderRegistry {
        &BUILTIN
    }

    /// All providers in registration order
    pub fn list_providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    /// Look up a provider by id. Unknown ids (e.g. from an untrusted query
    /// string) simply yield `None`.
    pub fn find_by_id(&self, id: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProviderRegistry {
    type Item = &'a ProviderDescriptor;
    type IntoIter = std::slice::Iter<'a, ProviderDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}
