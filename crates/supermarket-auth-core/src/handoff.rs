//! Passing an extraction result to the presentation layer, and resolving
//! what the presentation layer should show.

use serde::Serialize;

use crate::error::AuthError;
use crate::matcher::ExtractionResult;
use crate::provider::ProviderDescriptor;
use crate::registry::ProviderRegistry;

const PROVIDER_ID_KEY: &str = "supermarket-id";
const CODE_KEY: &str = "supermarket-code";

/// Query carried to the result page after an interception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultQuery {
    #[serde(rename = "supermarket-id")]
    pub provider_id: String,
    #[serde(rename = "supermarket-code")]
    pub code: String,
}

impl ResultQuery {
    pub fn new(provider_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            code: code.into(),
        }
    }

    pub fn to_query_string(&self) -> Result<String, AuthError> {
        Ok(serde_urlencoded::to_string(self)?)
    }

    /// Parse a query string, with or without its leading `?`.
    ///
    /// The query comes from outside the process, so anything that does not
    /// carry both keys is treated as no query at all. When a key repeats, its
    /// first value wins and later ones are ignored.
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut provider_id = None;
        let mut code = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                PROVIDER_ID_KEY => &mut provider_id,
                CODE_KEY => &mut code,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Some(Self {
            provider_id: provider_id?,
            code: code?,
        })
    }
}

impl From<&ExtractionResult<'_>> for ResultQuery {
    fn from(result: &ExtractionResult<'_>) -> Self {
        Self::new(result.provider.id.clone(), result.code.clone())
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    /// Entry page: one authorization link per provider, in registry order
    Listing(&'a [ProviderDescriptor]),
    /// A code was captured for a known provider
    Result {
        provider: &'a ProviderDescriptor,
        code: String,
    },
}

impl<'a> View<'a> {
    /// Unknown or forged provider ids fall back to the listing.
    pub fn resolve(registry: &'a ProviderRegistry, query: Option<&ResultQuery>) -> Self {
        let Some(query) = query else {
            return Self::Listing(registry.list_providers());
        };

        match registry.find_by_id(&query.provider_id) {
            Some(provider) => Self::Result {
                provider,
                code: query.code.clone(),
            },
            None => {
                log::warn!(
                    "Unknown provider id '{}' in result query",
                    query.provider_id
                );
                Self::Listing(registry.list_providers())
            }
        }
    }

    pub fn from_query_string(registry: &'a ProviderRegistry, query: &str) -> Self {
        Self::resolve(registry, ResultQuery::parse(query).as_ref())
    }
}
