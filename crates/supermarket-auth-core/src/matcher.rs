//! Redirect detection and authorization code extraction.

use url::Url;

use crate::provider::ProviderDescriptor;
use crate::registry::ProviderRegistry;

/// A completed redirect: the provider that owns it and the code it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult<'a> {
    pub provider: &'a ProviderDescriptor,
    /// May be empty; an empty value is still a successful extraction
    pub code: String,
}

/// Classifies candidate URLs against a registry.
///
/// Holds only a shared reference, so it is cheap to copy into every
/// window or thread that observes navigations.
#[derive(Debug, Clone, Copy)]
pub struct RedirectMatcher<'a> {
    registry: &'a ProviderRegistry,
}

impl<'a> RedirectMatcher<'a> {
    pub fn new(registry: &'a ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ProviderRegistry {
        self.registry
    }

    /// Find the first provider, in registry order, whose redirect prefix the
    /// URL starts with *and* whose code parameter is present in the query.
    ///
    /// A prefix hit without the parameter (or with a URL that fails to
    /// parse) does not stop the scan; later providers are still tried.
    pub fn match_url(&self, candidate: &str) -> Option<ExtractionResult<'a>> {
        for provider in self.registry {
            if !provider.owns(candidate) {
                continue;
            }

            match extract_query_param(candidate, &provider.code_param) {
                Some(code) => {
                    log::debug!("Redirect matched provider '{}'", provider.id);
                    return Some(ExtractionResult { provider, code });
                }
                None => {
                    log::trace!(
                        "Prefix of '{}' matched but no '{}' parameter, continuing",
                        provider.id,
                        provider.code_param
                    );
                }
            }
        }

        None
    }
}

/// Read the first value of query parameter `name` from `url`.
///
/// Values are form-urlencoded decoded. Unparseable URLs yield `None`.
pub fn extract_query_param(url: &str, name: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::trace!("Ignoring unparseable URL: {err}");
            return None;
        }
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_registry() -> ProviderRegistry {
        ProviderRegistry::new(vec![ProviderDescriptor::new(
            "example",
            "Example",
            "https://example.com/login",
            "https://example.com/done",
        )])
        .unwrap()
    }

    #[test]
    fn test_match_extracts_code() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        let result = matcher
            .match_url("https://example.com/done?code=abc123")
            .unwrap();
        assert_eq!(result.provider.id, "example");
        assert_eq!(result.code, "abc123");
    }

    #[test]
    fn test_prefix_without_code_is_absent() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        assert!(matcher.match_url("https://example.com/done").is_none());
        assert!(
            matcher
                .match_url("https://example.com/done?state=xyz")
                .is_none()
        );
    }

    #[test]
    fn test_foreign_url_is_absent() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        assert!(matcher.match_url("https://other.com/x?code=abc123").is_none());
        assert!(matcher.match_url("").is_none());
    }

    #[test]
    fn test_empty_code_is_a_match() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        let result = matcher.match_url("https://example.com/done?code=").unwrap();
        assert_eq!(result.code, "");

        let result = matcher.match_url("https://example.com/done?code").unwrap();
        assert_eq!(result.code, "");
    }

    #[test]
    fn test_code_is_decoded() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        let result = matcher
            .match_url("https://example.com/done?code=a%2Fb+c&state=1")
            .unwrap();
        assert_eq!(result.code, "a/b c");
    }

    #[test]
    fn test_first_value_wins() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        let result = matcher
            .match_url("https://example.com/done?code=first&code=second")
            .unwrap();
        assert_eq!(result.code, "first");
    }

    #[test]
    fn test_fragment_is_not_searched() {
        let registry = example_registry();
        let matcher = RedirectMatcher::new(&registry);

        assert!(matcher.match_url("https://example.com/done#code=abc").is_none());
    }

    #[test]
    fn test_extract_query_param() {
        let url = "appie://login-exit?code=abc&state=def";
        assert_eq!(extract_query_param(url, "code"), Some("abc".to_string()));
        assert_eq!(extract_query_param(url, "state"), Some("def".to_string()));
        assert_eq!(extract_query_param(url, "missing"), None);
        assert_eq!(extract_query_param("not a url?code=abc", "code"), None);
    }
}
