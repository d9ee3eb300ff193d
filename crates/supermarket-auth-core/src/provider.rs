use serde::{Deserialize, Serialize};

/// A supermarket login the authenticator knows how to intercept.
///
/// `redirect_prefix` is compared against candidate URLs as a literal string,
/// so it must include the scheme and any path segments that identify the
/// redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Stable identifier, unique within a registry
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Where the user starts the login
    pub authorization_url: String,
    /// Any URL starting with this string belongs to the provider
    pub redirect_prefix: String,
    /// Query parameter carrying the authorization code on redirect
    #[serde(default = "default_code_param")]
    pub code_param: String,
}

fn default_code_param() -> String {
    "code".to_string()
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        authorization_url: impl Into<String>,
        redirect_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            authorization_url: authorization_url.into(),
            redirect_prefix: redirect_prefix.into(),
            code_param: default_code_param(),
        }
    }

    pub fn with_code_param(mut self, code_param: impl Into<String>) -> Self {
        self.code_param = code_param.into();
        self
    }

    /// Whether `url` literally begins with this provider's redirect prefix.
    pub fn owns(&self, url: &str) -> bool {
        url.starts_with(self.redirect_prefix.as_str())
    }
}

/// The supermarkets shipped with the authenticator, in matching order.
pub fn builtin_providers() -> Vec<ProviderDescriptor> {
    vec![
        ProviderDescriptor::new(
            "albert-heijn",
            "Albert Heijn",
            "https://login.ah.nl/login?response_type=code&client_id=appie-android&redirect_uri=appie://login-exit",
            "appie://login-exit",
        ),
        ProviderDescriptor::new(
            "jumbo",
            "Jumbo",
            "https://loyalty-app.jumbo.com",
            "https://loyalty-app.jumbo.com/home",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owns_is_case_sensitive_prefix() {
        let provider = ProviderDescriptor::new(
            "example",
            "Example",
            "https://example.com/login",
            "https://example.com/done",
        );

        assert!(provider.owns("https://example.com/done"));
        assert!(provider.owns("https://example.com/done?code=1"));
        assert!(provider.owns("https://example.com/doneother"));
        assert!(!provider.owns("https://EXAMPLE.com/done"));
        assert!(!provider.owns("http://example.com/done"));
        assert!(!provider.owns("https://example.com/"));
    }

    #[test]
    fn test_code_param_defaults_when_missing_from_toml() {
        let provider: ProviderDescriptor = toml::from_str(
            r#"
id = "plus"
name = "PLUS"
authorization_url = "https://plus.nl/login"
redirect_prefix = "plus://callback"
"#,
        )
        .unwrap();

        assert_eq!(provider.code_param, "code");
        assert_eq!(provider.redirect_prefix, "plus://callback");
    }

    #[test]
    fn test_builtin_order() {
        let ids: Vec<String> = builtin_providers().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["albert-heijn", "jumbo"]);
    }
}
