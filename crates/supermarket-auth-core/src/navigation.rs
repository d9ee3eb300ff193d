//! The decision a host makes for each navigation its webview is about to
//! perform.

use strum_macros::{Display, EnumString};

use crate::matcher::{ExtractionResult, RedirectMatcher};

/// Webview events that can carry a redirect URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NavigationKind {
    /// The page itself navigates (link, form, script)
    WillNavigate,
    /// A server-side redirect during a navigation
    WillRedirect,
}

/// One pending navigation reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub kind: NavigationKind,
    pub url: String,
}

impl NavigationEvent {
    pub fn new(kind: NavigationKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn will_navigate(url: impl Into<String>) -> Self {
        Self::new(NavigationKind::WillNavigate, url)
    }

    pub fn will_redirect(url: impl Into<String>) -> Self {
        Self::new(NavigationKind::WillRedirect, url)
    }
}

/// What the host must do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision<'a> {
    /// Let the navigation continue untouched
    Proceed,
    /// Cancel the navigation and show the result instead
    Intercept(ExtractionResult<'a>),
}

impl<'a> NavigationDecision<'a> {
    pub fn is_intercept(&self) -> bool {
        matches!(self, Self::Intercept(_))
    }

    pub fn into_result(self) -> Option<ExtractionResult<'a>> {
        match self {
            Self::Intercept(result) => Some(result),
            Self::Proceed => None,
        }
    }
}

/// Classify a navigation event. Must be called before the navigation is
/// allowed to complete.
pub fn intercept<'a>(
    matcher: &RedirectMatcher<'a>,
    event: &NavigationEvent,
) -> NavigationDecision<'a> {
    log::debug!("{} {}", event.kind, event.url);

    match matcher.match_url(&event.url) {
        Some(result) => {
            log::info!(
                "Intercepted {} to {} redirect",
                event.kind,
                result.provider.name
            );
            NavigationDecision::Intercept(result)
        }
        None => NavigationDecision::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProviderRegistry;
    use std::str::FromStr;

    #[test]
    fn test_kind_round_trips_through_strings() {
        assert_eq!(NavigationKind::WillNavigate.to_string(), "will-navigate");
        assert_eq!(NavigationKind::WillRedirect.to_string(), "will-redirect");
        assert_eq!(
            NavigationKind::from_str("will-redirect").unwrap(),
            NavigationKind::WillRedirect
        );
        assert!(NavigationKind::from_str("did-navigate").is_err());
    }

    #[test]
    fn test_intercepts_redirect() {
        let matcher = RedirectMatcher::new(ProviderRegistry::builtin());
        let event = NavigationEvent::will_redirect("appie://login-exit?code=xyz");

        let decision = intercept(&matcher, &event);
        assert!(decision.is_intercept());

        let result = decision.into_result().unwrap();
        assert_eq!(result.provider.id, "albert-heijn");
        assert_eq!(result.code, "xyz");
    }

    #[test]
    fn test_ordinary_navigation_proceeds() {
        let matcher = RedirectMatcher::new(ProviderRegistry::builtin());

        let events = [
            NavigationEvent::will_navigate("https://login.ah.nl/login?response_type=code"),
            NavigationEvent::will_navigate("https://loyalty-app.jumbo.com/home"),
            NavigationEvent::will_redirect("https://loyalty-app.jumbo.com/"),
        ];

        for event in &events {
            assert_eq!(intercept(&matcher, event), NavigationDecision::Proceed);
        }
    }
}
