//! # supermarket-auth-core
//!
//! Detects supermarket login redirects inside a webview's navigation stream
//! and pulls the authorization code out of them.
//!
//! A host that owns the webview reports every pending navigation; the core
//! tells it whether to let the navigation proceed or to cancel it and show
//! the captured code.
//!
//! ## Quick Start
//!
//! ```rust
//! use supermarket_auth_core::{
//!     NavigationDecision, NavigationEvent, ProviderRegistry, RedirectMatcher, ResultQuery,
//!     intercept,
//! };
//!
//! let matcher = RedirectMatcher::new(ProviderRegistry::builtin());
//! let event = NavigationEvent::will_redirect("https://loyalty-app.jumbo.com/home?code=abc123");
//!
//! match intercept(&matcher, &event) {
//!     NavigationDecision::Intercept(result) => {
//!         // cancel the navigation, then load the result page with this query
//!         let query = ResultQuery::from(&result).to_query_string().unwrap();
//!         assert_eq!(query, "supermarket-id=jumbo&supermarket-code=abc123");
//!     }
//!     NavigationDecision::Proceed => unreachable!(),
//! }
//! ```
//!
//! ## Matching rules
//!
//! Providers are scanned in registry order. A provider claims a URL when the
//! URL literally starts with its redirect prefix **and** the URL's query has
//! its code parameter. A prefix hit without the parameter, or a URL that
//! does not parse, moves on to the next provider. An empty code is still a
//! code.

pub mod config;
pub mod error;
pub mod handoff;
pub mod matcher;
pub mod navigation;
pub mod provider;
pub mod registry;


pub use config::RegistryConfig;
pub use error::AuthError;
pub use handoff::{ResultQuery, View};
pub use matcher::{ExtractionResult, RedirectMatcher, extract_query_param};
pub use navigation::{NavigationDecision, NavigationEvent, NavigationKind, intercept};
pub use provider::{ProviderDescriptor, builtin_providers};
pub use registry::ProviderRegistry;
