//! Session-token resolution.
//!
//! The guidance service authenticates interactive requests with a session
//! token the embedding page already holds. Where that token lives varies by
//! deployment (a hidden form field, a document meta tag, a cookie), so
//! sources are pluggable: the controller receives an ordered [`TokenChain`]
//! and the first source that produces a token wins.

use std::fmt;

/// A single place a session token may live.
pub trait TokenSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// The token, if this source currently holds one.
    fn token(&self) -> Option<String>;
}

/// Ordered token lookup across sources.
pub struct TokenChain {
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenChain {
    pub fn new(sources: Vec<Box<dyn TokenSource>>) -> Self {
        Self { sources }
    }

    /// The standard page ordering: embedded form field, then meta tag,
    /// then cookie.
    pub fn standard(form: FormToken, meta: MetaTagToken, cookie: CookieToken) -> Self {
        Self::new(vec![Box::new(form), Box::new(meta), Box::new(cookie)])
    }

    /// Resolve a token, first source wins.
    pub fn resolve(&self) -> Option<String> {
        for source in &self.sources {
            if let Some(token) = source.token() {
                tracing::debug!(source = source.name(), "resolved session token");
                return Some(token);
            }
        }
        None
    }
}

impl fmt::Debug for TokenChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.name()))
            .finish()
    }
}

/// Token embedded in a hidden form field, captured at page load.
pub struct FormToken(Option<String>);

impl FormToken {
    pub fn new(value: Option<String>) -> Self {
        Self(value)
    }
}

impl TokenSource for FormToken {
    fn name(&self) -> &str {
        "form"
    }

    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token declared in a document meta tag, captured at page load.
pub struct MetaTagToken(Option<String>);

impl MetaTagToken {
    pub fn new(value: Option<String>) -> Self {
        Self(value)
    }
}

impl TokenSource for MetaTagToken {
    fn name(&self) -> &str {
        "meta"
    }

    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

type CookieLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Token stored in a named cookie.
///
/// Reads through a jar lookup on every resolution, since cookies can be
/// rotated between requests.
pub struct CookieToken {
    cookie_name: String,
    jar: CookieLookup,
}

impl CookieToken {
    pub const DEFAULT_COOKIE: &'static str = "csrftoken";

    pub fn new(cookie_name: impl Into<String>, jar: CookieLookup) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            jar,
        }
    }
}

impl Default for CookieToken {
    /// An empty jar under the conventional cookie name.
    fn default() -> Self {
        Self::new(Self::DEFAULT_COOKIE, Box::new(|_| None))
    }
}

impl TokenSource for CookieToken {
    fn name(&self) -> &str {
        "cookie"
    }

    fn token(&self) -> Option<String> {
        (self.jar)(&self.cookie_name)
    }
}
