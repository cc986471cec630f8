//! Cookie-backed session store.
//!
//! Each request gets its own [`CookieSessionStore`] over the incoming
//! cookie jar. Writes and deletions are collected in the jar and leave the
//! handler as `Set-Cookie` headers when the jar is returned with the
//! response.

use std::sync::Mutex;

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use gasdesk_core::config::AppConfig;
use gasdesk_core::result::AppResult;
use gasdesk_core::traits::SessionStore;
use gasdesk_core::types::Session;

/// Attributes of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Cookie name.
    pub name: String,
    /// Cookie path.
    pub path: String,
    /// Lifetime of a freshly written cookie.
    pub max_age: time::Duration,
    /// Whether to set the `Secure` attribute.
    pub secure: bool,
}

impl CookiePolicy {
    /// Derive the policy from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.session.cookie_name.clone(),
            path: config.session.path.clone(),
            max_age: time::Duration::days(config.session.max_age_days),
            secure: config.session.is_secure(config.server.environment),
        }
    }

    /// The cookie carrying `token`. Readable by client script.
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.to_string()))
            .path(self.path.clone())
            .http_only(false)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.max_age)
            .build()
    }

    /// A cookie that, when removed from a jar, expires the session cookie.
    fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), "")).path(self.path.clone()).build()
    }
}

/// Session store over one request's cookie jar.
#[derive(Debug)]
pub struct CookieSessionStore {
    jar: Mutex<CookieJar>,
    policy: CookiePolicy,
}

impl CookieSessionStore {
    /// Wrap the request's jar.
    pub fn new(jar: CookieJar, policy: CookiePolicy) -> Self {
        Self {
            jar: Mutex::new(jar),
            policy,
        }
    }

    /// Whether the session cookie is present and non-empty.
    pub fn has_session(&self) -> bool {
        self.read_token().is_some()
    }

    /// The jar with every change made through this store, ready to be
    /// returned as part of a response.
    pub fn into_jar(self) -> CookieJar {
        self.jar
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the jar in its current state.
    pub fn jar(&self) -> CookieJar {
        self.with_jar(|jar| jar.clone())
    }

    fn read_token(&self) -> Option<String> {
        let name = self.policy.name.clone();
        self.with_jar(|jar| {
            jar.get(&name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })
    }

    fn with_jar<T>(&self, f: impl FnOnce(&CookieJar) -> T) -> T {
        let jar = self.jar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&jar)
    }

    fn replace_jar(&self, f: impl FnOnce(CookieJar) -> CookieJar) {
        let mut jar = self.jar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let current = std::mem::replace(&mut *jar, CookieJar::new());
        *jar = f(current);
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    async fn create_session(&self, token: &str) -> AppResult<()> {
        let cookie = self.policy.session_cookie(token);
        self.replace_jar(|jar| jar.add(cookie));
        Ok(())
    }

    async fn get_session(&self) -> AppResult<Option<Session>> {
        Ok(self.read_token().map(Session::new))
    }

    async fn delete_session(&self) -> AppResult<()> {
        let removal = self.policy.removal_cookie();
        self.replace_jar(|jar| jar.remove(removal));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::response::IntoResponse;
    use gasdesk_core::config::Environment;

    use super::*;

    fn policy(environment: Environment) -> CookiePolicy {
        let mut config = AppConfig::default();
        config.server.environment = environment;
        CookiePolicy::from_config(&config)
    }

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    fn set_cookie_headers(jar: CookieJar) -> Vec<String> {
        jar.into_response()
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_reads_incoming_cookie() {
        let store = CookieSessionStore::new(
            jar_with("session_token=abc; theme=dark"),
            policy(Environment::Development),
        );
        assert_eq!(store.get_session().await.unwrap(), Some(Session::new("abc")));
        assert!(store.has_session());
    }

    #[tokio::test]
    async fn test_empty_cookie_is_no_session() {
        let store =
            CookieSessionStore::new(jar_with("session_token="), policy(Environment::Development));
        assert!(store.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_created_cookie_attributes() {
        let store = CookieSessionStore::new(CookieJar::new(), policy(Environment::Production));
        store.create_session("tok").await.unwrap();
        assert_eq!(store.get_session().await.unwrap(), Some(Session::new("tok")));

        let headers = set_cookie_headers(store.into_jar());
        assert_eq!(headers.len(), 1);
        let header = &headers[0];
        assert!(header.starts_with("session_token=tok"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=604800"));
        assert!(header.contains("Secure"));
        assert!(!header.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_development_cookie_is_not_secure() {
        let store = CookieSessionStore::new(CookieJar::new(), policy(Environment::Development));
        store.create_session("tok").await.unwrap();
        let headers = set_cookie_headers(store.into_jar());
        assert!(!headers[0].contains("Secure"));
    }

    #[tokio::test]
    async fn test_delete_expires_cookie_and_is_idempotent() {
        let store =
            CookieSessionStore::new(jar_with("session_token=abc"), policy(Environment::Development));
        store.delete_session().await.unwrap();
        store.delete_session().await.unwrap();
        assert!(store.get_session().await.unwrap().is_none());

        let headers = set_cookie_headers(store.into_jar());
        assert!(headers.iter().any(|h| h.starts_with("session_token=") && h.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn test_create_is_idempotent_for_same_token() {
        let store = CookieSessionStore::new(CookieJar::new(), policy(Environment::Development));
        store.create_session("same").await.unwrap();
        store.create_session("same").await.unwrap();
        assert_eq!(store.get_session().await.unwrap(), Some(Session::new("same")));
        assert_eq!(set_cookie_headers(store.into_jar()).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_token_is_stored_but_reads_as_no_session() {
        let store = CookieSessionStore::new(CookieJar::new(), policy(Environment::Development));
        store.create_session("").await.unwrap();
        assert!(store.get_session().await.unwrap().is_none());
        assert!(!store.has_session());

        let headers = set_cookie_headers(store.into_jar());
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("session_token=;"));
    }
}
