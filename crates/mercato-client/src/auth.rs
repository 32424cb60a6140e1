//! Session token handling passed explicitly into every request.
//!
//! A front end builds one [`AuthContext`] per session and hands a reference
//! to each [`crate::MercatoClient`] call. The client reads the bearer token
//! from it and clears it when the backend answers 401.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ClientError;

/// Storage for the session's bearer token.
///
/// [`MemoryTokenStore`] is enough for the CLI; a browser or POS terminal can
/// back this with whatever local storage it has.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: String);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Authentication context supplied to each request.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn TokenStore>,
    login_route: String,
}

impl AuthContext {
    pub fn new(store: Arc<dyn TokenStore>, login_route: impl Into<String>) -> Self {
        Self {
            store,
            login_route: login_route.into(),
        }
    }

    /// A context with no token that redirects to `/login` on 401.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()), "/login")
    }

    /// A context seeded with `token` (if any), backed by memory.
    pub fn with_token(token: Option<String>, login_route: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryTokenStore::new(token)), login_route)
    }

    /// Token to send as `Authorization: Bearer ...`; blank tokens count as absent.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.store.token().filter(|t| !t.trim().is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    pub fn sign_in(&self, token: String) {
        self.store.set_token(token);
    }

    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Drops the stored token after a 401 and returns the error carrying the
    /// login route the caller must redirect to.
    pub(crate) fn expire(&self) -> ClientError {
        self.store.clear();
        tracing::info!(
            login_route = %self.login_route,
            "backend rejected session token; cleared stored token"
        );
        ClientError::Unauthorized {
            login_route: self.login_route.clone(),
        }
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.bearer_token().map(|_| "[redacted]"))
            .field("login_route", &self.login_route)
            .finish()
    }
}
