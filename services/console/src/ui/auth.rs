//! services/console/src/ui/auth.rs
//!
//! Login and signup controllers. Both redirect away at mount time when a
//! session already exists. The targets differ (login lands on the gallery,
//! signup on the landing screen); that asymmetry is kept on purpose, see
//! DESIGN.md.

use std::sync::Arc;

use chaptgen_core::ports::BackendService;

use crate::ui::{Route, SessionAccessor};

/// Where a successful (or already-authenticated) login goes.
const LOGIN_REDIRECT: Route = Route::Gallery;
/// Where a successful (or already-authenticated) signup goes.
const SIGNUP_REDIRECT: Route = Route::Landing;

const MIN_PASSWORD_LEN: usize = 6;

pub struct LoginController {
    backend: Arc<dyn BackendService>,
    session: SessionAccessor,
    error: Option<String>,
}

impl LoginController {
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        let session = SessionAccessor::new(backend.clone());
        Self {
            backend,
            session,
            error: None,
        }
    }

    /// Mount-time check: an authenticated visitor never sees the form.
    pub async fn mount(&self) -> Option<Route> {
        if self.session.current().await.authenticated {
            Some(LOGIN_REDIRECT)
        } else {
            None
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits credentials. Validation mirrors the form constraints: both
    /// fields required. Returns the redirect target on success.
    pub async fn submit(&mut self, email: &str, password: &str) -> Option<Route> {
        self.error = None;
        if email.trim().is_empty() || password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return None;
        }
        match self.backend.log_in(email, password).await {
            Ok(_session) => Some(LOGIN_REDIRECT),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

pub struct SignupController {
    backend: Arc<dyn BackendService>,
    session: SessionAccessor,
    error: Option<String>,
}

impl SignupController {
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        let session = SessionAccessor::new(backend.clone());
        Self {
            backend,
            session,
            error: None,
        }
    }

    pub async fn mount(&self) -> Option<Route> {
        if self.session.current().await.authenticated {
            Some(SIGNUP_REDIRECT)
        } else {
            None
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits a new account. Signup additionally enforces the minimum
    /// password length the form does.
    pub async fn submit(&mut self, email: &str, password: &str) -> Option<Route> {
        self.error = None;
        if email.trim().is_empty() || password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return None;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            self.error = Some("Password must be at least 6 characters.".to_string());
            return None;
        }
        match self.backend.sign_up(email, password).await {
            Ok(_session) => Some(SIGNUP_REDIRECT),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
