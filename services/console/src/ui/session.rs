//! services/console/src/ui/session.rs
//!
//! Wraps the "who am I" and "log out" calls. Holds no state of its own;
//! every screen re-asks on mount.

use std::sync::Arc;

use chaptgen_core::{
    domain::Session,
    ports::{BackendService, PortResult},
};
use tracing::debug;

#[derive(Clone)]
pub struct SessionAccessor {
    backend: Arc<dyn BackendService>,
}

impl SessionAccessor {
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        Self { backend }
    }

    /// Asks the backend who we are. Failures of any kind silently degrade
    /// to a signed-out session; they are never surfaced to the user.
    pub async fn current(&self) -> Session {
        match self.backend.who_am_i().await {
            Ok(session) => session,
            Err(e) => {
                debug!("session check failed, treating as signed out: {}", e);
                Session::signed_out()
            }
        }
    }

    /// Clears the credential server-side. The caller is responsible for
    /// clearing its own local state afterwards.
    pub async fn log_out(&self) -> PortResult<()> {
        self.backend.log_out().await
    }
}
