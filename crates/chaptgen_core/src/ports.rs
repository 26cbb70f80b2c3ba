//! crates/chaptgen_core/src/ports.rs
//!
//! Defines the service contract (trait) for the application's core logic.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! screens to be independent of the concrete HTTP transport.

use async_trait::async_trait;

use crate::domain::{Chapter, ChapterPreview, Generation, GenerationSummary, SaveReceipt, Session};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Every failure a port operation can surface, normalized to the three
/// classes the screens know how to display. None of them is fatal to a
/// screen; the user may retry the triggering action.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a non-success HTTP status. The message is
    /// already formatted as `"<status> <reason> <detail>"`.
    #[error("{0}")]
    Status(String),

    /// The request never completed, or a success body could not be decoded.
    #[error("request failed: {0}")]
    Transport(String),

    /// A success status whose body carried `ok: false`; the message is the
    /// backend's error text.
    #[error("{0}")]
    Backend(String),
}

impl PortError {
    /// Builds the display form of a non-success HTTP response: the numeric
    /// status and reason, followed by the backend's detail text when there
    /// is one.
    pub fn from_status(status: u16, reason: &str, detail: Option<&str>) -> Self {
        let mut message = format!("{} {}", status, reason);
        if let Some(detail) = detail {
            let detail = detail.trim();
            if !detail.is_empty() {
                message.push(' ');
                message.push_str(detail);
            }
        }
        PortError::Status(message)
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Port (Trait)
//=========================================================================================

/// The backend surface the screens consume. One method per HTTP operation;
/// implementations own the wire format and credential transport.
#[async_trait]
pub trait BackendService: Send + Sync {
    // --- Session ---

    /// GET /auth/me. An `ok: false` body is a signed-out session, not an
    /// error.
    async fn who_am_i(&self) -> PortResult<Session>;

    /// POST /auth/login.
    async fn log_in(&self, email: &str, password: &str) -> PortResult<Session>;

    /// POST /auth/signup.
    async fn sign_up(&self, email: &str, password: &str) -> PortResult<Session>;

    /// POST /auth/logout. Clears the credential server-side.
    async fn log_out(&self) -> PortResult<()>;

    // --- Generations ---

    /// POST /transcripts/preview. Nothing is persisted.
    async fn preview_chapters(&self, url: &str) -> PortResult<ChapterPreview>;

    /// POST /transcripts. Persists a previewed result for the signed-in
    /// user.
    async fn save_generation(&self, url: &str, chapters: &[Chapter]) -> PortResult<SaveReceipt>;

    /// GET /transcripts/mine.
    async fn list_mine(&self) -> PortResult<Vec<GenerationSummary>>;

    /// GET /transcripts/:id.
    async fn get_generation(&self, id: i64) -> PortResult<Generation>;

    /// PUT /transcripts/:id with whichever of the two fields is present.
    /// Returns the backend's `updated` flag.
    async fn update_generation(
        &self,
        id: i64,
        chapters_text: Option<&str>,
        title: Option<&str>,
    ) -> PortResult<bool>;

    /// DELETE /transcripts/:id.
    async fn delete_generation(&self, id: i64) -> PortResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_carry_status_and_detail_verbatim() {
        let err = PortError::from_status(403, "Forbidden", Some("Login required"));
        assert_eq!(err.to_string(), "403 Forbidden Login required");
    }

    #[test]
    fn status_errors_omit_blank_detail() {
        let err = PortError::from_status(502, "Bad Gateway", None);
        assert_eq!(err.to_string(), "502 Bad Gateway");

        let err = PortError::from_status(502, "Bad Gateway", Some("   "));
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[test]
    fn backend_errors_display_the_text_alone() {
        let err = PortError::Backend("Email already registered.".to_string());
        assert_eq!(err.to_string(), "Email already registered.");
    }
}
