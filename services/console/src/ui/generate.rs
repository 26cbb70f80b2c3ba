//! services/console/src/ui/generate.rs
//!
//! The landing-screen controller: paste a URL, request a preview, save it.

use std::sync::Arc;

use chaptgen_core::{
    domain::ChapterPreview,
    ports::BackendService,
};

/// Where the screen currently is in the generate → preview → save flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratePhase {
    Idle,
    Generating,
    Previewed,
    Saving,
    Saved,
}

pub struct GenerateController {
    backend: Arc<dyn BackendService>,
    phase: GeneratePhase,
    url: String,
    preview: Option<ChapterPreview>,
    error: Option<String>,
}

impl GenerateController {
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        Self {
            backend,
            phase: GeneratePhase::Idle,
            url: String::new(),
            preview: None,
            error: None,
        }
    }

    pub fn phase(&self) -> GeneratePhase {
        self.phase
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn preview(&self) -> Option<&ChapterPreview> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Requests a preview for `url`. Blank input never leaves the screen.
    /// A successful response with zero chapters still counts as a preview,
    /// with an inline message on top of it.
    pub async fn generate(&mut self, url: &str) {
        self.phase = GeneratePhase::Idle;
        self.preview = None;
        self.error = None;

        if url.trim().is_empty() {
            self.error = Some("Please paste a YouTube URL.".to_string());
            return;
        }
        self.url = url.to_string();

        self.phase = GeneratePhase::Generating;
        match self.backend.preview_chapters(&self.url).await {
            Ok(preview) => {
                if preview.chapters.is_empty() {
                    self.error = Some("No chapters were generated for this video.".to_string());
                }
                self.preview = Some(preview);
                self.phase = GeneratePhase::Previewed;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = GeneratePhase::Idle;
            }
        }
    }

    /// True once a preview with at least one chapter exists.
    pub fn can_save(&self) -> bool {
        self.preview
            .as_ref()
            .map(|p| !p.chapters.is_empty())
            .unwrap_or(false)
    }

    /// Persists the current preview. A no-op unless `can_save`. Success
    /// does not navigate anywhere; the preview stays on screen.
    pub async fn save(&mut self) {
        let (url, chapters) = match &self.preview {
            Some(p) if !p.chapters.is_empty() => (self.url.clone(), p.chapters.clone()),
            _ => return,
        };
        self.error = None;

        self.phase = GeneratePhase::Saving;
        match self.backend.save_generation(&url, &chapters).await {
            Ok(_receipt) => self.phase = GeneratePhase::Saved,
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = GeneratePhase::Previewed;
            }
        }
    }

    /// Back to a blank screen, e.g. after logout.
    pub fn reset(&mut self) {
        self.phase = GeneratePhase::Idle;
        self.url.clear();
        self.preview = None;
        self.error = None;
    }
}
