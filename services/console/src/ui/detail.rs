//! services/console/src/ui/detail.rs
//!
//! The detail controller for one saved generation: load, edit the flattened
//! chapter text, save it back, rename, delete.

use std::sync::Arc;

use chaptgen_core::{
    domain::Generation,
    player_embed_url,
    ports::BackendService,
};

pub struct DetailController {
    backend: Arc<dyn BackendService>,
    id: i64,
    record: Option<Generation>,
    text: String,
    error: Option<String>,
    saved_message: Option<String>,
    last_update_applied: bool,
}

impl DetailController {
    pub fn new(backend: Arc<dyn BackendService>, id: i64) -> Self {
        Self {
            backend,
            id,
            record: None,
            text: String::new(),
            error: None,
            saved_message: None,
            last_update_applied: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Fetches the record and derives the editable buffer once. Later edits
    /// live only in `text` until the next reload.
    pub async fn load(&mut self) {
        self.error = None;
        self.saved_message = None;
        match self.backend.get_generation(self.id).await {
            Ok(record) => {
                self.text = record.editable_text();
                self.record = Some(record);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn record(&self) -> Option<&Generation> {
        self.record.as_ref()
    }

    pub fn heading(&self) -> String {
        match &self.record {
            Some(record) => record.display_title(),
            None => format!("Generation #{}", self.id),
        }
    }

    /// The embedded-player URL when the source is on a known video host.
    pub fn player_url(&self) -> Option<String> {
        self.record.as_ref().and_then(|r| player_embed_url(&r.url))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn saved_message(&self) -> Option<&str> {
        self.saved_message.as_deref()
    }

    /// Whether the backend reported the last save as actually applied.
    pub fn last_update_applied(&self) -> bool {
        self.last_update_applied
    }

    /// Sends the edited buffer back, empty or not; the backend decides what
    /// that means. Last write wins.
    pub async fn save(&mut self) {
        self.error = None;
        self.saved_message = None;
        let text = self.text.clone();
        match self
            .backend
            .update_generation(self.id, Some(&text), None)
            .await
        {
            Ok(updated) => {
                self.last_update_applied = updated;
                self.saved_message = Some("Saved!".to_string());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Renames the record without touching its chapters.
    pub async fn rename(&mut self, title: &str) {
        self.error = None;
        self.saved_message = None;
        match self
            .backend
            .update_generation(self.id, None, Some(title))
            .await
        {
            Ok(updated) => {
                self.last_update_applied = updated;
                if updated {
                    if let Some(record) = &mut self.record {
                        record.title = Some(title.to_string());
                    }
                }
                self.saved_message = Some("Saved!".to_string());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Deletes the record. Without confirmation nothing is sent and nothing
    /// changes. Returns true when the caller should navigate back to the
    /// gallery.
    pub async fn delete(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.error = None;
        match self.backend.delete_generation(self.id).await {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}
