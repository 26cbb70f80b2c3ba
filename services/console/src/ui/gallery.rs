//! services/console/src/ui/gallery.rs
//!
//! The gallery controller: the signed-in user's saved generations, with a
//! client-side title filter.

use std::sync::Arc;

use chaptgen_core::{
    domain::GenerationSummary,
    filter_by_title,
    ports::BackendService,
};

pub struct GalleryController {
    backend: Arc<dyn BackendService>,
    items: Vec<GenerationSummary>,
    error: Option<String>,
    query: String,
}

impl GalleryController {
    pub fn new(backend: Arc<dyn BackendService>) -> Self {
        Self {
            backend,
            items: Vec::new(),
            error: None,
            query: String::new(),
        }
    }

    /// Fetches the list on mount. Unauthenticated access is not blocked
    /// here; the request simply fails and the error shows inline.
    pub async fn load(&mut self) {
        self.error = None;
        match self.backend.list_mine().await {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn items(&self) -> &[GenerationSummary] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The rows the current query leaves visible, in backend order.
    pub fn filtered(&self) -> Vec<&GenerationSummary> {
        filter_by_title(&self.items, &self.query)
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.error = None;
        self.query.clear();
    }
}
