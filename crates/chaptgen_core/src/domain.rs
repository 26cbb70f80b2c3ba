//! crates/chaptgen_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format;
//! the wire representation lives in the HTTP adapter.

/// Who the backend says we are. Re-derived on every screen mount, never
/// cached across navigations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user_id: Option<i64>,
    pub email: Option<String>,
}

impl Session {
    pub fn signed_in(user_id: Option<i64>, email: Option<String>) -> Self {
        Self {
            authenticated: true,
            user_id,
            email,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            email: None,
        }
    }
}

/// One segment of a video: free-form timestamp text plus a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub start: String,
    pub title: String,
}

/// An unsaved chapter-generation result, shown before the user opts to
/// persist it. `chapters_text` is the flattened editable form, derived once
/// when the preview arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPreview {
    pub url: String,
    pub title: Option<String>,
    pub chapters: Vec<Chapter>,
    pub chapters_text: String,
    pub note: Option<String>,
}

/// A gallery row. Timestamps stay as the backend's strings; the client only
/// displays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl GenerationSummary {
    pub fn display_title(&self) -> String {
        display_title(self.title.as_deref(), self.id)
    }
}

/// The full record of one saved generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub chapters: Option<Vec<Chapter>>,
    pub chapters_text: Option<String>,
    pub transcript: Option<String>,
    pub model: Option<String>,
    pub error: Option<String>,
}

impl Generation {
    pub fn display_title(&self) -> String {
        display_title(self.title.as_deref(), self.id)
    }

    /// The single editable buffer for this record, derived once at load time.
    pub fn editable_text(&self) -> String {
        derive_chapters_text(self.chapters.as_deref(), self.chapters_text.as_deref())
    }
}

/// What the backend acknowledges after a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub id: Option<i64>,
    pub status: Option<String>,
}

/// Flattens chapters into the editable text form. A non-blank
/// backend-provided text wins; otherwise structured chapters join as
/// `"<start> <title>"` lines; otherwise the buffer is empty.
pub fn derive_chapters_text(chapters: Option<&[Chapter]>, provided: Option<&str>) -> String {
    if let Some(text) = provided {
        if !text.trim().is_empty() {
            return text.to_string();
        }
    }
    match chapters {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(|c| format!("{} {}", c.start, c.title))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Untitled records fall back to a synthesized label.
pub fn display_title(title: Option<&str>, id: i64) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => format!("Generation #{}", id),
    }
}

/// Case-insensitive substring filter on raw titles. A blank query returns
/// every item unchanged in order; untitled rows never match a non-blank
/// query.
pub fn filter_by_title<'a>(
    items: &'a [GenerationSummary],
    query: &str,
) -> Vec<&'a GenerationSummary> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|g| {
            g.title
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Rewrites a watch URL on a known video host into its embedded-player
/// form. Other URLs get `None` and render as plain outbound links.
pub fn player_embed_url(url: &str) -> Option<String> {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        Some(url.replacen("watch?v=", "embed/", 1))
    } else {
        None
    }
}
