pub mod domain;
pub mod ports;

pub use domain::{
    derive_chapters_text, display_title, filter_by_title, player_embed_url, Chapter,
    ChapterPreview, Generation, GenerationSummary, SaveReceipt, Session,
};
pub use ports::{BackendService, PortError, PortResult};
