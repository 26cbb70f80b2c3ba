//! services/console/src/adapters/http.rs
//!
//! This module contains the adapter for the ChaptGen backend HTTP API.
//! It implements the `BackendService` port from the `core` crate over a
//! `reqwest` client whose cookie store carries the session credential; no
//! token is ever constructed or read here.

use chaptgen_core::{
    derive_chapters_text,
    domain::{Chapter, ChapterPreview, Generation, GenerationSummary, SaveReceipt, Session},
    ports::{BackendService, PortError, PortResult},
};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

//=========================================================================================
// Wire Types (private to this adapter)
//=========================================================================================

#[derive(Debug, Deserialize)]
struct AuthReply {
    #[serde(default)]
    ok: bool,
    id: Option<i64>,
    email: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChapter {
    #[serde(default)]
    start: String,
    #[serde(default)]
    title: String,
}

impl From<WireChapter> for Chapter {
    fn from(c: WireChapter) -> Self {
        Chapter {
            start: c.start,
            title: c.title,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreviewReply {
    #[serde(default)]
    ok: bool,
    url: Option<String>,
    title: Option<String>,
    #[serde(default)]
    chapters: Vec<WireChapter>,
    chapters_text: Option<String>,
    note: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveReply {
    // Absent counts as success; only an explicit false is a rejection.
    ok: Option<bool>,
    id: Option<i64>,
    status: Option<String>,
    error: Option<String>,
}

/// The backend serializes SQL timestamps as either ISO text or epoch millis
/// depending on its JSON configuration.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Stamp {
    Text(String),
    Millis(i64),
}

impl Stamp {
    fn into_string(self) -> String {
        match self {
            Stamp::Text(s) => s,
            Stamp::Millis(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryRow {
    id: i64,
    url: String,
    title: Option<String>,
    #[serde(default)]
    status: String,
    created_at: Stamp,
    updated_at: Stamp,
}

impl From<SummaryRow> for GenerationSummary {
    fn from(row: SummaryRow) -> Self {
        GenerationSummary {
            id: row.id,
            url: row.url,
            title: row.title,
            status: row.status,
            created_at: row.created_at.into_string(),
            updated_at: row.updated_at.into_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerationRow {
    id: i64,
    url: String,
    title: Option<String>,
    #[serde(default)]
    status: String,
    created_at: Stamp,
    updated_at: Stamp,
    chapters_json: Option<Vec<WireChapter>>,
    chapters_text: Option<String>,
    transcript: Option<String>,
    model: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateReply {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    updated: bool,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `BackendService` against the ChaptGen HTTP
/// API. One request/response round trip per call: no retries, timeouts, or
/// backoff.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: String,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` for the given base address. The cookie
    /// store is enabled so the backend's session cookie rides along on
    /// every subsequent request.
    pub fn new(base: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Issues one request and decodes the JSON body. Non-success statuses
    /// become `PortError::Status` with whatever detail the body offers.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> PortResult<T> {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(body) = &body {
            req = req.json(body);
        }
        let res = req
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = res.status();
        debug!(%method, path, status = status.as_u16(), "backend request");

        if !status.is_success() {
            let body_text = res.text().await.unwrap_or_default();
            return Err(status_error(status, &body_text));
        }
        res.json::<T>()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))
    }
}

/// Extracts a human-readable detail from a non-success response body: the
/// `error` or `message` JSON field verbatim, else the whole JSON value,
/// else the raw body text.
fn status_error(status: StatusCode, body: &str) -> PortError {
    let detail = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(|v| v.as_str().map(str::to_owned))
            .or_else(|| value.get("message").and_then(|v| v.as_str().map(str::to_owned)))
            .or_else(|| Some(value.to_string())),
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    };
    PortError::from_status(
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        detail.as_deref(),
    )
}

//=========================================================================================
// `BackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendService for HttpBackend {
    async fn who_am_i(&self) -> PortResult<Session> {
        let reply: AuthReply = self.request(Method::GET, "/auth/me", None).await?;
        if reply.ok {
            Ok(Session::signed_in(reply.id, reply.email))
        } else {
            Ok(Session::signed_out())
        }
    }

    async fn log_in(&self, email: &str, password: &str) -> PortResult<Session> {
        let reply: AuthReply = self
            .request(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        if !reply.ok {
            return Err(PortError::Backend(
                reply.error.unwrap_or_else(|| "Login failed.".to_string()),
            ));
        }
        Ok(Session::signed_in(reply.id, reply.email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> PortResult<Session> {
        let reply: AuthReply = self
            .request(
                Method::POST,
                "/auth/signup",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        if !reply.ok {
            return Err(PortError::Backend(
                reply.error.unwrap_or_else(|| "Signup failed.".to_string()),
            ));
        }
        Ok(Session::signed_in(reply.id, reply.email))
    }

    async fn log_out(&self) -> PortResult<()> {
        let reply: AuthReply = self.request(Method::POST, "/auth/logout", None).await?;
        if !reply.ok {
            return Err(PortError::Backend(
                reply.error.unwrap_or_else(|| "Logout failed.".to_string()),
            ));
        }
        Ok(())
    }

    async fn preview_chapters(&self, url: &str) -> PortResult<ChapterPreview> {
        let reply: PreviewReply = self
            .request(
                Method::POST,
                "/transcripts/preview",
                Some(json!({ "url": url })),
            )
            .await?;
        if !reply.ok {
            return Err(PortError::Backend(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to generate chapters.".to_string()),
            ));
        }
        let chapters: Vec<Chapter> = reply.chapters.into_iter().map(Chapter::from).collect();
        let chapters_text = derive_chapters_text(Some(&chapters), reply.chapters_text.as_deref());
        Ok(ChapterPreview {
            url: reply.url.unwrap_or_else(|| url.to_string()),
            title: reply.title,
            chapters,
            chapters_text,
            note: reply.note,
        })
    }

    async fn save_generation(&self, url: &str, chapters: &[Chapter]) -> PortResult<SaveReceipt> {
        let chapters_json: Vec<serde_json::Value> = chapters
            .iter()
            .map(|c| json!({ "start": c.start, "title": c.title }))
            .collect();
        let reply: SaveReply = self
            .request(
                Method::POST,
                "/transcripts",
                Some(json!({ "url": url, "chaptersJson": chapters_json })),
            )
            .await?;
        if reply.ok == Some(false) {
            return Err(PortError::Backend(
                reply.error.unwrap_or_else(|| "Save failed.".to_string()),
            ));
        }
        Ok(SaveReceipt {
            id: reply.id,
            status: reply.status,
        })
    }

    async fn list_mine(&self) -> PortResult<Vec<GenerationSummary>> {
        let rows: Vec<SummaryRow> = self.request(Method::GET, "/transcripts/mine", None).await?;
        Ok(rows.into_iter().map(GenerationSummary::from).collect())
    }

    async fn get_generation(&self, id: i64) -> PortResult<Generation> {
        let row: GenerationRow = self
            .request(Method::GET, &format!("/transcripts/{}", id), None)
            .await?;
        Ok(Generation {
            id: row.id,
            url: row.url,
            title: row.title,
            status: row.status,
            created_at: row.created_at.into_string(),
            updated_at: row.updated_at.into_string(),
            chapters: row
                .chapters_json
                .map(|list| list.into_iter().map(Chapter::from).collect()),
            chapters_text: row.chapters_text,
            transcript: row.transcript,
            model: row.model,
            error: row.error,
        })
    }

    async fn update_generation(
        &self,
        id: i64,
        chapters_text: Option<&str>,
        title: Option<&str>,
    ) -> PortResult<bool> {
        let mut body = serde_json::Map::new();
        if let Some(text) = chapters_text {
            body.insert("chaptersText".to_string(), json!(text));
        }
        if let Some(title) = title {
            body.insert("title".to_string(), json!(title));
        }
        let reply: UpdateReply = self
            .request(
                Method::PUT,
                &format!("/transcripts/{}", id),
                Some(serde_json::Value::Object(body)),
            )
            .await?;
        if !reply.ok {
            return Err(PortError::Backend("Save failed.".to_string()));
        }
        Ok(reply.updated)
    }

    async fn delete_generation(&self, id: i64) -> PortResult<()> {
        // The body (`{deleted, id}`) carries nothing the screens use.
        let _: serde_json::Value = self
            .request(Method::DELETE, &format!("/transcripts/{}", id), None)
            .await?;
        Ok(())
    }
}
