//! services/console/tests/controller_flows.rs
//!
//! Drives every screen controller against a scripted mock backend and
//! checks the session/data-sync contract: what gets requested, what never
//! does, and which strings surface.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chaptgen_core::{
    domain::{Chapter, ChapterPreview, Generation, GenerationSummary, SaveReceipt, Session},
    ports::{BackendService, PortError, PortResult},
};
use console_lib::ui::{
    DetailController, GalleryController, GenerateController, GeneratePhase, LoginController,
    Route, SessionAccessor, SignupController,
};

//=========================================================================================
// Scripted Mock Backend
//=========================================================================================

/// Each field holds the response for the next call of that operation; a
/// call with nothing scripted fails like a dead network. Every call is
/// recorded so tests can assert on what was (not) issued.
#[derive(Default)]
struct MockBackend {
    calls: Mutex<Vec<String>>,
    me: Mutex<Option<PortResult<Session>>>,
    login: Mutex<Option<PortResult<Session>>>,
    signup: Mutex<Option<PortResult<Session>>>,
    preview: Mutex<Option<PortResult<ChapterPreview>>>,
    save: Mutex<Option<PortResult<SaveReceipt>>>,
    list: Mutex<Option<PortResult<Vec<GenerationSummary>>>>,
    get: Mutex<Option<PortResult<Generation>>>,
    update: Mutex<Option<PortResult<bool>>>,
    delete: Mutex<Option<PortResult<()>>>,
}

impl MockBackend {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take<T>(slot: &Mutex<Option<PortResult<T>>>) -> PortResult<T> {
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(PortError::Transport("unscripted call".to_string())))
    }
}

#[async_trait]
impl BackendService for MockBackend {
    async fn who_am_i(&self) -> PortResult<Session> {
        self.record("who_am_i");
        Self::take(&self.me)
    }

    async fn log_in(&self, email: &str, _password: &str) -> PortResult<Session> {
        self.record(format!("log_in {}", email));
        Self::take(&self.login)
    }

    async fn sign_up(&self, email: &str, _password: &str) -> PortResult<Session> {
        self.record(format!("sign_up {}", email));
        Self::take(&self.signup)
    }

    async fn log_out(&self) -> PortResult<()> {
        self.record("log_out");
        Ok(())
    }

    async fn preview_chapters(&self, url: &str) -> PortResult<ChapterPreview> {
        self.record(format!("preview_chapters {}", url));
        Self::take(&self.preview)
    }

    async fn save_generation(&self, url: &str, chapters: &[Chapter]) -> PortResult<SaveReceipt> {
        self.record(format!("save_generation {} ({} chapters)", url, chapters.len()));
        Self::take(&self.save)
    }

    async fn list_mine(&self) -> PortResult<Vec<GenerationSummary>> {
        self.record("list_mine");
        Self::take(&self.list)
    }

    async fn get_generation(&self, id: i64) -> PortResult<Generation> {
        self.record(format!("get_generation {}", id));
        Self::take(&self.get)
    }

    async fn update_generation(
        &self,
        id: i64,
        chapters_text: Option<&str>,
        title: Option<&str>,
    ) -> PortResult<bool> {
        self.record(format!(
            "update_generation {} text={:?} title={:?}",
            id, chapters_text, title
        ));
        Self::take(&self.update)
    }

    async fn delete_generation(&self, id: i64) -> PortResult<()> {
        self.record(format!("delete_generation {}", id));
        Self::take(&self.delete)
    }
}

//=========================================================================================
// Fixtures
//=========================================================================================

fn signed_in() -> Session {
    Session::signed_in(Some(42), Some("someone@example.com".to_string()))
}

fn preview_with(chapters: Vec<Chapter>) -> ChapterPreview {
    let chapters_text = chapters
        .iter()
        .map(|c| format!("{} {}", c.start, c.title))
        .collect::<Vec<_>>()
        .join("\n");
    ChapterPreview {
        url: "https://www.youtube.com/watch?v=abc".to_string(),
        title: Some("A talk".to_string()),
        chapters,
        chapters_text,
        note: None,
    }
}

fn record_without_chapters(id: i64) -> Generation {
    Generation {
        id,
        url: "https://www.youtube.com/watch?v=abc".to_string(),
        title: None,
        status: "completed".to_string(),
        created_at: "2026-01-10T12:00:00Z".to_string(),
        updated_at: "2026-01-10T12:00:00Z".to_string(),
        chapters: None,
        chapters_text: None,
        transcript: None,
        model: None,
        error: None,
    }
}

//=========================================================================================
// Generate Flow
//=========================================================================================

#[tokio::test]
async fn blank_input_issues_no_request() {
    let mock = Arc::new(MockBackend::default());
    let mut controller = GenerateController::new(mock.clone());

    controller.generate("   ").await;

    assert_eq!(controller.error(), Some("Please paste a YouTube URL."));
    assert_eq!(controller.phase(), GeneratePhase::Idle);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn empty_preview_still_shows_while_surfacing_the_note() {
    let mock = Arc::new(MockBackend::default());
    mock.preview
        .lock()
        .unwrap()
        .replace(Ok(preview_with(vec![])));
    let mut controller = GenerateController::new(mock.clone());

    controller.generate("https://www.youtube.com/watch?v=abc").await;

    assert_eq!(controller.phase(), GeneratePhase::Previewed);
    assert_eq!(
        controller.error(),
        Some("No chapters were generated for this video.")
    );
    let preview = controller.preview().expect("preview should be kept");
    assert!(preview.chapters.is_empty());
    assert!(!controller.can_save());
}

#[tokio::test]
async fn preview_rejection_surfaces_backend_text_verbatim() {
    let mock = Arc::new(MockBackend::default());
    mock.preview
        .lock()
        .unwrap()
        .replace(Err(PortError::Backend(
            "No transcript available for this video.".to_string(),
        )));
    let mut controller = GenerateController::new(mock.clone());

    controller.generate("https://www.youtube.com/watch?v=abc").await;

    assert_eq!(
        controller.error(),
        Some("No transcript available for this video.")
    );
    assert_eq!(controller.phase(), GeneratePhase::Idle);
    assert!(controller.preview().is_none());
}

#[tokio::test]
async fn save_without_chapters_is_a_no_op() {
    let mock = Arc::new(MockBackend::default());
    mock.preview
        .lock()
        .unwrap()
        .replace(Ok(preview_with(vec![])));
    let mut controller = GenerateController::new(mock.clone());

    controller.generate("https://www.youtube.com/watch?v=abc").await;
    controller.save().await;

    // The preview request went out; the save never did.
    assert_eq!(mock.calls().len(), 1);
    assert!(mock.calls()[0].starts_with("preview_chapters"));
}

#[tokio::test]
async fn save_conflict_surfaces_and_is_retryable() {
    let mock = Arc::new(MockBackend::default());
    mock.preview.lock().unwrap().replace(Ok(preview_with(vec![
        Chapter {
            start: "00:00".to_string(),
            title: "Intro".to_string(),
        },
    ])));
    let mut controller = GenerateController::new(mock.clone());
    controller.generate("https://www.youtube.com/watch?v=abc").await;

    mock.save.lock().unwrap().replace(Err(PortError::Backend(
        "Generation for this video already exists.".to_string(),
    )));
    controller.save().await;
    assert_eq!(
        controller.error(),
        Some("Generation for this video already exists.")
    );
    assert_eq!(controller.phase(), GeneratePhase::Previewed);

    // Retrying the same action is allowed and can succeed.
    mock.save.lock().unwrap().replace(Ok(SaveReceipt {
        id: Some(7),
        status: Some("completed".to_string()),
    }));
    controller.save().await;
    assert_eq!(controller.phase(), GeneratePhase::Saved);
    assert_eq!(controller.error(), None);
}

//=========================================================================================
// Gallery Flow
//=========================================================================================

#[tokio::test]
async fn gallery_load_failure_surfaces_the_status_line() {
    let mock = Arc::new(MockBackend::default());
    mock.list
        .lock()
        .unwrap()
        .replace(Err(PortError::from_status(
            401,
            "Unauthorized",
            Some("Login required"),
        )));
    let mut controller = GalleryController::new(mock.clone());

    controller.load().await;

    assert_eq!(controller.error(), Some("401 Unauthorized Login required"));
    assert!(controller.items().is_empty());
}

//=========================================================================================
// Detail Flow
//=========================================================================================

#[tokio::test]
async fn detail_save_with_empty_buffer_still_requests_and_reflects_updated() {
    let mock = Arc::new(MockBackend::default());
    mock.get
        .lock()
        .unwrap()
        .replace(Ok(record_without_chapters(7)));
    let mut controller = DetailController::new(mock.clone(), 7);
    controller.load().await;
    assert_eq!(controller.text(), "");

    mock.update.lock().unwrap().replace(Ok(false));
    controller.save().await;

    let calls = mock.calls();
    assert_eq!(
        calls.last().map(String::as_str),
        Some(r#"update_generation 7 text=Some("") title=None"#)
    );
    assert!(!controller.last_update_applied());
    assert_eq!(controller.saved_message(), Some("Saved!"));

    mock.update.lock().unwrap().replace(Ok(true));
    controller.save().await;
    assert!(controller.last_update_applied());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mock = Arc::new(MockBackend::default());
    mock.get
        .lock()
        .unwrap()
        .replace(Ok(record_without_chapters(7)));
    let mut controller = DetailController::new(mock.clone(), 7);
    controller.load().await;

    let navigated = controller.delete(false).await;

    assert!(!navigated);
    assert!(controller.record().is_some());
    assert!(controller.error().is_none());
    assert!(mock
        .calls()
        .iter()
        .all(|c| !c.starts_with("delete_generation")));

    mock.delete.lock().unwrap().replace(Ok(()));
    assert!(controller.delete(true).await);
}

#[tokio::test]
async fn delete_failure_keeps_the_record_in_place() {
    let mock = Arc::new(MockBackend::default());
    mock.get
        .lock()
        .unwrap()
        .replace(Ok(record_without_chapters(7)));
    mock.delete
        .lock()
        .unwrap()
        .replace(Err(PortError::from_status(404, "Not Found", Some("Not found"))));
    let mut controller = DetailController::new(mock.clone(), 7);
    controller.load().await;

    let navigated = controller.delete(true).await;

    assert!(!navigated);
    assert_eq!(controller.error(), Some("404 Not Found Not found"));
    assert!(controller.record().is_some());
}

//=========================================================================================
// Auth Flow
//=========================================================================================

#[tokio::test]
async fn login_redirects_to_gallery_when_already_authenticated() {
    let mock = Arc::new(MockBackend::default());
    mock.me.lock().unwrap().replace(Ok(signed_in()));
    let controller = LoginController::new(mock.clone());

    assert_eq!(controller.mount().await, Some(Route::Gallery));
}

#[tokio::test]
async fn signup_redirects_to_landing_when_already_authenticated() {
    let mock = Arc::new(MockBackend::default());
    mock.me.lock().unwrap().replace(Ok(signed_in()));
    let controller = SignupController::new(mock.clone());

    assert_eq!(controller.mount().await, Some(Route::Landing));
}

#[tokio::test]
async fn successful_login_and_signup_redirect_asymmetrically() {
    let mock = Arc::new(MockBackend::default());
    mock.login.lock().unwrap().replace(Ok(signed_in()));
    let mut login = LoginController::new(mock.clone());
    assert_eq!(
        login.submit("someone@example.com", "hunter2").await,
        Some(Route::Gallery)
    );

    mock.signup.lock().unwrap().replace(Ok(signed_in()));
    let mut signup = SignupController::new(mock.clone());
    assert_eq!(
        signup.submit("someone@example.com", "hunter22").await,
        Some(Route::Landing)
    );
}

#[tokio::test]
async fn login_submit_surfaces_backend_rejection_verbatim() {
    let mock = Arc::new(MockBackend::default());
    mock.login
        .lock()
        .unwrap()
        .replace(Err(PortError::Backend("Invalid credentials.".to_string())));
    let mut controller = LoginController::new(mock.clone());

    let target = controller.submit("someone@example.com", "hunter2").await;

    assert_eq!(target, None);
    assert_eq!(controller.error(), Some("Invalid credentials."));
}

#[tokio::test]
async fn signup_enforces_minimum_password_length_without_a_request() {
    let mock = Arc::new(MockBackend::default());
    let mut controller = SignupController::new(mock.clone());

    let target = controller.submit("someone@example.com", "12345").await;

    assert_eq!(target, None);
    assert_eq!(
        controller.error(),
        Some("Password must be at least 6 characters.")
    );
    assert!(mock.calls().iter().all(|c| !c.starts_with("sign_up")));
}

//=========================================================================================
// Session Accessor
//=========================================================================================

#[tokio::test]
async fn session_check_failures_silently_degrade_to_signed_out() {
    let mock = Arc::new(MockBackend::default());
    mock.me
        .lock()
        .unwrap()
        .replace(Err(PortError::from_status(500, "Internal Server Error", None)));
    let accessor = SessionAccessor::new(mock.clone());

    let session = accessor.current().await;

    assert!(!session.authenticated);
    assert_eq!(session.email, None);
}
