//! services/console/src/bin/console.rs

use std::io::Write as _;
use std::sync::Arc;

use chaptgen_core::ports::BackendService;
use chrono::DateTime;
use console_lib::{
    config::Config,
    error::AppError,
    ui::{
        DetailController, GalleryController, GenerateController, GeneratePhase, LoginController,
        Route, SessionAccessor, SignupController,
    },
    HttpBackend,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Backend at {}", config.api_base);

    // --- 2. Initialize the Backend Adapter ---
    let backend: Arc<dyn BackendService> = Arc::new(HttpBackend::new(&config.api_base)?);
    let session = SessionAccessor::new(backend.clone());

    // --- 3. Run the Screen Loop ---
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut route = Route::Landing;
    loop {
        let next = match route {
            Route::Landing => landing_screen(&backend, &session, &mut input).await?,
            Route::Gallery => gallery_screen(&backend, &session, &mut input).await?,
            Route::Detail(id) => detail_screen(&backend, &session, &mut input, id).await?,
            Route::Login => login_screen(&backend, &mut input).await?,
            Route::Signup => signup_screen(&backend, &mut input).await?,
        };
        match next {
            Some(target) => route = target,
            None => break,
        }
    }

    println!("Bye.");
    Ok(())
}

//=========================================================================================
// Screens
//=========================================================================================

async fn landing_screen(
    backend: &Arc<dyn BackendService>,
    session: &SessionAccessor,
    input: &mut Input,
) -> Result<Option<Route>, AppError> {
    let me = session.current().await;
    println!();
    println!("=== ChaptGen ===");
    match me.email.as_deref() {
        Some(email) if me.authenticated => println!("Signed in as {}", email),
        _ if me.authenticated => println!("Signed in."),
        _ => println!("Optimize your video viewing experience with help of AI."),
    }
    println!("Commands: generate <url>, save, gallery, login, signup, logout, help, quit");

    let mut controller = GenerateController::new(backend.clone());
    loop {
        let Some(line) = read_line(input, "chaptgen> ").await? else {
            return Ok(None);
        };
        let (cmd, rest) = split_command(&line);
        match cmd {
            "" => {}
            "help" => {
                println!("  generate <url>  request a chapter preview for a video URL");
                println!("  save            persist the current preview to your gallery");
                println!("  gallery         open your saved generations");
                println!("  login / signup  account access");
                println!("  logout          sign out");
                println!("  quit            leave");
            }
            "generate" => {
                if !me.authenticated {
                    println!("Sign in to generate chapters.");
                    continue;
                }
                controller.generate(rest).await;
                render_preview(&controller);
            }
            "save" => {
                if !me.authenticated {
                    println!("Sign in to generate chapters.");
                    continue;
                }
                if !controller.can_save() {
                    println!("Nothing to save yet - generate a preview first.");
                    continue;
                }
                controller.save().await;
                if controller.phase() == GeneratePhase::Saved {
                    println!("Saved!");
                } else if let Some(err) = controller.error() {
                    println!("! {}", err);
                }
            }
            "gallery" => return Ok(Some(Route::Gallery)),
            "login" => return Ok(Some(Route::Login)),
            "signup" => return Ok(Some(Route::Signup)),
            "logout" => match session.log_out().await {
                Ok(()) => {
                    controller.reset();
                    return Ok(Some(Route::Landing));
                }
                Err(e) => debug!("logout failed: {}", e),
            },
            "quit" | "exit" => return Ok(None),
            other => println!("Unknown command '{}'. Try `help`.", other),
        }
    }
}

async fn gallery_screen(
    backend: &Arc<dyn BackendService>,
    session: &SessionAccessor,
    input: &mut Input,
) -> Result<Option<Route>, AppError> {
    let me = session.current().await;
    let mut controller = GalleryController::new(backend.clone());
    controller.load().await;

    println!();
    println!("=== Gallery ===");
    if let Some(email) = me.email.as_deref() {
        println!("Signed in as {}", email);
    }
    render_gallery(&controller);
    println!("Commands: open <id>, find <text>, list, new, logout, quit");

    loop {
        let Some(line) = read_line(input, "gallery> ").await? else {
            return Ok(None);
        };
        let (cmd, rest) = split_command(&line);
        match cmd {
            "" => {}
            "open" => match rest.parse::<i64>() {
                Ok(id) => return Ok(Some(Route::Detail(id))),
                Err(_) => println!("Usage: open <id>"),
            },
            "find" => {
                controller.set_query(rest);
                render_gallery(&controller);
            }
            "list" => {
                controller.set_query("");
                render_gallery(&controller);
            }
            "new" => return Ok(Some(Route::Landing)),
            "logout" => match session.log_out().await {
                Ok(()) => {
                    controller.reset();
                    return Ok(Some(Route::Landing));
                }
                Err(e) => debug!("logout failed: {}", e),
            },
            "quit" | "exit" => return Ok(None),
            other => println!("Unknown command '{}'.", other),
        }
    }
}

async fn detail_screen(
    backend: &Arc<dyn BackendService>,
    session: &SessionAccessor,
    input: &mut Input,
    id: i64,
) -> Result<Option<Route>, AppError> {
    let _me = session.current().await;
    let mut controller = DetailController::new(backend.clone(), id);
    controller.load().await;

    println!();
    render_detail(&controller);
    println!("Commands: edit, save, rename <title>, delete, show, back, quit");

    loop {
        let Some(line) = read_line(input, "detail> ").await? else {
            return Ok(None);
        };
        let (cmd, rest) = split_command(&line);
        match cmd {
            "" => {}
            "show" => render_detail(&controller),
            "edit" => {
                println!("Enter chapter lines; finish with a single '.' on its own line:");
                let mut buffer = Vec::new();
                loop {
                    let Some(text_line) = read_line(input, "").await? else {
                        break;
                    };
                    if text_line == "." {
                        break;
                    }
                    buffer.push(text_line);
                }
                controller.set_text(buffer.join("\n"));
                println!("Buffer updated ({} lines). `save` to persist.", buffer.len());
            }
            "save" => {
                controller.save().await;
                if let Some(err) = controller.error() {
                    println!("! {}", err);
                } else if let Some(msg) = controller.saved_message() {
                    if controller.last_update_applied() {
                        println!("{}", msg);
                    } else {
                        println!("{} (backend reported nothing changed)", msg);
                    }
                }
            }
            "rename" => {
                if rest.is_empty() {
                    println!("Usage: rename <title>");
                    continue;
                }
                controller.rename(rest).await;
                if let Some(err) = controller.error() {
                    println!("! {}", err);
                } else {
                    println!("Renamed to '{}'.", rest);
                }
            }
            "delete" => {
                let Some(answer) = read_line(input, "Delete this generation? [y/N] ").await? else {
                    return Ok(None);
                };
                let confirmed = matches!(answer.trim(), "y" | "Y" | "yes");
                if controller.delete(confirmed).await {
                    println!("Deleted.");
                    return Ok(Some(Route::Gallery));
                }
                if let Some(err) = controller.error() {
                    println!("! {}", err);
                }
            }
            "back" => return Ok(Some(Route::Gallery)),
            "quit" | "exit" => return Ok(None),
            other => println!("Unknown command '{}'.", other),
        }
    }
}

async fn login_screen(
    backend: &Arc<dyn BackendService>,
    input: &mut Input,
) -> Result<Option<Route>, AppError> {
    let mut controller = LoginController::new(backend.clone());
    if let Some(target) = controller.mount().await {
        return Ok(Some(target));
    }

    println!();
    println!("=== Sign in ===");
    loop {
        let Some(email) = read_line(input, "email (blank to go back): ").await? else {
            return Ok(None);
        };
        if email.trim().is_empty() {
            return Ok(Some(Route::Landing));
        }
        let Some(password) = read_line(input, "password: ").await? else {
            return Ok(None);
        };
        if let Some(target) = controller.submit(&email, &password).await {
            return Ok(Some(target));
        }
        if let Some(err) = controller.error() {
            println!("! {}", err);
        }
    }
}

async fn signup_screen(
    backend: &Arc<dyn BackendService>,
    input: &mut Input,
) -> Result<Option<Route>, AppError> {
    let mut controller = SignupController::new(backend.clone());
    if let Some(target) = controller.mount().await {
        return Ok(Some(target));
    }

    println!();
    println!("=== Create your account ===");
    loop {
        let Some(email) = read_line(input, "email (blank to go back): ").await? else {
            return Ok(None);
        };
        if email.trim().is_empty() {
            return Ok(Some(Route::Landing));
        }
        let Some(password) = read_line(input, "password (min 6 chars): ").await? else {
            return Ok(None);
        };
        if let Some(target) = controller.submit(&email, &password).await {
            return Ok(Some(target));
        }
        if let Some(err) = controller.error() {
            println!("! {}", err);
        }
    }
}

//=========================================================================================
// Rendering Helpers
//=========================================================================================

fn render_preview(controller: &GenerateController) {
    if let Some(err) = controller.error() {
        println!("! {}", err);
    }
    if let Some(preview) = controller.preview() {
        if let Some(title) = preview.title.as_deref() {
            if !title.is_empty() {
                println!("-- {} --", title);
            }
        }
        println!("Preview (copy & paste):");
        if preview.chapters_text.is_empty() {
            println!("  (empty)");
        } else {
            for line in preview.chapters_text.lines() {
                println!("  {}", line);
            }
        }
        if let Some(note) = preview.note.as_deref() {
            println!("Note: {}", note);
        }
        if controller.can_save() {
            println!("`save` to keep this generation.");
        }
    }
}

fn render_gallery(controller: &GalleryController) {
    if let Some(err) = controller.error() {
        println!("! {}", err);
        return;
    }
    if controller.items().is_empty() {
        println!("No saved generations yet.");
        return;
    }
    let rows = controller.filtered();
    if rows.is_empty() {
        println!("No results.");
        return;
    }
    for row in rows {
        println!("  [{}] {}", row.id, row.display_title());
        println!("       {}", row.url);
        println!("       {}", format_stamp(&row.created_at));
    }
}

fn render_detail(controller: &DetailController) {
    if let Some(err) = controller.error() {
        println!("! {}", err);
    }
    let Some(record) = controller.record() else {
        return;
    };
    println!("=== {} ===", controller.heading());
    match controller.player_url() {
        Some(embed) => println!("Player:  {}", embed),
        None => println!("Link:    {}", record.url),
    }
    println!("Created: {}", format_stamp(&record.created_at));
    println!("Status:  {}", record.status);
    println!("Chapters (editable):");
    if controller.text().is_empty() {
        println!("  (empty)");
    } else {
        for line in controller.text().lines() {
            println!("  {}", line);
        }
    }
}

//=========================================================================================
// Small Utilities
//=========================================================================================

async fn read_line(input: &mut Input, prompt: &str) -> Result<Option<String>, AppError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    }
}

/// Backend timestamps render as local time when they parse as RFC 3339 and
/// as the raw value otherwise.
fn format_stamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(stamp) => stamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
