//! Command runners

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, NoteStoreError};
use crate::application::{
    SaveNoteCallbacks, SaveNoteError, SaveNoteInput, SaveNoteUseCase, SaveOutcome,
};
use crate::domain::config::{AppConfig, ClientConfig, ConflictPolicy};
use crate::domain::message::{MessageEnvelope, VideoSession};
use crate::domain::note::{render_template, NoteMetadata, NoteTitle};
use crate::domain::video::Timestamp;
use crate::infrastructure::{create_notifier, ObsidianClient, XdgConfigStore};

use super::args::{BodyArgs, NoteAction, RenderArgs, SaveArgs, VideoArgs};
use super::presenter::{status, Presenter};
use super::prompt::resolver_for;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Shown when the note service cannot be contacted
pub const SERVICE_UNREACHABLE_MESSAGE: &str =
    "Could not reach Obsidian. Check that Obsidian is running and the Local REST API plugin is enabled.";

/// Environment variables overriding the config file
pub const ENV_API_URL: &str = "OBSIDIAN_API_URL";
pub const ENV_API_KEY: &str = "OBSIDIAN_API_KEY";
pub const ENV_VAULT: &str = "OBSIDIAN_VAULT";

/// Marker for reading from stdin
const STDIN_PATH: &str = "-";

/// A command failure with its exit code
#[derive(Debug)]
struct Failure {
    code: u8,
    message: String,
}

impl Failure {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE_ERROR,
            message: message.into(),
        }
    }

    fn runtime(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: message.into(),
        }
    }
}

fn finish(result: Result<(), Failure>, presenter: &Presenter) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(failure) => {
            presenter.error(&failure.message);
            ExitCode::from(failure.code)
        }
    }
}

/// Read settings from the environment
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());
    AppConfig {
        api_url: var(ENV_API_URL),
        api_key: var(ENV_API_KEY),
        vault_name: var(ENV_VAULT),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(config_path: Option<PathBuf>, cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::from_override(config_path);
    let file_config = store.load().await.unwrap_or_else(|e| {
        warn!(path = %store.path().display(), error = %e, "ignoring unreadable config file");
        AppConfig::empty()
    });

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

fn build_client(config: &AppConfig) -> Result<ObsidianClient, Failure> {
    let client_config = ClientConfig::from_app_config(config).map_err(|e| Failure::usage(e.to_string()))?;
    debug!(base = %client_config.base_address, vault = %client_config.vault_name, "using note service");
    ObsidianClient::new(client_config).map_err(|e| Failure::runtime(e.to_string()))
}

/// User-facing message for a failed note operation
pub fn describe_store_error(action: &str, error: &NoteStoreError) -> String {
    if error.is_connectivity() {
        debug!(error = %error, "note service unreachable");
        SERVICE_UNREACHABLE_MESSAGE.to_string()
    } else {
        format!("{}: {}", action, error)
    }
}

/// User-facing message for a failed save
pub fn describe_save_error(error: &SaveNoteError) -> String {
    if error.is_connectivity() {
        debug!(error = %error, "note service unreachable");
        SERVICE_UNREACHABLE_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

async fn read_stdin() -> Result<String, Failure> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| Failure::runtime(format!("Failed to read stdin: {}", e)))?;
    Ok(text)
}

async fn read_file(path: &Path) -> Result<String, Failure> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Failure::runtime(format!("Failed to read {}: {}", path.display(), e)))
}

/// Whether the body will be taken from stdin
fn body_from_stdin(body: &BodyArgs) -> bool {
    match (&body.note, &body.note_file) {
        (Some(_), _) => false,
        (None, Some(path)) => is_stdin(path),
        (None, None) => true,
    }
}

/// Read the note body from the flag, a file, or stdin
async fn read_body(body: &BodyArgs) -> Result<String, Failure> {
    match (&body.note, &body.note_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) if !is_stdin(path) => read_file(path).await,
        _ => read_stdin().await,
    }
}

/// Fold newline-delimited relay messages into a session.
/// With a `target`, messages addressed to other targets are skipped.
pub fn session_from_messages(text: &str, target: Option<&str>) -> Result<VideoSession, String> {
    let mut session = match target {
        Some(target) => VideoSession::for_target(target),
        None => VideoSession::new(),
    };

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let envelope =
            MessageEnvelope::parse(line).map_err(|e| format!("Message on line {}: {}", index + 1, e))?;
        if !session.apply(&envelope) {
            debug!(line = index + 1, "message did not change the session");
        }
    }

    Ok(session)
}

async fn read_session(path: &Path, target: Option<&str>) -> Result<VideoSession, Failure> {
    let text = if is_stdin(path) {
        read_stdin().await?
    } else {
        read_file(path).await?
    };
    session_from_messages(&text, target).map_err(Failure::usage)
}

/// Video details of a note after flags and relay messages are combined
#[derive(Debug, Clone, Default)]
pub struct ResolvedVideo {
    pub metadata: Option<NoteMetadata>,
    /// Title suggested by the observed video, when that video is the one noted
    pub suggested_title: Option<String>,
}

/// Combine relay messages and flags into note metadata.
///
/// Flags override what the messages reported. A `--video` naming another
/// video than the observed one discards the observed title and position.
pub fn resolve_metadata(
    video: &VideoArgs,
    session: Option<VideoSession>,
) -> Result<ResolvedVideo, String> {
    let (observed, suggested_title) = match session {
        Some(session) => {
            let suggested = session.suggested_title().map(str::to_string);
            (session.into_metadata(), suggested)
        }
        None => (None, None),
    };

    let (mut metadata, suggested_title) = match (&video.video, observed) {
        (Some(id), Some(observed)) if observed.external_id == id.as_str() => {
            (observed, suggested_title)
        }
        (Some(id), observed) => {
            if let Some(observed) = observed {
                debug!(observed = %observed.external_id, requested = %id.as_str(), "messages describe another video");
            }
            (NoteMetadata::new("", id, Timestamp::default()), None)
        }
        (None, Some(observed)) => (observed, suggested_title),
        (None, None) => {
            if video.video_title.is_some() || video.timestamp.is_some() {
                return Err("--video is required with --video-title or --timestamp".to_string());
            }
            return Ok(ResolvedVideo::default());
        }
    };

    if let Some(title) = &video.video_title {
        metadata.title = title.clone();
    }
    if let Some(timestamp) = video.timestamp {
        metadata.timestamp_label = timestamp.label();
    }

    Ok(ResolvedVideo {
        metadata: Some(metadata),
        suggested_title,
    })
}

async fn gather_metadata(video: &VideoArgs) -> Result<ResolvedVideo, Failure> {
    let session = match &video.messages {
        Some(path) => Some(read_session(path, video.target.as_deref()).await?),
        None => None,
    };
    resolve_metadata(video, session).map_err(Failure::usage)
}

fn check_single_stdin_reader(video: &VideoArgs, body: &BodyArgs) -> Result<(), Failure> {
    let messages_from_stdin = video.messages.as_deref().is_some_and(is_stdin);
    if messages_from_stdin && body_from_stdin(body) {
        return Err(Failure::usage(
            "Messages are read from stdin; pass the note with --note or --note-file",
        ));
    }
    Ok(())
}

/// Run `vidnote save`
pub async fn run_save(args: SaveArgs, config_path: Option<PathBuf>) -> ExitCode {
    let presenter = Presenter::new();
    let result = save(args, config_path, &presenter).await;
    finish(result, &presenter)
}

async fn save(
    args: SaveArgs,
    config_path: Option<PathBuf>,
    presenter: &Presenter,
) -> Result<(), Failure> {
    check_single_stdin_reader(&args.video, &args.body)?;

    let cli_config = AppConfig {
        notify: if args.notify { Some(true) } else { None },
        on_conflict: args.on_conflict.map(|c| ConflictPolicy::from(c).to_string()),
        ..args.connection.to_config()
    };
    let config = load_merged_config(config_path, cli_config).await;
    let client = build_client(&config)?;

    let resolved = gather_metadata(&args.video).await?;
    let body = read_body(&args.body).await?;

    let title = args
        .title
        .clone()
        .or_else(|| args.video.video_title.clone())
        .or(resolved.suggested_title)
        .or_else(|| resolved.metadata.as_ref().map(|m| m.title.clone()))
        .unwrap_or_default();
    let metadata = resolved.metadata;

    let stdin_used =
        body_from_stdin(&args.body) || args.video.messages.as_deref().is_some_and(is_stdin);
    let mut policy = config.on_conflict_or_default();
    if policy == ConflictPolicy::Ask && stdin_used {
        presenter.warn("stdin is taken by input, an existing note will be left untouched");
        policy = ConflictPolicy::Cancel;
    }

    let notify = config.notify_or_default();
    let use_case = SaveNoteUseCase::new(client, resolver_for(policy), create_notifier(notify));

    let input = SaveNoteInput {
        title,
        body,
        metadata,
        raw: args.raw,
        enable_notify: notify,
    };

    let callbacks = SaveNoteCallbacks {
        on_checking: Some(Box::new(|| {
            status("Checking for an existing note...");
        })),
        on_conflict: Some(Box::new(|title: &NoteTitle| {
            status(&format!("\"{}\" already exists", title));
        })),
        on_writing: Some(Box::new(|| {
            status("Writing note...");
        })),
    };

    match use_case.execute(input, callbacks).await {
        Ok(output) => {
            let message = format!("{}: {}", output.outcome.describe(), output.title);
            if output.outcome == SaveOutcome::Cancelled {
                presenter.warn(&message);
            } else {
                presenter.success(&message);
            }
            Ok(())
        }
        Err(e @ (SaveNoteError::MissingInput(_) | SaveNoteError::InvalidTitle(_))) => {
            Err(Failure::usage(e.to_string()))
        }
        Err(e) => Err(Failure::runtime(describe_save_error(&e))),
    }
}

/// Run `vidnote render`
pub async fn run_render(args: RenderArgs) -> ExitCode {
    let presenter = Presenter::new();
    let result = render(args, &presenter).await;
    finish(result, &presenter)
}

async fn render(args: RenderArgs, presenter: &Presenter) -> Result<(), Failure> {
    check_single_stdin_reader(&args.video, &args.body)?;

    let metadata = gather_metadata(&args.video)
        .await?
        .metadata
        .ok_or_else(|| Failure::usage("Nothing to render: pass --video or --messages"))?;
    let body = read_body(&args.body).await?;

    presenter.output_note(&render_template(&metadata, &body));
    Ok(())
}

/// Run `vidnote note ...`
pub async fn run_note(action: NoteAction, config_path: Option<PathBuf>) -> ExitCode {
    let mut presenter = Presenter::new();
    let result = note(action, config_path, &mut presenter).await;
    presenter.stop_spinner();
    finish(result, &presenter)
}

fn parse_title(title: &str) -> Result<NoteTitle, Failure> {
    NoteTitle::new(title).map_err(|e| Failure::usage(e.to_string()))
}

async fn note(
    action: NoteAction,
    config_path: Option<PathBuf>,
    presenter: &mut Presenter,
) -> Result<(), Failure> {
    match action {
        NoteAction::Exists {
            title,
            lenient,
            connection,
        } => {
            let title = parse_title(&title)?;
            let config = load_merged_config(config_path, connection.to_config()).await;
            let client = build_client(&config)?;

            let exists = if lenient {
                client.exists_by_title(&title).await
            } else {
                client
                    .check_exists(&title)
                    .await
                    .map_err(|e| Failure::runtime(describe_store_error("Existence check failed", &e)))?
            };
            presenter.output(&exists.to_string());
            Ok(())
        }
        NoteAction::Show {
            title,
            json,
            connection,
        } => {
            let title = parse_title(&title)?;
            let config = load_merged_config(config_path, connection.to_config()).await;
            let client = build_client(&config)?;

            let record = client
                .fetch_by_title(&title)
                .await
                .map_err(|e| Failure::runtime(describe_store_error("Failed to fetch note", &e)))?;

            if json {
                let text = serde_json::to_string_pretty(&record)
                    .map_err(|e| Failure::runtime(e.to_string()))?;
                presenter.output(&text);
            } else {
                presenter.output_note(&record.content);
            }
            Ok(())
        }
        NoteAction::Put {
            title,
            body,
            connection,
        } => {
            write_note(WriteMode::Replace, &title, &body, connection.to_config(), config_path, presenter)
                .await
        }
        NoteAction::Append {
            title,
            body,
            connection,
        } => {
            write_note(WriteMode::Append, &title, &body, connection.to_config(), config_path, presenter)
                .await
        }
        NoteAction::Create {
            title,
            body,
            connection,
        } => {
            write_note(WriteMode::Legacy, &title, &body, connection.to_config(), config_path, presenter)
                .await
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Replace,
    Append,
    Legacy,
}

async fn write_note(
    mode: WriteMode,
    title: &str,
    body: &BodyArgs,
    cli_config: AppConfig,
    config_path: Option<PathBuf>,
    presenter: &mut Presenter,
) -> Result<(), Failure> {
    let title = parse_title(title)?;
    let config = load_merged_config(config_path, cli_config).await;
    let client = build_client(&config)?;

    let content = read_body(body).await?;
    if content.trim().is_empty() {
        return Err(Failure::usage("Missing note body"));
    }

    let (progress, done, action) = match mode {
        WriteMode::Replace => ("Saving note...", "Note saved", "Failed to save note"),
        WriteMode::Append => ("Appending to note...", "Note appended", "Failed to append to note"),
        WriteMode::Legacy => ("Creating note...", "Note created", "Failed to create note"),
    };

    presenter.start_spinner(progress);
    let result = match mode {
        WriteMode::Replace => client.create_or_replace(&title, &content).await,
        WriteMode::Append => client.append_to_title(&title, &content).await,
        WriteMode::Legacy => client.create_legacy(&title, &content).await,
    };

    match result {
        Ok(()) => {
            presenter.spinner_success(&format!("{}: {}", done, title));
            Ok(())
        }
        Err(e) => {
            presenter.spinner_fail(action);
            Err(Failure::runtime(describe_store_error(action, &e)))
        }
    }
}
