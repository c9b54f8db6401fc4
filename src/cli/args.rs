//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::domain::config::{AppConfig, ConflictPolicy};
use crate::domain::video::{Timestamp, VideoId};

/// vidnote - capture video notes into Obsidian
#[derive(Parser, Debug)]
#[command(name = "vidnote")]
#[command(version)]
#[command(about = "Capture timestamped video notes into Obsidian via the Local REST API")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH", env = "VIDNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a note for a video, asking what to do if the note exists
    Save(SaveArgs),
    /// Print the note that `save` would write, without contacting Obsidian
    Render(RenderArgs),
    /// Low-level note operations
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `vidnote save`
#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    /// Note title (defaults to the video title)
    #[arg(short = 't', long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub video: VideoArgs,

    #[command(flatten)]
    pub body: BodyArgs,

    /// What to do when a note with the same title exists
    #[arg(long, value_name = "POLICY")]
    pub on_conflict: Option<ConflictArg>,

    /// Store the note body as-is instead of the video template
    #[arg(long)]
    pub raw: bool,

    /// Show a desktop notification with the result
    #[arg(short = 'n', long)]
    pub notify: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments of `vidnote render`
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub video: VideoArgs,

    #[command(flatten)]
    pub body: BodyArgs,
}

/// Where the video metadata comes from
#[derive(Args, Debug, Clone, Default)]
pub struct VideoArgs {
    /// Video URL or id (watch, youtu.be and shorts links are accepted)
    #[arg(short = 'u', long, value_name = "URL|ID")]
    pub video: Option<VideoId>,

    /// Video title
    #[arg(long, value_name = "TITLE")]
    pub video_title: Option<String>,

    /// Playback position (HH:MM:SS, MM:SS or seconds)
    #[arg(short = 'T', long, value_name = "TIME")]
    pub timestamp: Option<Timestamp>,

    /// Newline-delimited relay messages to take metadata from ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// Only use messages addressed to this target (untargeted messages always apply)
    #[arg(long, value_name = "NAME", requires = "messages")]
    pub target: Option<String>,
}

/// Where the note body comes from. Stdin is read when neither is given
#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Note text
    #[arg(short = 'm', long = "note", value_name = "TEXT", conflicts_with = "note_file")]
    pub note: Option<String>,

    /// Read the note text from a file
    #[arg(short = 'f', long, value_name = "FILE")]
    pub note_file: Option<PathBuf>,
}

/// Per-invocation overrides of the connection settings
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Local REST API address
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Vault name
    #[arg(long = "vault", value_name = "NAME")]
    pub vault_name: Option<String>,

    /// Folder inside the vault to write notes to
    #[arg(long, value_name = "FOLDER")]
    pub folder: Option<String>,

    /// Accept the plugin's self-signed HTTPS certificate
    #[arg(long)]
    pub insecure: bool,
}

impl ConnectionArgs {
    /// Convert into a partial config for merging
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            api_url: self.api_url.clone(),
            vault_name: self.vault_name.clone(),
            folder: self.folder.clone(),
            accept_invalid_certs: if self.insecure { Some(true) } else { None },
            ..Default::default()
        }
    }
}

/// Low-level note actions
#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Check whether a note exists (prints true or false)
    Exists {
        title: String,
        /// Report any failure as "false" instead of an error
        #[arg(long)]
        lenient: bool,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Print a note
    Show {
        title: String,
        /// Print the full record (content, frontmatter, stat, tags) as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Create a note or replace its content
    Put {
        title: String,
        #[command(flatten)]
        body: BodyArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Append to a note after a blank line
    Append {
        title: String,
        #[command(flatten)]
        body: BodyArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Create a note through the vault-scoped create endpoint of older plugin versions
    Create {
        title: String,
        #[command(flatten)]
        body: BodyArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Conflict policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    Ask,
    Append,
    Overwrite,
    Cancel,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Ask => ConflictPolicy::Ask,
            ConflictArg::Append => ConflictPolicy::Append,
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
            ConflictArg::Cancel => ConflictPolicy::Cancel,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_url",
    "api_key",
    "vault_name",
    "folder",
    "notify",
    "accept_invalid_certs",
    "on_conflict",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
