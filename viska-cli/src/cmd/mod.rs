//! CLI argument definitions and subcommand routing.

pub mod config;
pub mod inspect;
pub mod session;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Result alias for command handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Viska(#[from] viska::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }
}

/// Drive the Viska native core from the command line.
#[derive(Parser)]
#[command(name = "viska", version, about)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `viska_core=trace` (overrides `log_level`).
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Config file to use instead of the platform default.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory relative profile names resolve against (overrides `profiles_dir`).
    #[arg(long, global = true)]
    pub profiles_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// One-shot operations.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the core and show version and configuration.
    Info,
    /// SHA3-256 of the given text, computed by the native core.
    Hash {
        /// Input text.
        text: String,
        /// Treat the input as hex-encoded bytes.
        #[arg(long)]
        hex: bool,
    },
    /// Open one client per profile, print its identity and release it.
    Session(SessionArgs),
    /// Decode a hex-encoded result envelope and print it as JSON.
    Inspect {
        /// Envelope bytes as hex.
        payload: String,
        /// Payload type the envelope carries.
        #[arg(short = 't', long = "type", value_enum, default_value = "unit")]
        ty: PayloadType,
    },
    /// Show or edit the config file.
    Config {
        /// Set a value, as `key=value`. An empty value clears the key.
        #[arg(long)]
        set: Option<String>,
    },
}

/// Arguments for the `session` subcommand.
#[derive(clap::Args)]
pub struct SessionArgs {
    /// Profile paths. Relative names resolve against the profiles directory.
    #[arg(required = true)]
    pub profiles: Vec<String>,

    /// Display name to set on every client before printing.
    #[arg(long)]
    pub display_name: Option<String>,
}

/// Payload types `inspect` can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadType {
    Unit,
    Bool,
    U64,
    String,
    Bytes,
    Handle,
    OptString,
}
