//! viska: command-line driver for the Viska native core.
//!
//! Every command goes through the same host proxies an application would use.

#![allow(
    missing_docs,
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

mod cmd;

use std::process;

use clap::Parser;
use viska::Library;

use crate::cmd::config::{self, Config};
use crate::cmd::{Cli, Command};

fn main() {
    if let Err(e) = run() {
        eprintln!("fatal: {e}");
        process::exit(1);
    }
}

fn run() -> cmd::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let cfg = Config::load(&config_path)?;

    // Flags win over the config file.
    let level = cli.log_level.as_deref().or(cfg.log_level.as_deref());
    riko_runtime::logger::init(level);

    let lib = Library::native();
    lib.initialize()?;
    tracing::debug!(config = %config_path.display(), "viska ready");

    match cli.command {
        Command::Info => cmd::session::info(&lib, &cfg, &config_path),
        Command::Hash { text, hex } => cmd::session::hash(&lib, &text, hex),
        Command::Session(args) => {
            let dir = cli.profiles_dir.unwrap_or_else(|| cfg.profiles_dir());
            cmd::session::run(&lib, &dir, &args)
        }
        Command::Inspect { payload, ty } => cmd::inspect::run(&payload, ty),
        Command::Config { set } => config::run(&config_path, cfg, set.as_deref()),
    }
}
