//! hostbridge - command-line front end for the host bridge.

mod cli;
mod core;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use hostbridge::config::HostConfig;
use hostbridge::ipc::TerminalDialogs;
use hostbridge::logger::set_verbose;
use hostbridge::{HostContext, NativeHost};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    set_verbose(cli.verbose);

    let config = HostConfig::load(&cli.config)?;
    let host = NativeHost::new(HostContext::start(config, TerminalDialogs)?);

    cli::run(&cli, &host).await
}
