//! Command-line interface module.

mod args;
pub mod app;
pub mod files;
pub mod reload;

pub use args::{Cli, Commands, IoArgs, PickArgs, ReloadArgs, StorageAction};

use anyhow::Result;
use hostbridge::NativeHost;

/// Run one subcommand against `host`.
pub async fn run(cli: &Cli, host: &NativeHost) -> Result<()> {
    match &cli.command {
        Commands::Reload { args } => reload::run_reload(args, host.context().config()).await,
        Commands::Gzip { io, level } => files::gzip_file(host, io, *level).await,
        Commands::Gunzip { io } => files::gunzip_file(host, io).await,
        Commands::Stat { path } => files::stat_path(host, path).await,
        Commands::Ls { path } => files::list_dir(host, path).await,
        Commands::Path { path, part } => files::print_path_parts(host, path, part.as_deref()),
        Commands::Dir { kind, parts } => app::print_dir(host, kind, parts),
        Commands::Storage { action } => app::storage(host, action),
        Commands::Package { pretty } => app::print_package(host, *pretty),
        Commands::Pick { args } => app::pick(host, args).await,
        Commands::Open { url } => app::open_url(host, url),
        Commands::Title { title } => app::set_title(host, title),
    }
}
