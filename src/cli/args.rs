//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Host capability bridge for desktop UI shells
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: hostbridge.toml)
    #[arg(short = 'C', long, global = true, default_value = "hostbridge.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Connect to a live-reload server and report its frames
    #[command(visible_alias = "r")]
    Reload {
        #[command(flatten)]
        args: ReloadArgs,
    },

    /// gzip a file
    Gzip {
        #[command(flatten)]
        io: IoArgs,

        /// Compression level 0-9 (default: [compress] level)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: Option<u32>,
    },

    /// Decompress a gzip file
    Gunzip {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Show access time and kind of a path
    Stat {
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        path: PathBuf,
    },

    /// List directory entry names, sorted
    Ls {
        #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
        path: PathBuf,
    },

    /// Split a path into dirname, basename, filename and extname
    Path {
        path: String,

        /// Print only this part
        #[arg(short, long)]
        part: Option<String>,
    },

    /// Resolve a well-known directory (home, temp, userData, ...)
    Dir {
        kind: String,

        /// Segments joined onto the directory
        parts: Vec<String>,
    },

    /// Read and write the local key-value store
    #[command(visible_alias = "s")]
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },

    /// Print package.json of the application root
    Package {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Ask for a file to open or save
    Pick {
        #[command(flatten)]
        args: PickArgs,
    },

    /// Open a URL with the default application
    Open {
        #[arg(value_hint = clap::ValueHint::Url)]
        url: String,
    },

    /// Set the window title
    Title { title: String },
}

/// Input/output file pair.
#[derive(clap::Args, Debug, Clone)]
pub struct IoArgs {
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file (default: derived from the input name)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Live-reload client arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ReloadArgs {
    /// Server host (default: [reload] host)
    #[arg(long)]
    pub host: Option<String>,

    /// Server port (default: [reload] port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connect with wss://
    #[arg(long)]
    pub secure: bool,

    /// Stylesheet hrefs to track across refreshcss frames
    #[arg(short, long = "link", value_name = "HREF")]
    pub links: Vec<String>,
}

/// Dialog arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PickArgs {
    /// Ask for a save target instead of files to open
    #[arg(short, long)]
    pub save: bool,

    /// Allow more than one file
    #[arg(short, long, conflicts_with = "save")]
    pub multiple: bool,

    /// Suggested file name for --save
    #[arg(short, long, requires = "save")]
    pub default_name: Option<String>,

    /// Filter as `label=ext[,ext...]`, repeatable
    #[arg(short, long = "filter", value_name = "LABEL=EXTS")]
    pub filters: Vec<String>,
}

/// Local storage actions.
#[derive(Subcommand, Debug, Clone)]
pub enum StorageAction {
    /// Print a value
    Get { key: String },
    /// Store a value
    Set { key: String, value: String },
    /// Delete a value
    Remove { key: String },
    /// List keys
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_storage_set() {
        let cli = Cli::parse_from(["hostbridge", "-v", "storage", "set", "theme", "dark"]);
        assert!(cli.verbose);
        let Commands::Storage { action: StorageAction::Set { key, value } } = cli.command else {
            panic!("expected storage set");
        };
        assert_eq!((key.as_str(), value.as_str()), ("theme", "dark"));
    }

    #[test]
    fn test_parse_pick_filters() {
        let cli = Cli::parse_from(["hostbridge", "pick", "-m", "-f", "images=png,jpg", "-f", "text=txt"]);
        let Commands::Pick { args } = cli.command else {
            panic!("expected pick");
        };
        assert!(args.multiple && !args.save);
        assert_eq!(args.filters, ["images=png,jpg", "text=txt"]);
    }

    #[test]
    fn test_level_range() {
        assert!(Cli::try_parse_from(["hostbridge", "gzip", "a.txt", "-l", "12"]).is_err());
        assert!(Cli::try_parse_from(["hostbridge", "gzip", "a.txt", "-l", "9"]).is_ok());
    }
}
