use super::app_config::LogLevel;
use crate::domain::entities::CacheNamespace;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rpc-image",
    version,
    about = "Resolve presence images into tokens, uploading each image at most once",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Upload service base URL.
    #[arg(long, env = "RPC_IMAGE_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Upload service request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Token cache directory.
    #[arg(long, env = "RPC_IMAGE_CACHE_DIR", value_name = "PATH", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Directory of `<package>.png` application icons.
    #[arg(long, env = "RPC_IMAGE_ICON_DIR", value_name = "PATH", global = true)]
    pub icon_dir: Option<PathBuf>,

    /// Keep the token cache in memory only.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an image source into a token.
    Resolve {
        #[command(subcommand)]
        source: SourceArgs,
    },
    /// Inspect the token cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SourceArgs {
    /// Platform asset id.
    Raw { asset_id: String },
    /// Externally hosted image URL.
    Url { url: String },
    /// Icon of an installed application.
    Icon { package_name: String },
    /// Artwork read from a file.
    Artwork {
        package_name: String,
        title: String,
        file: PathBuf,
    },
    /// Free-form reference: URLs are looked up, anything else is an asset id.
    Ref { reference: String },
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Print the token cached for a key.
    Get {
        #[arg(value_enum)]
        namespace: NamespaceArg,
        key: String,
    },
    /// List every cached token in a namespace.
    List {
        #[arg(value_enum)]
        namespace: NamespaceArg,
    },
}

/// Cache namespace as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamespaceArg {
    /// Application icons.
    Icons,
    /// Media artwork.
    Artwork,
}

impl From<NamespaceArg> for CacheNamespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Icons => Self::Icons,
            NamespaceArg::Artwork => Self::Artwork,
        }
    }
}
