use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rpc_image::application::ResolveImageUseCase;
use rpc_image::domain::{CacheNamespace, ImageCachePort, ImageSource, PreferencePort};
use rpc_image::infrastructure::config::{CacheCommand, Command, SourceArgs};
use rpc_image::infrastructure::{
    AppConfig, CliArgs, ConfigFile, FilePreferences, IconDirectory, ImageCacheStore,
    MemoryPreferences, UploadApiClient,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = ConfigFile::locate(args.config.as_deref())?
        .load()
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);
    Ok(config)
}

fn open_cache(config: &AppConfig, ephemeral: bool) -> Result<Arc<ImageCacheStore>> {
    let backend: Arc<dyn PreferencePort> = if ephemeral {
        Arc::new(MemoryPreferences::new())
    } else {
        let dir = config
            .effective_cache_dir()
            .ok_or_else(|| eyre!("could not determine a cache directory; pass --cache-dir"))?;
        debug!(path = %dir.display(), "Using token cache directory");
        Arc::new(FilePreferences::new(dir))
    };

    let store = ImageCacheStore::open(backend).wrap_err("Failed to open token cache")?;
    Ok(Arc::new(store))
}

async fn build_source(config: &AppConfig, source: SourceArgs) -> Result<ImageSource> {
    let source = match source {
        SourceArgs::Raw { asset_id } => ImageSource::raw_asset(asset_id),
        SourceArgs::Url { url } => ImageSource::external_url(url),
        SourceArgs::Icon { package_name } => {
            let dir = config
                .effective_icon_dir()
                .ok_or_else(|| eyre!("could not determine an icon directory; pass --icon-dir"))?;
            ImageSource::app_icon(package_name, Arc::new(IconDirectory::new(dir)))
        }
        SourceArgs::Artwork {
            package_name,
            title,
            file,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .wrap_err_with(|| format!("Failed to read artwork {}", file.display()))?;
            ImageSource::artwork(package_name, title, bytes)
        }
        SourceArgs::Ref { reference } => ImageSource::from_reference(&reference)
            .ok_or_else(|| eyre!("image reference is empty"))?,
    };
    Ok(source)
}

async fn resolve(config: &AppConfig, ephemeral: bool, source: SourceArgs) -> Result<ExitCode> {
    let source = build_source(config, source).await?;

    let base_url = match (&config.api.base_url, source.requires_network()) {
        (Some(url), _) => url.clone(),
        (None, false) => String::new(),
        (None, true) => bail!("no upload service configured; set api.base_url or --api-url"),
    };
    let upload_client = Arc::new(UploadApiClient::new(base_url, config.api.timeout_secs)?);
    let cache = open_cache(config, ephemeral)?;
    let use_case = ResolveImageUseCase::new(upload_client, cache);

    match use_case.resolve(source).await {
        Some(token) => {
            println!("{token}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no image available");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn inspect_cache(config: &AppConfig, ephemeral: bool, action: CacheCommand) -> Result<ExitCode> {
    let cache = open_cache(config, ephemeral)?;

    match action {
        CacheCommand::Get { namespace, key } => match cache.get(namespace.into(), &key) {
            Some(token) => {
                println!("{token}");
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("no token cached for {}/{key}", CacheNamespace::from(namespace));
                Ok(ExitCode::FAILURE)
            }
        },
        CacheCommand::List { namespace } => {
            for (key, token) in cache.entries(namespace.into()) {
                println!("{key}\t{token}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = rpc_image::VERSION, "Starting {}", rpc_image::NAME);

    match args.command {
        Command::Resolve { source } => resolve(&config, args.ephemeral, source).await,
        Command::Cache { action } => inspect_cache(&config, args.ephemeral, action),
    }
}
