//! manga-rs server entry point.

use clap::Parser;
use manga_rs::{
    PageCache, MangaService,
    config::{Cli, Command, Config},
    store,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    match cli.command {
        Some(Command::Init { force }) => cmd_init(force),
        Some(Command::Info { path }) => cmd_info(path),
        Some(Command::Serve { bind, volume }) => cmd_serve(config, bind, volume).await,
        None => {
            // Default: start server
            cmd_serve(config, None, None).await
        }
    }
}

/// Create a default config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());
    println!("\nEdit config.toml to point at your volume.");
    println!("Then run: manga-rs serve");

    Ok(())
}

/// Print a volume's metadata.
fn cmd_info(path: PathBuf) -> anyhow::Result<()> {
    let store = store::open_volume(&path)?;
    let meta = store.metadata();

    println!("{:<15} {}", "id:", meta.id);
    println!("{:<15} {}", "english name:", meta.english_name);
    println!("{:<15} {}", "japanese name:", meta.japanese_name);
    println!("{:<15} {}", "tags:", meta.tags.join(", "));
    println!("{:<15} {}", "artists:", meta.artists.join(", "));
    println!("{:<15} {}", "pages:", meta.pages);
    println!("{:<15} {}", "uploaded:", meta.uploaded);

    Ok(())
}

/// Start the server.
async fn cmd_serve(
    mut config: Config,
    bind: Option<std::net::SocketAddr>,
    volume: Option<PathBuf>,
) -> anyhow::Result<()> {
    // CLI overrides
    if let Some(addr) = bind {
        config.server.bind = addr;
    }
    if let Some(path) = volume {
        config.volume.path = path;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manga_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind = %config.server.bind,
        volume = %config.volume.path.display(),
        "Starting manga-rs server"
    );

    let store: Arc<dyn manga_rs::VolumeStore> =
        Arc::from(store::open_volume(&config.volume.path)?);
    let meta = store.metadata();
    tracing::info!(
        id = meta.id,
        title = %meta.english_name,
        pages = meta.pages,
        "Volume loaded"
    );

    let cache = PageCache::new(config.cache.capacity);
    let service = MangaService::new(store, cache);

    tracing::info!(address = %config.server.bind, "Server listening");

    tonic::transport::Server::builder()
        .add_service(service.into_server())
        .serve_with_shutdown(config.server.bind, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
