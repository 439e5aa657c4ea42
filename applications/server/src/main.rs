/// Harmony Hub Server - catalog proxy, uploads, playlists and playback session
use clap::{Parser, Subcommand};
use harmony_server::{
    config::ServerConfig,
    create_router,
    services::{CatalogService, ObjectStorage, SONGS_BUCKET},
    state::AppState,
};
use harmony_storage::Database;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harmony-server")]
#[command(about = "Harmony Hub API server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "HARMONY_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create the public songs bucket
    CreateBucket,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harmony_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::CreateBucket => create_bucket(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Harmony Hub server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let objects = ObjectStorage::new(
        config.storage.objects_path.clone(),
        &config.server.public_url,
    )?;
    objects.initialize().await?;
    let objects = Arc::new(objects);
    tracing::info!("Object storage initialized");

    let catalog = Arc::new(CatalogService::new(config.catalog.clone())?);

    let app_state = AppState::new(db, catalog, objects, config.admin.is_configured());
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn create_bucket(config: &ServerConfig) -> anyhow::Result<()> {
    let objects = ObjectStorage::new(
        config.storage.objects_path.clone(),
        &config.server.public_url,
    )?;
    objects.initialize().await?;

    if objects.bucket_exists(SONGS_BUCKET).await? {
        println!("Bucket '{}' already exists", SONGS_BUCKET);
        return Ok(());
    }

    let bucket = objects.create_bucket(SONGS_BUCKET).await?;
    println!("Created bucket '{}'", bucket.name);

    Ok(())
}
