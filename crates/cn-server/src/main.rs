use anyhow::Context;
use clap::Parser;
use cn_config::CasenoteConfig;
use cn_db::service::PracticeService;
use cn_server::AppState;
use cn_server::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("casenote error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = CasenoteConfig::load_with_dotenv().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    init_tracing(cli.log_level(&config.general.log_filter))?;

    match cli.command {
        Commands::Serve { .. } => serve(&config).await,
        Commands::InitDb { .. } => {
            open_service(&config).await?;
            println!(
                "database ready at {}",
                config.database.resolved_path().display()
            );
            Ok(())
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CASENOTE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn open_service(config: &CasenoteConfig) -> anyhow::Result<PracticeService> {
    let path = config.database.resolved_path();
    let path_str = path
        .to_str()
        .with_context(|| format!("database path {} is not valid UTF-8", path.display()))?;
    let service = PracticeService::new_local(path_str)
        .await
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    tracing::info!(path = %path.display(), "database opened");
    Ok(service)
}

async fn serve(config: &CasenoteConfig) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let app = cn_server::router(AppState::new(service));

    let addr = config.server.bind_address()?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "casenote listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server stopped with an error")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
