use anyhow::Result;
use clap::{Parser, Subcommand};
use prison_escape::routes::{router, AppState};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Prison Escape - browser game with user accounts
#[derive(Parser)]
#[command(name = "prison-escape")]
#[command(about = "Browser escape game with user accounts", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = prison_escape::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    prison_escape::observability::init_observability(
        "prison-escape",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => prison_escape::db::migrate(&config).await,
        Commands::Reset => prison_escape::db::reset(&config).await,
    }
}

async fn serve_command(
    config: prison_escape::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    let pool =
        prison_escape::db::create_pool(&config.database.url, config.database.max_connections)
            .await?;

    let state = AppState { pool };
    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
