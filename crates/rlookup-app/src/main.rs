use clap::Parser;
use rlookup_app::{AppState, logging, router, serve, shutdown_signal};
use rlookup_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

#[derive(Parser, Debug)]
#[command(name = "rlookup")]
#[command(about = "Reverse dictionary: describe a concept, get the word")]
struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::new();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.server.cors |= args.cors;

    logging::init(config.log_format.as_deref());

    let state = AppState::from_config(&config);
    let mut app = router(state);

    if config.server.cors {
        tracing::info!("CORS enabled for all origins");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown requested");
        shutdown.cancel();
    });

    serve(&config.server.bind_addr(), app, cancel).await
}
