use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{completion, extract, history, page, suggest};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(page::health))
        .route("/languages", get(page::languages))
        .route("/suggest", get(suggest::suggest))
        .route("/completion", post(completion::complete))
        .route("/extract", post(extract::extract))
        .route(
            "/history",
            get(history::list_history)
                .post(history::add_history)
                .delete(history::clear_history),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `addr` until `cancel` fires
pub async fn serve(addr: &str, app: Router, cancel: CancellationToken) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", listener.local_addr()?);
    info!("Endpoints:");
    info!("  GET    /            - Lookup form");
    info!("  POST   /completion  - Streamed word lookup");
    info!("  POST   /extract     - Word and pronunciation of a completion");
    info!("  GET    /history     - Past lookups");
    info!("  POST   /history     - Record a lookup");
    info!("  DELETE /history     - Clear history (admin password)");
    info!("  GET    /suggest     - Random example description");
    info!("  GET    /languages   - Selectable languages");
    info!("  GET    /health      - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("HTTP server exited");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
