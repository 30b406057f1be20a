mod api_error;
mod chat_payload;
mod routes;
mod selection_payload;
mod session_response;

use routes::AppState;
use std::sync::Arc;
use std::time::Duration;
use studio::{GenerationClient, SessionStore, StudioConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so load it before the logger
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match StudioConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Using Gemini model {}", config.model);

    let state = AppState::new(GenerationClient::gemini(&config));
    spawn_idle_sweep(state.sessions.clone(), config.session_idle);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Ends idle sessions in the background; checks a few times per idle window.
fn spawn_idle_sweep(sessions: Arc<SessionStore>, max_idle: Duration) {
    let period = (max_idle / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            sessions.prune_idle(max_idle).await;
        }
    });
}
