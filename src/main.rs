use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use wikitext_service::{
    config::Config,
    api::routes::create_router,
    wikipedia,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!("Using Wikipedia API at {}", config.wikipedia_api_url);

    // Build the shared outbound client before serving traffic
    wikipedia::init_client(config.request_timeout)?;

    let app_state = AppState {
        config: Arc::new(config),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    info!("Listening on {}", server_addr);
    info!("Article endpoint: http://{}/GetWikiText?title=<title>", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Sets up the global tracing subscriber from `RUST_LOG` and `LOG_FORMAT`.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .with_target(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
