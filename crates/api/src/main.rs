use api::{build_app, init_domain_services};
use config::{ApiConfig, LoggingConfig};

#[tokio::main]
async fn main() {
    // Load configuration first to get logging settings
    let config = ApiConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        eprintln!("Application cannot start without a completion API key.");
        std::process::exit(1);
    });

    init_tracing(&config.logging);
    tracing::debug!(?config, "Configuration loaded");

    let domain_services = init_domain_services(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to initialize services");
        std::process::exit(1);
    });

    let app = build_app(domain_services);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!("API Endpoints:");
    tracing::info!("  - GET  /v1/health");
    tracing::info!("  - POST /v1/recommendations");
    tracing::info!("  - POST /v1/events");
    tracing::info!("  - GET  /v1/profile");
    tracing::info!("  - GET  /v1/feeds?url=...");
    tracing::info!("  - POST /v1/chat/sessions");
    tracing::info!("  - DELETE /v1/chat/sessions/{{id}}");
    tracing::info!("  - GET/POST /v1/chat/sessions/{{id}}/messages");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

fn init_tracing(logging_config: &LoggingConfig) {
    let filter = logging_config.filter_directive();

    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
