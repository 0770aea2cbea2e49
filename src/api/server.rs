//! HTTP server startup

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};

use super::{AppState, api_routes, json_config};
use crate::config::{ServerConfig, StaticConfig};
use crate::errors::{AgentlinkError, Result};

fn build_cors(config: &ServerConfig) -> Cors {
    if config.cors_origins.is_empty() {
        return Cors::default();
    }

    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .max_age(3600);

    if config.cors_origins.iter().any(|o| o == "*") {
        // any-origin never carries credentials, so the session cookie stays same-site
        return cors.allow_any_origin();
    }

    config
        .cors_origins
        .iter()
        .fold(cors.supports_credentials(), |cors, origin| {
            cors.allowed_origin(origin)
        })
}

/// Build state from config and serve until shutdown
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let state = AppState::from_config(config).await?;
    let server_config = config.server.clone();
    let prefix = server_config.api_prefix.clone();
    let workers = server_config.cpu_count.clamp(1, 32);

    let bind_address = format!("{}:{}", server_config.host, server_config.port);
    info!(
        "Starting server at http://{}{} ({} workers, links in {} backend)",
        bind_address,
        prefix,
        workers,
        state.links.backend_name()
    );

    if server_config.cors_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin; credentialed cross-origin requests are disabled");
    }

    let cors_config = server_config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .service(api_routes(&prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers)
    .bind(&bind_address)
    .map_err(|e| AgentlinkError::config(format!("Failed to bind {}: {}", bind_address, e)))?
    .run();

    server
        .await
        .map_err(|e| AgentlinkError::config(format!("Server error: {}", e)))?;
    warn!("Server stopped");
    Ok(())
}
