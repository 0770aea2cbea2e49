//! HTTP API
//!
//! Routes (relative to `server.api_prefix`):
//! - GET/DELETE `/attribution` - capture or clear session attribution
//! - GET `/agent-info` - resolve the referring agent
//! - POST `/score` - score questionnaire answers
//! - POST `/leads`, PUT `/leads/{id}/status` - lead intake
//! - GET/POST `/agents/{agent_id}/links`, PUT/DELETE `/agents/{agent_id}/links/{id}`
//! - GET `/health`

mod attribution;
mod error;
mod health;
mod leads;
mod links;
pub mod server;
mod session;
pub mod state;

use actix_web::web;

pub use attribution::{AgentInfoResponse, AttributionResponse};
pub use error::{ErrorBody, json_config};
pub use links::CreateLinkBody;
pub use state::AppState;

/// All API routes under `prefix`
pub fn api_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("/health", web::get().to(health::health))
        .route("/attribution", web::get().to(attribution::capture))
        .route("/attribution", web::delete().to(attribution::clear))
        .route("/agent-info", web::get().to(attribution::agent_info))
        .route("/score", web::post().to(leads::score))
        .route("/leads", web::post().to(leads::submit))
        .route("/leads/{id}/status", web::put().to(leads::update_status))
        .service(
            web::scope("/agents/{agent_id}/links")
                .route("", web::get().to(links::list_links))
                .route("", web::post().to(links::create_link))
                .route("/{id}", web::put().to(links::update_link))
                .route("/{id}", web::delete().to(links::delete_link)),
        )
}
