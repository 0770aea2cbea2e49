//! Scoring and lead intake endpoints

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::session::RequestSession;
use super::state::AppState;
use crate::attribution::NavigationParams;
use crate::errors::AgentlinkError;
use crate::events::AppEvent;
use crate::scoring::AgentAnswers;
use crate::services::LeadSubmission;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// `POST /score`
pub async fn score(
    state: web::Data<AppState>,
    answers: web::Json<AgentAnswers>,
) -> Result<HttpResponse, AgentlinkError> {
    Ok(HttpResponse::Ok().json(state.engine.score(&answers)))
}

/// `POST /leads?utm_*=`
///
/// Attribution comes from the session and is cleared once the lead is stored.
pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LeadSubmission>,
) -> Result<HttpResponse, AgentlinkError> {
    let utm = NavigationParams::from_query(req.query_string()).utm;
    let session = RequestSession::existing(&req, &state);
    let attribution = session.as_ref().and_then(|s| s.tracker.attribution());

    let lead = state
        .leads
        .submit(body.into_inner(), attribution, utm)
        .await?;

    if let Some(session) = session {
        session.tracker.clear();
        state.events.publish(AppEvent::AttributionCleared);
        info!("Session {} converted, attribution cleared", session.id);
    }

    Ok(HttpResponse::Created().json(lead))
}

/// `PUT /leads/{id}/status`
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AgentlinkError> {
    let lead = state
        .leads
        .update_status(&path, body.status.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(lead))
}
