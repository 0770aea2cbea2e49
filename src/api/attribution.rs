//! Landing-page attribution endpoints

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::session::RequestSession;
use super::state::AppState;
use crate::attribution::{NavigationParams, SessionAttribution, UtmParams};
use crate::errors::AgentlinkError;
use crate::events::AppEvent;
use crate::resolver::PublicAgentInfo;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionResponse {
    pub attribution: Option<SessionAttribution>,
    pub utm: UtmParams,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfoResponse {
    pub agent_info: Option<PublicAgentInfo>,
}

/// `GET /attribution?ref=&cid=&utm_*=`
pub async fn capture(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AgentlinkError> {
    let params = NavigationParams::from_query(req.query_string());
    let session = RequestSession::get_or_create(&req, &state);

    let attribution = session.tracker.capture(&params);
    if let Some(ref_code) = &params.ref_code {
        state.events.publish(AppEvent::AttributionCaptured {
            ref_code: ref_code.clone(),
            campaign_id: params.campaign_id.clone(),
        });
    }
    trace!("Session {} attribution: {:?}", session.id, attribution);

    let mut builder = HttpResponse::Ok();
    session.attach(&mut builder, &state);
    Ok(builder.json(AttributionResponse {
        attribution,
        utm: params.utm,
    }))
}

/// `DELETE /attribution`
pub async fn clear(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AgentlinkError> {
    if let Some(session) = RequestSession::existing(&req, &state) {
        session.tracker.clear();
        state.events.publish(AppEvent::AttributionCleared);
    }
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /agent-info?ref=&cid=`
///
/// Falls back to the session's attribution when `ref` is absent.
pub async fn agent_info(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AgentlinkError> {
    let params = NavigationParams::from_query(req.query_string());

    let (ref_code, campaign_id) = match params.ref_code {
        Some(ref_code) => (Some(ref_code), params.campaign_id),
        None => RequestSession::existing(&req, &state)
            .and_then(|s| s.tracker.attribution())
            .map(|a| (Some(a.ref_code), a.campaign_id))
            .unwrap_or((None, None)),
    };

    let agent_info = state
        .resolver
        .resolve(ref_code.as_deref(), campaign_id.as_deref())
        .await;

    Ok(HttpResponse::Ok().json(AgentInfoResponse {
        agent_info: agent_info.map(|info| info.as_ref().clone()),
    }))
}
