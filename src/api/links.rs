//! Referral link CRUD under `/agents/{agent_id}/links`

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::state::AppState;
use crate::errors::AgentlinkError;
use crate::storage::{NewReferralLink, ReferralLinkPatch};

/// Create body; the owning agent comes from the path
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkBody {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub async fn list_links(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AgentlinkError> {
    let links = state.links.list(Some(path.as_str())).await?;
    trace!("Listing {} links for agent {}", links.len(), path);
    Ok(HttpResponse::Ok().json(links.as_ref()))
}

pub async fn create_link(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreateLinkBody>,
) -> Result<HttpResponse, AgentlinkError> {
    let body = body.into_inner();
    let link = state
        .links
        .create(NewReferralLink {
            agent_id: path.into_inner(),
            name: body.name,
            country: body.country,
            contact: body.contact,
            label: body.label,
            message: body.message,
            is_active: body.is_active.unwrap_or(true),
        })
        .await?;
    Ok(HttpResponse::Created().json(link))
}

pub async fn update_link(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<ReferralLinkPatch>,
) -> Result<HttpResponse, AgentlinkError> {
    let (agent_id, id) = path.into_inner();
    let link = state
        .links
        .update(&id, &agent_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(link))
}

pub async fn delete_link(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AgentlinkError> {
    let (agent_id, id) = path.into_inner();
    state.links.delete(&id, &agent_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
