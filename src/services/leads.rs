//! Lead intake service

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::attribution::{SessionAttribution, UtmParams};
use crate::errors::{AgentlinkError, Result};
use crate::events::{AppEvent, EventBus};
use crate::leads::{LeadStatus, map_lead_status};
use crate::scoring::{AgentAnswers, ScoringEngine};
use crate::storage::{Lead, LeadRepository};

/// Funnel form submission
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub contact_name: String,
    pub contact_channel: String,
    #[serde(default)]
    pub answers: AgentAnswers,
}

pub struct LeadService {
    repo: Arc<dyn LeadRepository>,
    engine: Arc<ScoringEngine>,
    events: EventBus,
}

impl LeadService {
    pub fn new(repo: Arc<dyn LeadRepository>, engine: Arc<ScoringEngine>, events: EventBus) -> Self {
        Self {
            repo,
            engine,
            events,
        }
    }

    /// Score and store a new lead with status `NEW`
    pub async fn submit(
        &self,
        submission: LeadSubmission,
        attribution: Option<SessionAttribution>,
        utm: UtmParams,
    ) -> Result<Lead> {
        let contact_name = submission.contact_name.trim();
        let contact_channel = submission.contact_channel.trim();
        if contact_name.is_empty() {
            return Err(AgentlinkError::validation("contactName must not be empty"));
        }
        if contact_channel.is_empty() {
            return Err(AgentlinkError::validation(
                "contactChannel must not be empty",
            ));
        }

        let result = self.engine.score(&submission.answers);
        let now = Utc::now();
        let (ref_code, campaign_id) = match attribution {
            Some(a) => (Some(a.ref_code), a.campaign_id),
            None => (None, None),
        };

        let lead = Lead {
            id: uuid::Uuid::new_v4().to_string(),
            ref_code,
            campaign_id,
            contact_name: contact_name.to_string(),
            contact_channel: contact_channel.to_string(),
            answers: submission.answers,
            score: result.score,
            label: result.label,
            status: LeadStatus::New,
            utm_source: utm.utm_source,
            utm_medium: utm.utm_medium,
            utm_campaign: utm.utm_campaign,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert_lead(&lead).await?;
        info!(
            "LeadService: lead {} scored {} ({}) ref={:?}",
            lead.id, lead.score, lead.label, lead.ref_code
        );

        self.events.publish(AppEvent::LeadSubmitted {
            lead_id: lead.id.clone(),
            label: lead.label,
        });
        Ok(lead)
    }

    /// Update status from an external status string; unknown text maps to `NEW`
    pub async fn update_status(&self, id: &str, status_text: Option<&str>) -> Result<Lead> {
        let status = map_lead_status(status_text);
        self.repo
            .update_lead_status(id, status, Utc::now())
            .await?;

        self.repo
            .get_lead(id)
            .await?
            .ok_or_else(|| AgentlinkError::not_found(format!("Lead '{}' not found", id)))
    }

    pub async fn list_by_ref_code(&self, ref_code: &str) -> Result<Vec<Lead>> {
        self.repo.list_leads_by_ref_code(ref_code).await
    }
}
