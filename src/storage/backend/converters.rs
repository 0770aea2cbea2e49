use chrono::{DateTime, Utc};
use tracing::warn;

use crate::leads::{LeadStatus, display_lead_status, map_lead_status};
use crate::scoring::{AgentAnswers, LeadLabel};
use crate::storage::models::{Lead, NewReferralLink, ReferralLink};
use migration::entities::{lead, referral_link};

/// 将 Sea-ORM Model 转换为 ReferralLink
pub fn model_to_referral_link(model: referral_link::Model) -> ReferralLink {
    ReferralLink {
        id: model.id,
        agent_id: model.agent_id,
        name: model.name,
        country: model.country,
        contact: model.contact,
        label: model.label,
        message: model.message,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 新建链接的 ActiveModel，id 与时间戳由调用方（存储层）分配
pub fn new_link_to_active_model(
    link: &NewReferralLink,
    id: &str,
    now: DateTime<Utc>,
) -> referral_link::ActiveModel {
    use sea_orm::ActiveValue::*;

    referral_link::ActiveModel {
        id: Set(id.to_string()),
        agent_id: Set(link.agent_id.clone()),
        name: Set(link.name.clone()),
        country: Set(link.country.clone()),
        contact: Set(link.contact.clone()),
        label: Set(link.label.clone()),
        message: Set(link.message.clone()),
        is_active: Set(link.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// 更新用 ActiveModel：agent_id 与 created_at 不参与更新
pub fn link_to_update_model(link: &ReferralLink) -> referral_link::ActiveModel {
    use sea_orm::ActiveValue::*;

    referral_link::ActiveModel {
        id: Unchanged(link.id.clone()),
        agent_id: NotSet,
        name: Set(link.name.clone()),
        country: Set(link.country.clone()),
        contact: Set(link.contact.clone()),
        label: Set(link.label.clone()),
        message: Set(link.message.clone()),
        is_active: Set(link.is_active),
        created_at: NotSet,
        updated_at: Set(link.updated_at),
    }
}

/// 将 Sea-ORM Model 转换为 Lead
///
/// 库中的状态是小写词表，经 `map_lead_status` 映射，无法识别时为 `NEW`。
pub fn model_to_lead(model: lead::Model) -> Lead {
    let answers: AgentAnswers = serde_json::from_str(&model.answers).unwrap_or_else(|e| {
        warn!("Lead {} has unreadable answers: {}", model.id, e);
        AgentAnswers::default()
    });

    let label = model.label.parse::<LeadLabel>().unwrap_or_else(|e| {
        warn!("Lead {}: {}", model.id, e);
        LeadLabel::Customer
    });

    Lead {
        status: map_lead_status(Some(&model.status)),
        id: model.id,
        ref_code: model.ref_code,
        campaign_id: model.campaign_id,
        contact_name: model.contact_name,
        contact_channel: model.contact_channel,
        answers,
        score: model.score.max(0) as u32,
        label,
        utm_source: model.utm_source,
        utm_medium: model.utm_medium,
        utm_campaign: model.utm_campaign,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn lead_to_active_model(lead: &Lead) -> lead::ActiveModel {
    use sea_orm::ActiveValue::*;

    lead::ActiveModel {
        id: Set(lead.id.clone()),
        ref_code: Set(lead.ref_code.clone()),
        campaign_id: Set(lead.campaign_id.clone()),
        contact_name: Set(lead.contact_name.clone()),
        contact_channel: Set(lead.contact_channel.clone()),
        answers: Set(serde_json::to_string(&lead.answers).unwrap_or_else(|_| "{}".to_string())),
        score: Set(lead.score.min(i32::MAX as u32) as i32),
        label: Set(lead.label.to_string()),
        status: Set(status_column(lead.status)),
        utm_source: Set(lead.utm_source.clone()),
        utm_medium: Set(lead.utm_medium.clone()),
        utm_campaign: Set(lead.utm_campaign.clone()),
        created_at: Set(lead.created_at),
        updated_at: Set(lead.updated_at),
    }
}

/// 状态列的存储形式
pub fn status_column(status: LeadStatus) -> String {
    display_lead_status(status).to_string()
}
