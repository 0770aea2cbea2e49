use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::leads::LeadStatus;
use crate::scoring::{AgentAnswers, LeadLabel};

/// 代理名下的推荐链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct ReferralLink {
    pub id: String,
    pub agent_id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建推荐链接（id 与时间戳由存储层分配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct NewReferralLink {
    pub agent_id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// 推荐链接的部分更新
///
/// - 字段为 `None`：保持原值
/// - 可选字段为 `Some("")`：清空
///
/// `agent_id` 创建后不可修改，因此不在此结构中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct ReferralLinkPatch {
    #[serde(default)]
    pub name: Option<String>,
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

impl ReferralLinkPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// 将补丁应用到已有链接上（文档存储与内存实现共用）
    pub fn apply_to(&self, link: &mut ReferralLink, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            link.name = name.clone();
        }
        apply_optional(&mut link.country, &self.country);
        apply_optional(&mut link.contact, &self.contact);
        apply_optional(&mut link.label, &self.label);
        apply_optional(&mut link.message, &self.message);
        if let Some(active) = self.is_active {
            link.is_active = active;
        }
        link.updated_at = now;
    }
}

/// `Some("")` 表示清空，`Some(v)` 表示替换，`None` 表示保持
pub(crate) fn apply_optional(target: &mut Option<String>, value: &Option<String>) {
    match value.as_deref() {
        Some("") => *target = None,
        Some(v) => *target = Some(v.to_string()),
        None => {}
    }
}

/// 漏斗收集到的线索
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub ref_code: Option<String>,
    pub campaign_id: Option<String>,
    pub contact_name: String,
    pub contact_channel: String,
    pub answers: AgentAnswers,
    pub score: u32,
    pub label: LeadLabel,
    pub status: LeadStatus,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
