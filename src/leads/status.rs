//! 线索状态词表映射
//!
//! 关系库使用大写枚举（`NEW`），文档库与前端使用小写字符串（`new`）。
//! 映射是全函数：无法识别的输入一律落到 `NEW`。

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Negotiating,
    Converted,
    Lost,
    Archived,
}

impl LeadStatus {
    pub fn all() -> impl Iterator<Item = LeadStatus> {
        LeadStatus::iter()
    }

    /// 终态：已转化、已流失、已归档
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            LeadStatus::Converted | LeadStatus::Lost | LeadStatus::Archived
        )
    }
}

/// 小写外部词表 → 状态枚举
///
/// 输入会先去除首尾空白并忽略大小写；`None` 与未知值返回 `LeadStatus::New`。
pub fn map_lead_status(external: Option<&str>) -> LeadStatus {
    let Some(raw) = external else {
        return LeadStatus::New;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "new" => LeadStatus::New,
        "contacted" => LeadStatus::Contacted,
        "qualified" => LeadStatus::Qualified,
        "negotiating" => LeadStatus::Negotiating,
        "converted" => LeadStatus::Converted,
        "lost" => LeadStatus::Lost,
        "archived" => LeadStatus::Archived,
        other => {
            tracing::debug!("Unknown lead status '{}', defaulting to new", other);
            LeadStatus::New
        }
    }
}

/// 状态枚举 → 小写外部词表
pub fn display_lead_status(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "new",
        LeadStatus::Contacted => "contacted",
        LeadStatus::Qualified => "qualified",
        LeadStatus::Negotiating => "negotiating",
        LeadStatus::Converted => "converted",
        LeadStatus::Lost => "lost",
        LeadStatus::Archived => "archived",
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 严格解析大写形式，用于配置与 CLI；宽松映射请用 `map_lead_status`
impl std::str::FromStr for LeadStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::iter()
            .find(|status| status.as_ref() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid lead status: '{}'. Valid: NEW, CONTACTED, QUALIFIED, NEGOTIATING, CONVERTED, LOST, ARCHIVED",
                    s
                )
            })
    }
}
