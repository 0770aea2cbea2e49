use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};
use ts_rs::TS;

/// P2P 交易经验等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumIter, AsRefStr)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum P2pExperience {
    None,
    Basic,
    Medium,
    Advanced,
}

/// 每日可投入时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumIter, AsRefStr)]
#[ts(export, export_to = "agentlink.generated.ts")]
pub enum DailyHours {
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
    #[serde(rename = "1-2")]
    #[strum(serialize = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    #[strum(serialize = "3-5")]
    ThreeToFive,
    #[serde(rename = "6+")]
    #[strum(serialize = "6+")]
    SixPlus,
}

/// 代理申请问卷
///
/// 所有字段都可以缺失，缺失按"否/最低档"计 0 分。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct AgentAnswers {
    #[serde(default)]
    pub has_verified_account: Option<bool>,
    #[serde(default)]
    pub p2p_experience: Option<P2pExperience>,
    #[serde(default)]
    pub daily_hours: Option<DailyHours>,
    #[serde(default)]
    pub has_sufficient_capital: Option<bool>,
    #[serde(default)]
    pub has_casino_experience: Option<bool>,
    #[serde(default)]
    pub has_support_experience: Option<bool>,
    #[serde(default)]
    pub willing_to_start: Option<bool>,
}

/// 评分标签（按优先级从高到低）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeadLabel {
    Customer,
    LowPotentialAgent,
    MediumPotentialAgent,
    HighPotentialAgent,
}

impl LeadLabel {
    /// `customer` 是非代理线索，其余都是代理候选人
    pub fn is_agent(&self) -> bool {
        !matches!(self, LeadLabel::Customer)
    }
}

impl std::fmt::Display for LeadLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for LeadLabel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high_potential_agent" => Ok(Self::HighPotentialAgent),
            "medium_potential_agent" => Ok(Self::MediumPotentialAgent),
            "low_potential_agent" => Ok(Self::LowPotentialAgent),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("Invalid lead label: '{}'", s)),
        }
    }
}

/// 各题得分明细
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub verified_account: u32,
    pub p2p_experience: u32,
    pub daily_hours: u32,
    pub sufficient_capital: u32,
    pub casino_experience: u32,
    pub support_experience: u32,
    pub willing_to_start: u32,
}

impl ScoreBreakdown {
    /// Sum of all parts, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        [
            self.p2p_experience,
            self.daily_hours,
            self.sufficient_capital,
            self.casino_experience,
            self.support_experience,
            self.willing_to_start,
        ]
        .into_iter()
        .fold(self.verified_account, u32::saturating_add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub score: u32,
    pub label: LeadLabel,
    pub breakdown: ScoreBreakdown,
}
