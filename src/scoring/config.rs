//! 评分权重与阈值配置
//!
//! 默认值即业务常量，可通过 `[scoring]` 配置段覆盖而无需重新编译。

use serde::{Deserialize, Serialize};

/// 每道题的分值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_verified_account")]
    pub verified_account: u32,
    #[serde(default = "default_p2p_basic")]
    pub p2p_basic: u32,
    #[serde(default = "default_p2p_medium")]
    pub p2p_medium: u32,
    #[serde(default = "default_p2p_advanced")]
    pub p2p_advanced: u32,
    #[serde(default = "default_hours_1_2")]
    pub hours_1_2: u32,
    #[serde(default = "default_hours_3_5")]
    pub hours_3_5: u32,
    #[serde(default = "default_hours_6_plus")]
    pub hours_6_plus: u32,
    #[serde(default = "default_sufficient_capital")]
    pub sufficient_capital: u32,
    #[serde(default = "default_casino_experience")]
    pub casino_experience: u32,
    #[serde(default = "default_support_experience")]
    pub support_experience: u32,
    #[serde(default = "default_willing_to_start")]
    pub willing_to_start: u32,
}

/// 标签阈值（闭区间下界，从高到低判断）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    #[serde(default = "default_high")]
    pub high: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default = "default_low")]
    pub low: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: ScoreThresholds,
}

impl ScoringConfig {
    /// 阈值必须严格递减，满分不得溢出 u32
    pub fn validate(&self) -> Result<(), String> {
        let t = &self.thresholds;
        if !(t.high > t.medium && t.medium > t.low) {
            return Err(format!(
                "thresholds must satisfy high > medium > low, got {} / {} / {}",
                t.high, t.medium, t.low
            ));
        }
        if self.checked_max_score().is_none() {
            return Err("sum of maximum weights overflows u32".to_string());
        }
        Ok(())
    }

    /// 所有题目取最高档时的满分（溢出时饱和）
    pub fn max_score(&self) -> u32 {
        self.checked_max_score().unwrap_or(u32::MAX)
    }

    fn checked_max_score(&self) -> Option<u32> {
        let w = &self.weights;
        [
            w.p2p_basic.max(w.p2p_medium).max(w.p2p_advanced),
            w.hours_1_2.max(w.hours_3_5).max(w.hours_6_plus),
            w.sufficient_capital,
            w.casino_experience,
            w.support_experience,
            w.willing_to_start,
        ]
        .into_iter()
        .try_fold(w.verified_account, u32::checked_add)
    }
}

fn default_verified_account() -> u32 {
    30
}

fn default_p2p_basic() -> u32 {
    5
}

fn default_p2p_medium() -> u32 {
    10
}

fn default_p2p_advanced() -> u32 {
    15
}

fn default_hours_1_2() -> u32 {
    5
}

fn default_hours_3_5() -> u32 {
    10
}

fn default_hours_6_plus() -> u32 {
    20
}

fn default_sufficient_capital() -> u32 {
    20
}

fn default_casino_experience() -> u32 {
    10
}

fn default_support_experience() -> u32 {
    10
}

fn default_willing_to_start() -> u32 {
    5
}

fn default_high() -> u32 {
    80
}

fn default_medium() -> u32 {
    60
}

fn default_low() -> u32 {
    40
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            verified_account: default_verified_account(),
            p2p_basic: default_p2p_basic(),
            p2p_medium: default_p2p_medium(),
            p2p_advanced: default_p2p_advanced(),
            hours_1_2: default_hours_1_2(),
            hours_3_5: default_hours_3_5(),
            hours_6_plus: default_hours_6_plus(),
            sufficient_capital: default_sufficient_capital(),
            casino_experience: default_casino_experience(),
            support_experience: default_support_experience(),
            willing_to_start: default_willing_to_start(),
        }
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
            low: default_low(),
        }
    }
}
