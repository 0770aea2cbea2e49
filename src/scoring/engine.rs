use super::config::ScoringConfig;
use super::model::{AgentAnswers, DailyHours, LeadLabel, P2pExperience, ScoreBreakdown, ScoringResult};

/// 问卷评分引擎
///
/// 纯函数，无副作用；缺失的回答计 0 分，永不失败。
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, answers: &AgentAnswers) -> ScoringResult {
        let breakdown = self.breakdown(answers);
        let score = breakdown.total();
        ScoringResult {
            score,
            label: self.label_for(score),
            breakdown,
        }
    }

    /// 根据总分确定标签，阈值为闭区间下界，从高到低判断
    pub fn label_for(&self, score: u32) -> LeadLabel {
        let t = &self.config.thresholds;
        if score >= t.high {
            LeadLabel::HighPotentialAgent
        } else if score >= t.medium {
            LeadLabel::MediumPotentialAgent
        } else if score >= t.low {
            LeadLabel::LowPotentialAgent
        } else {
            LeadLabel::Customer
        }
    }

    fn breakdown(&self, answers: &AgentAnswers) -> ScoreBreakdown {
        let w = &self.config.weights;
        let yes = |answer: Option<bool>, points: u32| if answer == Some(true) { points } else { 0 };

        let p2p_experience = match answers.p2p_experience {
            Some(P2pExperience::Basic) => w.p2p_basic,
            Some(P2pExperience::Medium) => w.p2p_medium,
            Some(P2pExperience::Advanced) => w.p2p_advanced,
            Some(P2pExperience::None) | None => 0,
        };

        let daily_hours = match answers.daily_hours {
            Some(DailyHours::OneToTwo) => w.hours_1_2,
            Some(DailyHours::ThreeToFive) => w.hours_3_5,
            Some(DailyHours::SixPlus) => w.hours_6_plus,
            Some(DailyHours::None) | None => 0,
        };

        ScoreBreakdown {
            verified_account: yes(answers.has_verified_account, w.verified_account),
            p2p_experience,
            daily_hours,
            sufficient_capital: yes(answers.has_sufficient_capital, w.sufficient_capital),
            casino_experience: yes(answers.has_casino_experience, w.casino_experience),
            support_experience: yes(answers.has_support_experience, w.support_experience),
            willing_to_start: yes(answers.willing_to_start, w.willing_to_start),
        }
    }
}

/// 使用默认权重与阈值评分
pub fn calculate_score(answers: &AgentAnswers) -> ScoringResult {
    ScoringEngine::default().score(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::ScoreThresholds;
    use strum::IntoEnumIterator;

    fn full_answers() -> AgentAnswers {
        AgentAnswers {
            has_verified_account: Some(true),
            p2p_experience: Some(P2pExperience::Advanced),
            daily_hours: Some(DailyHours::SixPlus),
            has_sufficient_capital: Some(true),
            has_casino_experience: Some(true),
            has_support_experience: Some(true),
            willing_to_start: Some(true),
        }
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let result = calculate_score(&AgentAnswers::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.label, LeadLabel::Customer);
        assert_eq!(result.breakdown, ScoreBreakdown::default());
    }

    #[test]
    fn test_full_answers_score_max() {
        let result = calculate_score(&full_answers());
        assert_eq!(result.score, 110);
        assert_eq!(result.label, LeadLabel::HighPotentialAgent);
    }

    #[test]
    fn test_breakdown_sums_to_score_for_all_combinations() {
        let bools = [None, Some(false), Some(true)];
        let p2p: Vec<Option<P2pExperience>> = std::iter::once(None)
            .chain(P2pExperience::iter().map(Some))
            .collect();
        let hours: Vec<Option<DailyHours>> = std::iter::once(None)
            .chain(DailyHours::iter().map(Some))
            .collect();

        let engine = ScoringEngine::default();
        for verified in bools {
            for capital in bools {
                for willing in bools {
                    for p in &p2p {
                        for h in &hours {
                            let answers = AgentAnswers {
                                has_verified_account: verified,
                                p2p_experience: *p,
                                daily_hours: *h,
                                has_sufficient_capital: capital,
                                has_casino_experience: verified,
                                has_support_experience: capital,
                                willing_to_start: willing,
                            };
                            let first = engine.score(&answers);
                            let second = engine.score(&answers);
                            assert_eq!(first, second);
                            assert_eq!(first.breakdown.total(), first.score);
                            assert!(first.score <= 110);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_threshold_boundaries_select_higher_tier() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.label_for(80), LeadLabel::HighPotentialAgent);
        assert_eq!(engine.label_for(79), LeadLabel::MediumPotentialAgent);
        assert_eq!(engine.label_for(60), LeadLabel::MediumPotentialAgent);
        assert_eq!(engine.label_for(59), LeadLabel::LowPotentialAgent);
        assert_eq!(engine.label_for(40), LeadLabel::LowPotentialAgent);
        assert_eq!(engine.label_for(39), LeadLabel::Customer);
        assert_eq!(engine.label_for(0), LeadLabel::Customer);
    }

    #[test]
    fn test_exact_boundary_answers() {
        // 30 + 20 + 10 + 10 + 5 + 5 = 80
        let answers = AgentAnswers {
            has_verified_account: Some(true),
            p2p_experience: Some(P2pExperience::Basic),
            daily_hours: Some(DailyHours::OneToTwo),
            has_sufficient_capital: Some(true),
            has_casino_experience: Some(true),
            has_support_experience: Some(true),
            willing_to_start: None,
        };
        let result = calculate_score(&answers);
        assert_eq!(result.score, 80);
        assert_eq!(result.label, LeadLabel::HighPotentialAgent);

        // 30 + 10 = 40
        let answers = AgentAnswers {
            has_verified_account: Some(true),
            has_casino_experience: Some(true),
            ..Default::default()
        };
        let result = calculate_score(&answers);
        assert_eq!(result.score, 40);
        assert_eq!(result.label, LeadLabel::LowPotentialAgent);
    }

    #[test]
    fn test_none_options_score_zero() {
        let answers = AgentAnswers {
            p2p_experience: Some(P2pExperience::None),
            daily_hours: Some(DailyHours::None),
            has_verified_account: Some(false),
            ..Default::default()
        };
        assert_eq!(calculate_score(&answers).score, 0);
    }

    #[test]
    fn test_injected_config() {
        let mut config = ScoringConfig::default();
        config.weights.willing_to_start = 50;
        config.thresholds = ScoreThresholds {
            high: 50,
            medium: 30,
            low: 10,
        };
        let engine = ScoringEngine::new(config);
        let answers = AgentAnswers {
            willing_to_start: Some(true),
            ..Default::default()
        };
        let result = engine.score(&answers);
        assert_eq!(result.score, 50);
        assert_eq!(result.label, LeadLabel::HighPotentialAgent);
    }

    #[test]
    fn test_partial_json_answers() {
        let answers: AgentAnswers =
            serde_json::from_str(r#"{"hasVerifiedAccount":true,"dailyHours":"3-5"}"#).unwrap();
        let result = calculate_score(&answers);
        assert_eq!(result.breakdown.verified_account, 30);
        assert_eq!(result.breakdown.daily_hours, 10);
        assert_eq!(result.score, 40);

        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["label"], "low_potential_agent");
    }
}
