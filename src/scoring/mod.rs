//! Lead scoring
//!
//! Maps the agent questionnaire to a numeric score and a priority label.

mod config;
mod engine;
mod model;

pub use config::{ScoreThresholds, ScoringConfig, ScoringWeights};
pub use engine::{ScoringEngine, calculate_score};
pub use model::{AgentAnswers, DailyHours, LeadLabel, P2pExperience, ScoreBreakdown, ScoringResult};
