use std::io::Read;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::{AgentlinkError, Result};
use crate::leads::{display_lead_status, map_lead_status};
use crate::scoring::{AgentAnswers, ScoringConfig, ScoringEngine, ScoringResult};

/// Score answers from a JSON file, or stdin when no file is given
pub fn score_answers(file: Option<&str>, config: &ScoringConfig) -> Result<ScoringResult> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            AgentlinkError::file_operation(format!("Failed to read {}: {}", path, e))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let answers: AgentAnswers = serde_json::from_str(&raw)?;
    Ok(ScoringEngine::new(config.clone()).score(&answers))
}

/// Write a sample config to `output`, or return it for printing
pub fn generate_config(output: Option<&str>) -> Result<Option<String>> {
    match output {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(path)
                .map_err(|e| AgentlinkError::file_operation(format!("{}: {}", path, e)))?;
            println!("{} {}", "Configuration written to".green(), path.bold());
            Ok(None)
        }
        None => Ok(Some(StaticConfig::generate_sample_config())),
    }
}

/// `(status, lower-case form)` for an external status string
pub fn status_map(text: &str) -> (String, &'static str) {
    let status = map_lead_status(Some(text));
    (status.to_string(), display_lead_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_score_answers_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"hasVerifiedAccount": true, "dailyHours": "6+", "hasSufficientCapital": true, "hasCasinoExperience": true}}"#
        )
        .unwrap();

        let result =
            score_answers(file.path().to_str(), &ScoringConfig::default()).unwrap();
        assert_eq!(result.score, 80);
        assert_eq!(result.label.to_string(), "high_potential_agent");
    }

    #[test]
    fn test_score_answers_missing_file() {
        let err = score_answers(Some("/nonexistent/answers.json"), &ScoringConfig::default())
            .unwrap_err();
        assert!(matches!(err, AgentlinkError::FileOperation(_)));
    }

    #[test]
    fn test_generate_config_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(generate_config(path.to_str()).unwrap().is_none());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[server]"));
        assert!(generate_config(None).unwrap().unwrap().contains("[scoring"));
    }

    #[test]
    fn test_status_map() {
        assert_eq!(status_map(" Contacted "), ("CONTACTED".to_string(), "contacted"));
        assert_eq!(status_map("whatever"), ("NEW".to_string(), "new"));
    }
}
