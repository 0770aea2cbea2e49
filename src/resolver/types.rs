//! 解析服务的响应模型
//!
//! 远端返回 `{"agentInfo": {...}}`，先反序列化为宽松的 `Raw*` 结构，
//! 再校验为 [`PublicAgentInfo`]。校验失败一律视为 schema 不匹配。

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 公开的代理信息，展示在落地页上
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct PublicAgentInfo {
    pub display_name: String,
    pub contact_label: String,
    pub contact_channel: String,
    pub message_template: Option<String>,
    pub tutorials: Vec<Tutorial>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

/// 查询失败的分类，决定是否重试
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// 连接失败、超时等
    Transport(String),
    /// 非 2xx 响应
    Status(u16),
    /// 响应体不符合约定格式
    Schema(String),
}

impl LookupError {
    /// 传输错误、5xx 和 429 可重试
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Transport(_) => true,
            LookupError::Status(code) => *code >= 500 || *code == 429,
            LookupError::Schema(_) => false,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(msg) => write!(f, "transport error: {}", msg),
            LookupError::Status(code) => write!(f, "unexpected status {}", code),
            LookupError::Schema(msg) => write!(f, "schema mismatch: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    agent_info: Option<RawAgentInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAgentInfo {
    display_name: Option<String>,
    contact_label: Option<String>,
    contact_channel: Option<String>,
    message_template: Option<String>,
    #[serde(default)]
    tutorials: Vec<RawTutorial>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTutorial {
    id: Option<serde_json::Value>,
    title: Option<String>,
    url: Option<String>,
    thumbnail_url: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String, LookupError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LookupError::Schema(format!("missing {}", field))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawTutorial {
    fn validate(self) -> Option<Tutorial> {
        let title = non_blank(self.title)?;
        let url = non_blank(self.url)?;
        let id = match self.id {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => url.clone(),
        };
        Some(Tutorial {
            id,
            title,
            url,
            thumbnail_url: non_blank(self.thumbnail_url),
        })
    }
}

impl RawAgentInfo {
    fn validate(self) -> Result<PublicAgentInfo, LookupError> {
        Ok(PublicAgentInfo {
            display_name: required("displayName", self.display_name)?,
            contact_label: required("contactLabel", self.contact_label)?,
            contact_channel: required("contactChannel", self.contact_channel)?,
            message_template: non_blank(self.message_template),
            tutorials: self
                .tutorials
                .into_iter()
                .filter_map(RawTutorial::validate)
                .collect(),
        })
    }
}

/// 解析并校验响应体
///
/// `agentInfo` 为 `null` 或缺失时返回 `Ok(None)`（推荐码未对应任何代理）。
pub fn parse_response(body: &str) -> Result<Option<PublicAgentInfo>, LookupError> {
    let response: ResolveResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Schema(e.to_string()))?;

    response.agent_info.map(RawAgentInfo::validate).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "agentInfo": {
                "displayName": "Maria",
                "contactLabel": "WhatsApp",
                "contactChannel": "+5511999999999",
                "messageTemplate": "Hi Maria!",
                "tutorials": [
                    {"id": "t1", "title": "Getting started", "url": "https://x/1", "thumbnailUrl": "https://x/1.png"},
                    {"id": 2, "title": "Payouts", "url": "https://x/2"}
                ]
            }
        }"#;

        let info = parse_response(body).unwrap().unwrap();
        assert_eq!(info.display_name, "Maria");
        assert_eq!(info.message_template.as_deref(), Some("Hi Maria!"));
        assert_eq!(info.tutorials.len(), 2);
        assert_eq!(info.tutorials[1].id, "2");
        assert!(info.tutorials[1].thumbnail_url.is_none());
    }

    #[test]
    fn test_null_agent_info() {
        assert_eq!(parse_response(r#"{"agentInfo": null}"#).unwrap(), None);
        assert_eq!(parse_response("{}").unwrap(), None);
    }

    #[test]
    fn test_blank_required_field_is_schema_error() {
        let body = r#"{"agentInfo": {"displayName": "  ", "contactLabel": "Tg", "contactChannel": "@m"}}"#;
        assert!(matches!(parse_response(body), Err(LookupError::Schema(_))));
    }

    #[test]
    fn test_incomplete_tutorials_are_dropped() {
        let body = r#"{"agentInfo": {
            "displayName": "A", "contactLabel": "Tg", "contactChannel": "@a",
            "tutorials": [{"title": "No url"}, {"url": "https://x"}, {"title": "Ok", "url": "https://ok"}]
        }}"#;
        let info = parse_response(body).unwrap().unwrap();
        assert_eq!(info.tutorials.len(), 1);
        assert_eq!(info.tutorials[0].id, "https://ok");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(LookupError::Schema(_))
        ));
    }

    #[test]
    fn test_transient_classification() {
        assert!(LookupError::Transport("reset".into()).is_transient());
        assert!(LookupError::Status(503).is_transient());
        assert!(LookupError::Status(429).is_transient());
        assert!(!LookupError::Status(404).is_transient());
        assert!(!LookupError::Schema("x".into()).is_transient());
    }
}
