use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

use crate::errors::{AgentlinkError, Result};

/// UTM 参数，仅透传给统计，不参与归因
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct UtmParams {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl UtmParams {
    pub fn is_empty(&self) -> bool {
        self.utm_source.is_none() && self.utm_medium.is_none() && self.utm_campaign.is_none()
    }
}

/// 一次页面导航中与归因相关的查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    pub ref_code: Option<String>,
    pub campaign_id: Option<String>,
    pub utm: UtmParams,
}

impl NavigationParams {
    /// 解析查询串（可带或不带前导 `?`）
    ///
    /// 空值视为缺失；同名参数出现多次时取第一个。
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = NavigationParams::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "ref" => &mut params.ref_code,
                "cid" => &mut params.campaign_id,
                "utm_source" => &mut params.utm.utm_source,
                "utm_medium" => &mut params.utm.utm_medium,
                "utm_campaign" => &mut params.utm.utm_campaign,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        params
    }

    /// 解析完整 URL 或站内相对路径（如 `/join?ref=AGT-1`）
    pub fn from_url(raw: &str) -> Result<Self> {
        let parsed = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
                .and_then(|base| base.join(raw))
                .map_err(|e| AgentlinkError::validation(format!("Invalid URL '{}': {}", raw, e)))?,
            Err(e) => {
                return Err(AgentlinkError::validation(format!(
                    "Invalid URL '{}': {}",
                    raw, e
                )));
            }
        };

        Ok(Self::from_query(parsed.query().unwrap_or("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_with_ref_and_cid() {
        let params =
            NavigationParams::from_url("https://example.com/join?ref=AGT-123&cid=SPRING").unwrap();
        assert_eq!(params.ref_code.as_deref(), Some("AGT-123"));
        assert_eq!(params.campaign_id.as_deref(), Some("SPRING"));
        assert!(params.utm.is_empty());
    }

    #[test]
    fn test_relative_url_and_utm() {
        let params = NavigationParams::from_url(
            "/?ref=AGT-1&utm_source=tiktok&utm_medium=video&utm_campaign=launch",
        )
        .unwrap();
        assert_eq!(params.ref_code.as_deref(), Some("AGT-1"));
        assert_eq!(params.utm.utm_source.as_deref(), Some("tiktok"));
        assert_eq!(params.utm.utm_medium.as_deref(), Some("video"));
        assert_eq!(params.utm.utm_campaign.as_deref(), Some("launch"));
    }

    #[test]
    fn test_empty_and_missing_values() {
        let params = NavigationParams::from_query("?ref=&cid=X");
        assert!(params.ref_code.is_none());
        assert_eq!(params.campaign_id.as_deref(), Some("X"));

        assert_eq!(NavigationParams::from_query(""), NavigationParams::default());
    }

    #[test]
    fn test_percent_decoding_and_case_sensitivity() {
        let params = NavigationParams::from_query("ref=Agt%2D7&ref=other");
        assert_eq!(params.ref_code.as_deref(), Some("Agt-7"));
    }
}
