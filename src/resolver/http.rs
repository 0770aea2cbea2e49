//! 基于 ureq 的远端查询
//!
//! ureq 是同步客户端，请求放在 `spawn_blocking` 中执行。

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;
use ureq::Agent;

use super::types::{LookupError, PublicAgentInfo, parse_response};
use super::AgentLookup;

pub struct HttpAgentLookup {
    endpoint: String,
    agent: Agent,
}

impl HttpAgentLookup {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();

        Self {
            endpoint: endpoint.to_string(),
            agent,
        }
    }

    fn build_url(&self, ref_code: &str, campaign_id: Option<&str>) -> String {
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}ref={}",
            self.endpoint,
            sep,
            urlencoding::encode(ref_code)
        );
        if let Some(cid) = campaign_id {
            url.push_str("&cid=");
            url.push_str(&urlencoding::encode(cid));
        }
        url
    }

    fn fetch_sync(agent: Agent, url: String) -> Result<Option<PublicAgentInfo>, LookupError> {
        let resp = agent.get(&url).call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => LookupError::Status(code),
            other => LookupError::Transport(other.to_string()),
        })?;

        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        trace!("Resolver response from {}: {} bytes", url, body.len());
        parse_response(&body)
    }
}

#[async_trait]
impl AgentLookup for HttpAgentLookup {
    async fn lookup(
        &self,
        ref_code: &str,
        campaign_id: Option<&str>,
    ) -> Result<Option<PublicAgentInfo>, LookupError> {
        let url = self.build_url(ref_code, campaign_id);
        let agent = self.agent.clone();

        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .map_err(|e| LookupError::Transport(format!("blocking task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    /// 单次应答的本地 HTTP 服务，返回监听地址
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{}/resolve-agent", addr)
    }

    #[test]
    fn test_build_url_encodes_params() {
        let lookup = HttpAgentLookup::new("http://localhost/resolve", 1);
        assert_eq!(
            lookup.build_url("AGT 1", Some("a&b")),
            "http://localhost/resolve?ref=AGT%201&cid=a%26b"
        );
        assert_eq!(
            lookup.build_url("AGT-1", None),
            "http://localhost/resolve?ref=AGT-1"
        );

        let with_query = HttpAgentLookup::new("http://localhost/resolve?v=2", 1);
        assert_eq!(
            with_query.build_url("X", None),
            "http://localhost/resolve?v=2&ref=X"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"agentInfo":{"displayName":"Ana","contactLabel":"Telegram","contactChannel":"@ana"}}"#,
        );
        let lookup = HttpAgentLookup::new(&endpoint, 5);

        let info = lookup.lookup("AGT-1", None).await.unwrap().unwrap();
        assert_eq!(info.display_name, "Ana");
        assert_eq!(info.contact_channel, "@ana");
    }

    #[tokio::test]
    async fn test_lookup_server_error_status() {
        let endpoint = serve_once("503 Service Unavailable", "{}");
        let lookup = HttpAgentLookup::new(&endpoint, 5);

        let err = lookup.lookup("AGT-1", None).await.unwrap_err();
        assert_eq!(err, LookupError::Status(503));
    }

    #[tokio::test]
    async fn test_lookup_connection_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let lookup = HttpAgentLookup::new(&format!("http://{}/x", addr), 2);

        let err = lookup.lookup("AGT-1", None).await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
