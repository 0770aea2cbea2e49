//! 推荐码 → 公开代理信息
//!
//! - 内置 Moka 缓存，按 (ref, cid) 精确匹配，TTL 默认 5 分钟
//! - Singleflight：同一 key 的并发调用只发一次请求
//! - 失败不缓存，也不向调用方返回错误

mod http;
mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, trace, warn};

pub use http::HttpAgentLookup;
pub use types::{LookupError, PublicAgentInfo, Tutorial, parse_response};

use crate::config::ResolverConfig;

/// 远端查询抽象
#[async_trait]
pub trait AgentLookup: Send + Sync {
    /// `Ok(None)` 表示推荐码没有对应的代理
    async fn lookup(
        &self,
        ref_code: &str,
        campaign_id: Option<&str>,
    ) -> Result<Option<PublicAgentInfo>, LookupError>;

    /// 用于日志
    fn name(&self) -> &'static str;
}

type CacheKey = (String, Option<String>);

pub struct AgentResolver {
    lookup: Arc<dyn AgentLookup>,
    cache: Cache<CacheKey, Arc<PublicAgentInfo>>,
    max_retries: u32,
}

impl AgentResolver {
    pub fn new(lookup: Arc<dyn AgentLookup>, config: &ResolverConfig) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .max_capacity(config.max_capacity)
            .build();

        debug!(
            "AgentResolver initialized with {} lookup (ttl={}s, retries={})",
            lookup.name(),
            config.cache_ttl_secs,
            config.max_retries
        );

        Self {
            lookup,
            cache,
            max_retries: config.max_retries,
        }
    }

    /// 使用 HTTP 查询
    pub fn from_config(config: &ResolverConfig) -> Self {
        let lookup = HttpAgentLookup::new(&config.endpoint, config.timeout_secs);
        Self::new(Arc::new(lookup), config)
    }

    /// 解析推荐码
    ///
    /// 推荐码缺失或为空时不发请求，直接返回 `None`。
    pub async fn resolve(
        &self,
        ref_code: Option<&str>,
        campaign_id: Option<&str>,
    ) -> Option<Arc<PublicAgentInfo>> {
        let ref_code = ref_code.map(str::trim).filter(|r| !r.is_empty())?;
        let campaign_id = campaign_id.map(str::trim).filter(|c| !c.is_empty());

        let key = (ref_code.to_string(), campaign_id.map(String::from));

        // optionally_get_with: 并发调用共享同一次加载，返回 None 时不写入缓存
        self.cache
            .optionally_get_with(key, async {
                trace!("Resolver cache miss for {} / {:?}", ref_code, campaign_id);
                self.fetch(ref_code, campaign_id).await.map(Arc::new)
            })
            .await
    }

    async fn fetch(&self, ref_code: &str, campaign_id: Option<&str>) -> Option<PublicAgentInfo> {
        let mut attempt = 0;
        loop {
            match self.lookup.lookup(ref_code, campaign_id).await {
                Ok(Some(info)) => return Some(info),
                Ok(None) => {
                    debug!("No agent found for referral code {}", ref_code);
                    return None;
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Agent lookup for {} failed ({}), retrying ({}/{})",
                        ref_code, e, attempt, self.max_retries
                    );
                }
                Err(e) => {
                    warn!("Agent lookup for {} failed: {}", ref_code, e);
                    return None;
                }
            }
        }
    }

    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }

    /// 运行缓存的挂起任务（测试和统计前调用）
    pub async fn sync_cache(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    /// 按预设顺序返回结果并计数的查询
    struct ScriptedLookup {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<Option<PublicAgentInfo>, LookupError>>>,
        delay: Duration,
    }

    impl ScriptedLookup {
        fn new(script: Vec<Result<Option<PublicAgentInfo>, LookupError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script.into()),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AgentLookup for ScriptedLookup {
        async fn lookup(
            &self,
            _ref_code: &str,
            _campaign_id: Option<&str>,
        ) -> Result<Option<PublicAgentInfo>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(Some(agent("fallback"))))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn agent(name: &str) -> PublicAgentInfo {
        PublicAgentInfo {
            display_name: name.to_string(),
            contact_label: "Telegram".to_string(),
            contact_channel: "@agent".to_string(),
            message_template: None,
            tutorials: vec![],
        }
    }

    fn resolver(lookup: Arc<ScriptedLookup>) -> AgentResolver {
        AgentResolver::new(lookup, &ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_missing_ref_makes_no_request() {
        let lookup = Arc::new(ScriptedLookup::new(vec![]));
        let resolver = resolver(lookup.clone());

        assert!(resolver.resolve(None, Some("C")).await.is_none());
        assert!(resolver.resolve(Some("  "), None).await.is_none());
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_second_call_hits_cache() {
        let lookup = Arc::new(ScriptedLookup::new(vec![Ok(Some(agent("Ana")))]));
        let resolver = resolver(lookup.clone());

        let first = resolver.resolve(Some("AGT-1"), Some("C")).await.unwrap();
        let second = resolver.resolve(Some("AGT-1"), Some("C")).await.unwrap();

        assert_eq!(lookup.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_keys_include_campaign() {
        let lookup = Arc::new(ScriptedLookup::new(vec![]));
        let resolver = resolver(lookup.clone());

        resolver.resolve(Some("AGT-1"), None).await;
        resolver.resolve(Some("AGT-1"), Some("C")).await;
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_deduplicated() {
        let lookup = Arc::new(
            ScriptedLookup::new(vec![Ok(Some(agent("Ana")))])
                .with_delay(Duration::from_millis(100)),
        );
        let resolver = Arc::new(resolver(lookup.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move { resolver.resolve(Some("AGT-1"), None).await })
            })
            .collect();

        for handle in handles {
            let info = handle.await.unwrap().unwrap();
            assert_eq!(info.display_name, "Ana");
        }
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let lookup = Arc::new(ScriptedLookup::new(vec![
            Err(LookupError::Status(503)),
            Ok(Some(agent("Ana"))),
        ]));
        let resolver = resolver(lookup.clone());

        let info = resolver.resolve(Some("AGT-1"), None).await;
        assert_eq!(info.unwrap().display_name, "Ana");
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test]
    async fn test_two_transient_failures_give_none_and_are_not_cached() {
        let lookup = Arc::new(ScriptedLookup::new(vec![
            Err(LookupError::Transport("reset".into())),
            Err(LookupError::Status(502)),
            Ok(Some(agent("Later"))),
        ]));
        let resolver = resolver(lookup.clone());

        assert!(resolver.resolve(Some("AGT-1"), None).await.is_none());
        assert_eq!(lookup.calls(), 2);

        let retry = resolver.resolve(Some("AGT-1"), None).await;
        assert_eq!(retry.unwrap().display_name, "Later");
        assert_eq!(lookup.calls(), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let lookup = Arc::new(ScriptedLookup::new(vec![
            Err(LookupError::Status(404)),
            Err(LookupError::Schema("bad".into())),
        ]));
        let resolver = resolver(lookup.clone());

        assert!(resolver.resolve(Some("A"), None).await.is_none());
        assert_eq!(lookup.calls(), 1);
        assert!(resolver.resolve(Some("A"), None).await.is_none());
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_agent_is_not_cached() {
        let lookup = Arc::new(ScriptedLookup::new(vec![Ok(None)]));
        let resolver = resolver(lookup.clone());

        assert!(resolver.resolve(Some("NOPE"), None).await.is_none());
        resolver.sync_cache().await;
        assert_eq!(resolver.cached_entries(), 0);
    }
}
