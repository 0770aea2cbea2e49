use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::trace;

use super::tracker::AttributionTracker;
use crate::config::SessionConfig;

/// 服务端的浏览会话表
///
/// 每个会话（cookie）对应一个独立的 [`AttributionTracker`]，空闲超时后整体丢弃，
/// 归因数据不会跨会话保留。
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<String, Arc<AttributionTracker>>,
}

impl SessionRegistry {
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.idle_timeout_secs))
            .build();

        trace!(
            "SessionRegistry initialized: max_sessions={}, idle_timeout={}s",
            config.max_sessions, config.idle_timeout_secs
        );
        Self { sessions }
    }

    pub fn new_session_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// 获取会话的 tracker，不存在时创建
    pub fn tracker(&self, session_id: &str) -> Arc<AttributionTracker> {
        self.sessions
            .get_with(session_id.to_string(), || Arc::new(AttributionTracker::in_memory()))
    }

    /// 只读获取，不创建新会话
    pub fn existing(&self, session_id: &str) -> Option<Arc<AttributionTracker>> {
        self.sessions.get(session_id)
    }

    pub fn end_session(&self, session_id: &str) {
        self.sessions.invalidate(session_id);
    }
}
