use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;
use ts_rs::TS;

use super::params::NavigationParams;
use super::store::{CAMPAIGN_ID_KEY, MemorySessionStore, REF_CODE_KEY, SessionStore};
use crate::errors::Result;

/// 绑定到当前会话的归因信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "agentlink.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct SessionAttribution {
    pub ref_code: String,
    pub campaign_id: Option<String>,
}

/// 推荐码捕获与读取
///
/// 每次导航调用 [`capture`](Self::capture)：
/// - 带 `ref`：覆盖会话中已有的归因（`cid` 缺失时活动 ID 一并移除），并通知观察者
/// - 不带 `ref`：沿用会话中已有的值
pub struct AttributionTracker {
    store: Arc<dyn SessionStore>,
    observers: watch::Sender<Option<SessionAttribution>>,
}

impl AttributionTracker {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let current = read_attribution(store.as_ref());
        let (observers, _) = watch::channel(current);
        Self { store, observers }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// 处理一次导航，返回捕获后的当前归因
    pub fn capture(&self, params: &NavigationParams) -> Option<SessionAttribution> {
        let Some(ref_code) = params.ref_code.as_deref() else {
            return self.attribution();
        };

        self.store.set(REF_CODE_KEY, ref_code);
        match params.campaign_id.as_deref() {
            Some(cid) => self.store.set(CAMPAIGN_ID_KEY, cid),
            None => self.store.remove(CAMPAIGN_ID_KEY),
        }

        let attribution = SessionAttribution {
            ref_code: ref_code.to_string(),
            campaign_id: params.campaign_id.clone(),
        };
        debug!(
            "Captured referral {} (campaign: {:?})",
            attribution.ref_code, attribution.campaign_id
        );
        self.observers.send_replace(Some(attribution.clone()));
        Some(attribution)
    }

    pub fn capture_query(&self, query: &str) -> Option<SessionAttribution> {
        self.capture(&NavigationParams::from_query(query))
    }

    /// 从完整 URL 捕获
    pub fn capture_url(&self, url: &str) -> Result<Option<SessionAttribution>> {
        let params = NavigationParams::from_url(url)?;
        Ok(self.capture(&params))
    }

    pub fn ref_code(&self) -> Option<String> {
        self.store.get(REF_CODE_KEY)
    }

    pub fn campaign_id(&self) -> Option<String> {
        self.store.get(CAMPAIGN_ID_KEY)
    }

    pub fn attribution(&self) -> Option<SessionAttribution> {
        read_attribution(self.store.as_ref())
    }

    /// 转化或登出时清除，两个键总是一起移除
    pub fn clear(&self) {
        self.store.remove(REF_CODE_KEY);
        self.store.remove(CAMPAIGN_ID_KEY);
        self.observers.send_replace(None);
        debug!("Referral attribution cleared");
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionAttribution>> {
        self.observers.subscribe()
    }
}

fn read_attribution(store: &dyn SessionStore) -> Option<SessionAttribution> {
    store.get(REF_CODE_KEY).map(|ref_code| SessionAttribution {
        ref_code,
        campaign_id: store.get(CAMPAIGN_ID_KEY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_then_clear() {
        let tracker = AttributionTracker::in_memory();
        tracker
            .capture_url("https://example.com/?ref=AGT-123&cid=SPRING")
            .unwrap();

        assert_eq!(tracker.ref_code().as_deref(), Some("AGT-123"));
        assert_eq!(tracker.campaign_id().as_deref(), Some("SPRING"));

        tracker.clear();
        assert!(tracker.ref_code().is_none());
        assert!(tracker.campaign_id().is_none());
    }

    #[test]
    fn test_visit_without_ref_keeps_stored_value() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(REF_CODE_KEY, "AGT-999");

        let tracker = AttributionTracker::new(store);
        let current = tracker.capture_url("https://example.com/tutorials").unwrap();

        assert_eq!(tracker.ref_code().as_deref(), Some("AGT-999"));
        assert_eq!(current.map(|a| a.ref_code).as_deref(), Some("AGT-999"));
    }

    #[test]
    fn test_newest_ref_wins_and_replaces_campaign() {
        let tracker = AttributionTracker::in_memory();
        tracker.capture_url("/?ref=AGT-1&cid=OLD").unwrap();
        tracker.capture_url("/?ref=AGT-2").unwrap();

        assert_eq!(tracker.ref_code().as_deref(), Some("AGT-2"));
        assert!(tracker.campaign_id().is_none());
    }

    #[test]
    fn test_cid_without_ref_is_ignored() {
        let tracker = AttributionTracker::in_memory();
        tracker.capture_url("/?cid=ORPHAN").unwrap();
        assert!(tracker.attribution().is_none());
    }

    #[test]
    fn test_observers_are_notified() {
        let tracker = AttributionTracker::in_memory();
        let mut rx = tracker.subscribe();
        assert!(rx.borrow_and_update().is_none());

        tracker.capture_url("/?ref=AGT-5&cid=C").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().clone(),
            Some(SessionAttribution {
                ref_code: "AGT-5".to_string(),
                campaign_id: Some("C".to_string()),
            })
        );

        tracker.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_observer_starts_with_stored_value() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(REF_CODE_KEY, "AGT-9");
        let tracker = AttributionTracker::new(store);
        assert_eq!(
            tracker.subscribe().borrow().as_ref().map(|a| a.ref_code.clone()),
            Some("AGT-9".to_string())
        );
    }
}
