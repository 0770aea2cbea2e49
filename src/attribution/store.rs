use std::collections::HashMap;

use parking_lot::RwLock;

/// 会话存储中的推荐码键
pub const REF_CODE_KEY: &str = "agentlink.ref_code";
/// 会话存储中的活动 ID 键
pub const CAMPAIGN_ID_KEY: &str = "agentlink.campaign_id";

/// 浏览会话范围内的键值存储
///
/// 读写均为同步操作，后写者覆盖先写者。
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 内存实现，生命周期即一个会话
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins() {
        let store = MemorySessionStore::new();
        assert!(store.get(REF_CODE_KEY).is_none());

        store.set(REF_CODE_KEY, "AGT-1");
        store.set(REF_CODE_KEY, "AGT-2");
        assert_eq!(store.get(REF_CODE_KEY).as_deref(), Some("AGT-2"));

        store.remove(REF_CODE_KEY);
        assert!(store.get(REF_CODE_KEY).is_none());
    }
}
