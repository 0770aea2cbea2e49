use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::trace;

use super::DocumentStore;
use crate::errors::Result;

/// 进程内文档存储
///
/// collection → (id → JSON 文档)。用于测试与单机部署。
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, collection: &str, id: &str, doc: Value) -> Result<()> {
        trace!("put {}/{}", collection, id);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.get(id).map(|doc| doc.value().clone())))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        trace!("delete {}/{}", collection, id);
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.remove(id))
            .is_some())
    }

    async fn find_by_field(&self, collection: &str, field: &str, value: &str) -> Result<Vec<Value>> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| doc.value().get(field).and_then(Value::as_str) == Some(value))
            .map(|doc| doc.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryDocumentStore::new();
        store
            .put("profiles", "a1", json!({"name": "Ana"}))
            .await
            .unwrap();

        let doc = store.get("profiles", "a1").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Ana");
        assert_eq!(store.len("profiles"), 1);

        assert!(store.delete("profiles", "a1").await.unwrap());
        assert!(!store.delete("profiles", "a1").await.unwrap());
        assert!(store.get("profiles", "a1").await.unwrap().is_none());
        assert!(store.is_empty("profiles"));
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = MemoryDocumentStore::new();
        store.put("c", "1", json!({"owner": "x"})).await.unwrap();
        store.put("c", "2", json!({"owner": "y"})).await.unwrap();
        store.put("c", "3", json!({"owner": "x"})).await.unwrap();

        assert_eq!(store.find_by_field("c", "owner", "x").await.unwrap().len(), 2);
        assert!(store.find_by_field("missing", "owner", "x").await.unwrap().is_empty());
    }
}
