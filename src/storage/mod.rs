use std::sync::Arc;

use tracing::info;

use crate::config::{StaticConfig, StorageBackend};
use crate::errors::Result;

pub mod backend;
pub mod document;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use document::{DocumentStorage, DocumentStore, MemoryDocumentStore};
pub use models::{Lead, NewReferralLink, ReferralLink, ReferralLinkPatch};
pub use traits::{LeadRepository, ReferralLinkRepository};

/// 已初始化的存储集合
///
/// 线索始终存放在关系库；推荐链接按 `storage.backend` 二选一。
#[derive(Clone)]
pub struct Storages {
    pub links: Arc<dyn ReferralLinkRepository>,
    pub leads: Arc<dyn LeadRepository>,
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StaticConfig) -> Result<Storages> {
        let relational = Arc::new(SeaOrmStorage::new(&config.database).await?);

        let links: Arc<dyn ReferralLinkRepository> = match config.storage.backend {
            StorageBackend::Relational => relational.clone(),
            StorageBackend::Document => Arc::new(DocumentStorage::in_memory()),
        };

        info!("Referral links stored in {} backend", links.backend_name());
        Ok(Storages {
            links,
            leads: relational,
        })
    }
}
