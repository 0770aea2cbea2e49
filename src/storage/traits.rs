use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::leads::LeadStatus;
use crate::storage::models::{Lead, NewReferralLink, ReferralLink, ReferralLinkPatch};

/// 推荐链接持久化接口
///
/// 关系库与文档库各有一个实现，同一时间只有一个是权威来源。
#[async_trait]
pub trait ReferralLinkRepository: Send + Sync {
    /// 按创建时间倒序列出代理名下的链接
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<ReferralLink>>;

    async fn get(&self, id: &str) -> Result<Option<ReferralLink>>;

    /// 插入新链接，由存储层分配 id 与时间戳
    async fn insert(&self, link: NewReferralLink) -> Result<ReferralLink>;

    /// 部分更新；id 不存在时返回 `NotFound`
    async fn update(&self, id: &str, patch: &ReferralLinkPatch) -> Result<ReferralLink>;

    /// 删除；id 不存在不视为错误
    async fn delete(&self, id: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// 线索持久化接口
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn insert_lead(&self, lead: &Lead) -> Result<()>;

    async fn get_lead(&self, id: &str) -> Result<Option<Lead>>;

    /// 更新状态；id 不存在时返回 `NotFound`
    async fn update_lead_status(
        &self,
        id: &str,
        status: LeadStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn list_leads_by_ref_code(&self, ref_code: &str) -> Result<Vec<Lead>>;
}
