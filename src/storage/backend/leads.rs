//! Lead operations for SeaOrmStorage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr};
use tracing::info;

use super::converters::{lead_to_active_model, model_to_lead, status_column};
use super::{SeaOrmStorage, retry};
use crate::errors::{AgentlinkError, Result};
use crate::leads::LeadStatus;
use crate::storage::models::Lead;
use crate::storage::traits::LeadRepository;

use migration::entities::lead;

#[async_trait]
impl LeadRepository for SeaOrmStorage {
    async fn insert_lead(&self, record: &Lead) -> Result<()> {
        let db = &self.db;
        let active_model = lead_to_active_model(record);

        retry::with_retry(
            &format!("insert_lead({})", record.id),
            self.retry_config,
            || {
                let am = active_model.clone();
                async move { lead::Entity::insert(am).exec_without_returning(db).await }
            },
        )
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("保存线索失败: {}", e)))?;

        info!(
            "Lead stored: {} (ref: {:?}, label: {})",
            record.id, record.ref_code, record.label
        );
        Ok(())
    }

    async fn get_lead(&self, id: &str) -> Result<Option<Lead>> {
        let db = &self.db;
        let id_owned = id.to_string();

        let model = retry::with_retry(&format!("get_lead({})", id), self.retry_config, || async {
            lead::Entity::find_by_id(id_owned.as_str()).one(db).await
        })
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("查询线索失败: {}", e)))?;

        Ok(model.map(model_to_lead))
    }

    async fn update_lead_status(
        &self,
        id: &str,
        status: LeadStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let db = &self.db;
        let id_owned = id.to_string();
        let status_text = status_column(status);

        let result = retry::with_retry(
            &format!("update_lead_status({})", id),
            self.retry_config,
            || async {
                lead::Entity::update_many()
                    .col_expr(lead::Column::Status, Expr::value(status_text.clone()))
                    .col_expr(lead::Column::UpdatedAt, Expr::value(updated_at))
                    .filter(lead::Column::Id.eq(id_owned.as_str()))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("更新线索状态失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AgentlinkError::not_found(format!("线索不存在: {}", id)));
        }

        info!("Lead {} moved to {}", id, status);
        Ok(())
    }

    async fn list_leads_by_ref_code(&self, ref_code: &str) -> Result<Vec<Lead>> {
        let db = &self.db;
        let ref_owned = ref_code.to_string();

        let models = retry::with_retry(
            &format!("list_leads_by_ref_code({})", ref_code),
            self.retry_config,
            || async {
                lead::Entity::find()
                    .filter(lead::Column::RefCode.eq(ref_owned.as_str()))
                    .order_by_desc(lead::Column::CreatedAt)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| AgentlinkError::database_operation(format!("查询线索失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_lead).collect())
    }
}
