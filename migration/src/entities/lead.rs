use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub ref_code: Option<String>,
    pub campaign_id: Option<String>,
    pub contact_name: String,
    pub contact_channel: String,
    /// 问卷原始回答（JSON）
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub score: i32,
    pub label: String,
    /// 小写状态词表（new / contacted / ...）
    pub status: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
