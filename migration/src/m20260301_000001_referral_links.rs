use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 referral_links 表
        manager
            .create_table(
                Table::create()
                    .table(ReferralLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReferralLink::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReferralLink::AgentId).string().not_null())
                    .col(ColumnDef::new(ReferralLink::Name).string().not_null())
                    .col(ColumnDef::new(ReferralLink::Country).string().null())
                    .col(ColumnDef::new(ReferralLink::Contact).string().null())
                    .col(ColumnDef::new(ReferralLink::Label).string().null())
                    .col(ColumnDef::new(ReferralLink::Message).text().null())
                    .col(
                        ColumnDef::new(ReferralLink::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ReferralLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReferralLink::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按代理列出链接（新 → 旧）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_referral_links_agent_created")
                    .table(ReferralLink::Table)
                    .col(ReferralLink::AgentId)
                    .col(ReferralLink::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_referral_links_agent_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ReferralLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReferralLink {
    #[sea_orm(iden = "referral_links")]
    Table,
    Id,
    AgentId,
    Name,
    Country,
    Contact,
    Label,
    Message,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
