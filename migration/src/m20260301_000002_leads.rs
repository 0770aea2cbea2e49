use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lead::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Lead::RefCode).string().null())
                    .col(ColumnDef::new(Lead::CampaignId).string().null())
                    .col(ColumnDef::new(Lead::ContactName).string().not_null())
                    .col(ColumnDef::new(Lead::ContactChannel).string().not_null())
                    .col(ColumnDef::new(Lead::Answers).text().not_null())
                    .col(ColumnDef::new(Lead::Score).integer().not_null().default(0))
                    .col(ColumnDef::new(Lead::Label).string().not_null())
                    .col(
                        ColumnDef::new(Lead::Status)
                            .string()
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Lead::UtmSource).string().null())
                    .col(ColumnDef::new(Lead::UtmMedium).string().null())
                    .col(ColumnDef::new(Lead::UtmCampaign).string().null())
                    .col(
                        ColumnDef::new(Lead::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lead::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按推荐码查询线索
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_ref_code")
                    .table(Lead::Table)
                    .col(Lead::RefCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_ref_code").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lead {
    #[sea_orm(iden = "leads")]
    Table,
    Id,
    RefCode,
    CampaignId,
    ContactName,
    ContactChannel,
    Answers,
    Score,
    Label,
    Status,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    CreatedAt,
    UpdatedAt,
}
