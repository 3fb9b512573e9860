use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create leads table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Leads::FirstName).text().not_null())
                    .col(ColumnDef::new(Leads::LastName).text().not_null())
                    .col(ColumnDef::new(Leads::Email).text().not_null())
                    .col(ColumnDef::new(Leads::Phone).text())
                    .col(ColumnDef::new(Leads::Company).text())
                    .col(ColumnDef::new(Leads::City).text())
                    .col(ColumnDef::new(Leads::State).text())
                    .col(ColumnDef::new(Leads::Source).text().not_null())
                    .col(
                        ColumnDef::new(Leads::Status)
                            .text()
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Leads::Score).integer())
                    .col(ColumnDef::new(Leads::LeadValue).double())
                    .col(ColumnDef::new(Leads::LastActivityAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Leads::IsQualified).boolean())
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Leads::OwnerId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leads_owner_id")
                            .from(Leads::Table, Leads::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Global uniqueness of lead emails (exact, case-sensitive)
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_leads_email_unique
                ON leads (email);
                "#,
            )
            .await?;

        // Listing is always newest-first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_leads_created_at
                ON leads (created_at DESC);
                "#,
            )
            .await?;

        // Fast lookup by owner
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_leads_owner_id
                ON leads (owner_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_leads_email_unique;
                DROP INDEX IF EXISTS idx_leads_created_at;
                DROP INDEX IF EXISTS idx_leads_owner_id;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    City,
    State,
    Source,
    Status,
    Score,
    LeadValue,
    LastActivityAt,
    IsQualified,
    CreatedAt,
    OwnerId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
