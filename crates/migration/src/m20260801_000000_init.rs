//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Preventivo:
//!
//! - `users`: authentication
//! - `company_profiles`: issuer identity printed on quotation documents
//! - `clients`: customer records, deduplicated by email
//! - `quotations`: numbered quotation shells with stored totals
//! - `line_items`: priced rows belonging to a quotation

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum CompanyProfiles {
    Table,
    Id,
    Name,
    TaxId,
    Address,
    Phone,
    Email,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    ContactName,
    CompanyName,
    Email,
    Phone,
    Address,
    CreatedAt,
}

#[derive(Iden)]
enum Quotations {
    Table,
    Id,
    Number,
    ClientId,
    IssueDate,
    Subject,
    Notes,
    DeliveryTerms,
    SubtotalCents,
    TaxCents,
    TotalCents,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LineItems {
    Table,
    Id,
    QuotationId,
    Position,
    Description,
    Quantity,
    UnitPriceCents,
    TotalCents,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Company profiles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CompanyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyProfiles::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyProfiles::Name).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::TaxId).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::Address).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::Phone).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::Email).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Clients
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::ContactName).string().not_null())
                    .col(ColumnDef::new(Clients::CompanyName).string())
                    .col(ColumnDef::new(Clients::Email).string())
                    .col(ColumnDef::new(Clients::Phone).string())
                    .col(ColumnDef::new(Clients::Address).string())
                    .col(ColumnDef::new(Clients::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // NULL emails stay distinct under a unique index, so clients without
        // an email never collide with each other.
        manager
            .create_index(
                Index::create()
                    .name("idx-clients-email-unique")
                    .table(Clients::Table)
                    .col(Clients::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Quotations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Quotations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quotations::Number).big_integer().not_null())
                    .col(ColumnDef::new(Quotations::ClientId).string())
                    .col(ColumnDef::new(Quotations::IssueDate).date().not_null())
                    .col(ColumnDef::new(Quotations::Subject).string())
                    .col(ColumnDef::new(Quotations::Notes).string())
                    .col(ColumnDef::new(Quotations::DeliveryTerms).string())
                    .col(
                        ColumnDef::new(Quotations::SubtotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Quotations::TaxCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Quotations::TotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Quotations::Active).boolean().not_null())
                    .col(ColumnDef::new(Quotations::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Quotations::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quotations-client_id")
                            .from(Quotations::Table, Quotations::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // The allocator relies on this constraint to reject duplicate numbers
        // handed out by concurrent creations.
        manager
            .create_index(
                Index::create()
                    .name("idx-quotations-number-unique")
                    .table(Quotations::Table)
                    .col(Quotations::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-quotations-client_id")
                    .table(Quotations::Table)
                    .col(Quotations::ClientId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Line items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(LineItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LineItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LineItems::QuotationId).string().not_null())
                    .col(ColumnDef::new(LineItems::Position).integer().not_null())
                    .col(ColumnDef::new(LineItems::Description).string().not_null())
                    .col(ColumnDef::new(LineItems::Quantity).big_integer().not_null())
                    .col(
                        ColumnDef::new(LineItems::UnitPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LineItems::TotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-line_items-quotation_id")
                            .from(LineItems::Table, LineItems::QuotationId)
                            .to(Quotations::Table, Quotations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-line_items-quotation_id-position-unique")
                    .table(LineItems::Table)
                    .col(LineItems::QuotationId)
                    .col(LineItems::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(LineItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanyProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
