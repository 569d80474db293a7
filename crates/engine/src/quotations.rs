//! Quotation primitives.
//!
//! A `Quotation` is a numbered offer to a client, made of ordered line items
//! plus denormalized totals (`subtotal`, `tax`, `total`). The sequential
//! `number` is the business identifier printed on the document; it is unique
//! across **all** quotations, active or not, and is never reused.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

use super::line_items;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    pub number: i64,
    pub client_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub delivery_terms: Option<String>,
    pub subtotal: MoneyCents,
    pub tax: MoneyCents,
    pub total: MoneyCents,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<line_items::LineItem>,
}

impl Quotation {
    /// Creates an empty quotation shell with zero totals.
    ///
    /// Items and totals are filled in by the creation pipeline.
    pub fn new(
        number: i64,
        client_id: Option<Uuid>,
        subject: Option<String>,
        notes: Option<String>,
        delivery_terms: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number,
            client_id,
            issue_date: now.date_naive(),
            subject,
            notes,
            delivery_terms,
            subtotal: MoneyCents::ZERO,
            tax: MoneyCents::ZERO,
            total: MoneyCents::ZERO,
            active: true,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quotations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: i64,
    pub client_id: Option<String>,
    pub issue_date: Date,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub delivery_terms: Option<String>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::line_items::Entity")]
    LineItems,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
}

impl Related<super::line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Quotation> for ActiveModel {
    fn from(quotation: &Quotation) -> Self {
        Self {
            id: ActiveValue::Set(quotation.id.to_string()),
            number: ActiveValue::Set(quotation.number),
            client_id: ActiveValue::Set(quotation.client_id.map(|id| id.to_string())),
            issue_date: ActiveValue::Set(quotation.issue_date),
            subject: ActiveValue::Set(quotation.subject.clone()),
            notes: ActiveValue::Set(quotation.notes.clone()),
            delivery_terms: ActiveValue::Set(quotation.delivery_terms.clone()),
            subtotal_cents: ActiveValue::Set(quotation.subtotal.cents()),
            tax_cents: ActiveValue::Set(quotation.tax.cents()),
            total_cents: ActiveValue::Set(quotation.total.cents()),
            active: ActiveValue::Set(quotation.active),
            created_at: ActiveValue::Set(quotation.created_at),
            updated_at: ActiveValue::Set(quotation.updated_at),
        }
    }
}

impl TryFrom<Model> for Quotation {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("quotation not exists".to_string()))?,
            number: model.number,
            client_id: model
                .client_id
                .and_then(|s| Uuid::parse_str(&s).ok()),
            issue_date: model.issue_date,
            subject: model.subject,
            notes: model.notes,
            delivery_terms: model.delivery_terms,
            subtotal: MoneyCents::new(model.subtotal_cents),
            tax: MoneyCents::new(model.tax_cents),
            total: MoneyCents::new(model.total_cents),
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            items: Vec::new(),
        })
    }
}
