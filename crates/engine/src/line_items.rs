//! Line item primitives.
//!
//! A `LineItem` is one priced row of a quotation. Its `total` is always
//! `unit_price × quantity`; the parent totals are recomputed from line totals
//! whenever the item set changes.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub position: i32,
    pub description: String,
    pub quantity: i64,
    pub unit_price: MoneyCents,
    pub total: MoneyCents,
}

impl LineItem {
    pub fn new(
        quotation_id: Uuid,
        position: i32,
        description: String,
        quantity: i64,
        unit_price: MoneyCents,
    ) -> ResultEngine<Self> {
        let mut item = Self {
            id: Uuid::new_v4(),
            quotation_id,
            position,
            description,
            quantity,
            unit_price,
            total: MoneyCents::ZERO,
        };
        item.revalidate()?;
        Ok(item)
    }

    /// Re-checks the field invariants and recomputes `total`.
    ///
    /// Call after mutating `description`, `quantity` or `unit_price`.
    pub fn revalidate(&mut self) -> ResultEngine<()> {
        if self.description.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "item description must not be empty".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(EngineError::InvalidAmount(
                "quantity must be > 0".to_string(),
            ));
        }
        if self.unit_price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "unit price must not be negative".to_string(),
            ));
        }
        self.total = self
            .unit_price
            .checked_mul_units(self.quantity)
            .ok_or_else(|| EngineError::InvalidAmount("line total too large".to_string()))?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub quotation_id: String,
    pub position: i32,
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quotations::Entity",
        from = "Column::QuotationId",
        to = "super::quotations::Column::Id"
    )]
    Quotations,
}

impl Related<super::quotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&LineItem> for ActiveModel {
    fn from(item: &LineItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            quotation_id: ActiveValue::Set(item.quotation_id.to_string()),
            position: ActiveValue::Set(item.position),
            description: ActiveValue::Set(item.description.clone()),
            quantity: ActiveValue::Set(item.quantity),
            unit_price_cents: ActiveValue::Set(item.unit_price.cents()),
            total_cents: ActiveValue::Set(item.total.cents()),
        }
    }
}

impl TryFrom<Model> for LineItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("line item not exists".to_string()))?,
            quotation_id: Uuid::parse_str(&model.quotation_id)
                .map_err(|_| EngineError::KeyNotFound("quotation not exists".to_string()))?,
            position: model.position,
            description: model.description,
            quantity: model.quantity,
            unit_price: MoneyCents::new(model.unit_price_cents),
            total: MoneyCents::new(model.total_cents),
        })
    }
}
