use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, Statement, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, quotations};

use super::Engine;

/// Tax applied to every subtotal, in basis points (19%).
const TAX_RATE_BP: i64 = 1900;

impl Engine {
    /// Recomputes a quotation's denormalized totals from its persisted line
    /// items and writes them back, inside the caller's transaction.
    ///
    /// `subtotal = Σ item.total`; `tax` is 19% of the subtotal rounded
    /// half-up to the cent; `total = subtotal + tax`. An empty item set
    /// yields all zeros. Idempotent: rerunning it without an item change
    /// writes the same values.
    pub(super) async fn recompute_quotation_totals(
        &self,
        db: &DatabaseTransaction,
        quotation_id: Uuid,
    ) -> ResultEngine<(MoneyCents, MoneyCents, MoneyCents)> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT COALESCE(SUM(total_cents), 0) AS sum FROM line_items WHERE quotation_id = ?;",
            vec![quotation_id.to_string().into()],
        );
        let row = db.query_one(stmt).await?;
        let subtotal_cents: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);

        let subtotal = MoneyCents::new(subtotal_cents);
        let tax = subtotal
            .percent_half_up(TAX_RATE_BP)
            .ok_or_else(|| EngineError::InvalidAmount("subtotal too large".to_string()))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| EngineError::InvalidAmount("total too large".to_string()))?;

        let active = quotations::ActiveModel {
            id: ActiveValue::Set(quotation_id.to_string()),
            subtotal_cents: ActiveValue::Set(subtotal.cents()),
            tax_cents: ActiveValue::Set(tax.cents()),
            total_cents: ActiveValue::Set(total.cents()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;

        Ok((subtotal, tax, total))
    }
}
