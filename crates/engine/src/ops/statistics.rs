use sea_orm::{Statement, TransactionTrait, prelude::*};

use crate::{MoneyCents, ResultEngine};

use super::{Engine, with_tx};

/// Store-wide counters for the dashboard view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub active_quotations: i64,
    pub quoted_total: MoneyCents,
    pub clients: i64,
}

impl Engine {
    /// Returns the active quotation count, their summed totals, and the
    /// client count.
    ///
    /// Deactivated quotations are excluded from both the count and the sum.
    pub async fn statistics(&self) -> ResultEngine<Statistics> {
        with_tx!(self, |db_tx| {
            let backend = self.database.get_database_backend();

            let active_quotations: i64 = {
                let stmt = Statement::from_string(
                    backend,
                    "SELECT COUNT(*) AS cnt FROM quotations WHERE active = 1;",
                );
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "cnt").ok()).unwrap_or(0)
            };

            let quoted_total_cents: i64 = {
                let stmt = Statement::from_string(
                    backend,
                    "SELECT COALESCE(SUM(total_cents), 0) AS sum FROM quotations WHERE active = 1;",
                );
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0)
            };

            let clients: i64 = {
                let stmt = Statement::from_string(backend, "SELECT COUNT(*) AS cnt FROM clients;");
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "cnt").ok()).unwrap_or(0)
            };

            Ok(Statistics {
                active_quotations,
                quoted_total: MoneyCents::new(quoted_total_cents),
                clients,
            })
        })
    }
}
