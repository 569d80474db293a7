use sea_orm::{DatabaseTransaction, Statement, TransactionTrait, prelude::*};

use crate::ResultEngine;

use super::{Engine, with_tx};

impl Engine {
    /// Computes the next quotation number inside the caller's transaction.
    ///
    /// `MAX(number) + 1` over **all** rows, active or not: deactivating a
    /// quotation never frees its number. The unique index on `number` catches
    /// the read-then-insert race; the creation pipeline retries on it.
    pub(super) async fn next_quotation_number(
        &self,
        db: &DatabaseTransaction,
    ) -> ResultEngine<i64> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_string(
            backend,
            "SELECT COALESCE(MAX(number), 0) + 1 AS next FROM quotations;",
        );
        let row = db.query_one(stmt).await?;
        Ok(row.and_then(|r| r.try_get("", "next").ok()).unwrap_or(1))
    }

    /// Returns the number the next created quotation would receive.
    ///
    /// Read-only preview; nothing is allocated or reserved. A concurrent
    /// creation can still take the previewed number first.
    pub async fn peek_next_number(&self) -> ResultEngine<i64> {
        with_tx!(self, |db_tx| {
            self.next_quotation_number(&db_tx).await
        })
    }
}
