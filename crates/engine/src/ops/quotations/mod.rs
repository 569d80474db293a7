use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, Statement, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    Client, CompanyProfile, LineItem, Quotation, ResultEngine, line_items, quotations,
};

use super::{Engine, with_tx};

mod create;
mod list;

/// Fully resolved, render-ready view of one quotation: the quotation with
/// its ordered items, the client it addresses, and the issuing company.
/// The external document renderer consumes this as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotationDocument {
    pub quotation: Quotation,
    pub client: Option<Client>,
    pub company: Option<CompanyProfile>,
}

impl Engine {
    pub(super) async fn quotation_with_items(
        &self,
        db: &DatabaseTransaction,
        quotation_id: Uuid,
    ) -> ResultEngine<Quotation> {
        let model = self.require_quotation_by_id(db, quotation_id).await?;
        let item_models = line_items::Entity::find()
            .filter(line_items::Column::QuotationId.eq(quotation_id.to_string()))
            .order_by_asc(line_items::Column::Position)
            .all(db)
            .await?;

        let mut quotation = Quotation::try_from(model)?;
        quotation.items = item_models
            .into_iter()
            .map(LineItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(quotation)
    }

    pub(super) async fn resolved_quotation(
        &self,
        db: &DatabaseTransaction,
        quotation_id: Uuid,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        let quotation = self.quotation_with_items(db, quotation_id).await?;
        let client = match quotation.client_id {
            Some(client_id) => {
                let model = self.require_client_by_id(db, client_id).await?;
                Some(Client::try_from(model)?)
            }
            None => None,
        };
        Ok((quotation, client))
    }

    /// Returns one quotation with its ordered items and embedded client.
    ///
    /// Inactive quotations are returned too: a deactivated quotation stays
    /// readable and printable.
    pub async fn quotation(
        &self,
        quotation_id: Uuid,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        with_tx!(self, |db_tx| {
            self.resolved_quotation(&db_tx, quotation_id).await
        })
    }

    /// Returns the render-ready document aggregate: quotation, client and
    /// issuing company profile.
    pub async fn quotation_document(
        &self,
        quotation_id: Uuid,
    ) -> ResultEngine<QuotationDocument> {
        with_tx!(self, |db_tx| {
            let (quotation, client) = self.resolved_quotation(&db_tx, quotation_id).await?;
            let company = self.find_company_profile(&db_tx).await?;
            Ok(QuotationDocument {
                quotation,
                client,
                company,
            })
        })
    }

    /// Soft-deletes a quotation.
    ///
    /// The row keeps its number, items and totals; it only stops counting as
    /// active. Numbers of deactivated quotations are never reallocated.
    pub async fn deactivate_quotation(&self, quotation_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_quotation_by_id(&db_tx, quotation_id).await?;
            let active = quotations::ActiveModel {
                id: ActiveValue::Set(model.id),
                active: ActiveValue::Set(false),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Hard-deletes every quotation and line item. Admin reset only; clients
    /// are left in place.
    ///
    /// Returns the number of quotations removed. With the store empty the
    /// allocator hands out number 1 again.
    pub async fn purge_quotations(&self) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let backend = self.database.get_database_backend();

            db_tx
                .execute(Statement::from_string(backend, "DELETE FROM line_items;"))
                .await?;
            let result = db_tx
                .execute(Statement::from_string(backend, "DELETE FROM quotations;"))
                .await?;

            Ok(result.rows_affected())
        })
    }
}
