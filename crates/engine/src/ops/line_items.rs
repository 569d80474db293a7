use sea_orm::{Statement, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Client, LineItem, Quotation, ResultEngine,
    commands::{LineItemDraft, UpdateLineItemCmd},
    line_items,
};

use super::{Engine, normalize_required_text, parse_unit_price, with_tx};

impl Engine {
    /// Appends an item to an existing quotation and refreshes its totals.
    ///
    /// The item lands after the highest existing position; gaps left by
    /// removed items are not reused. Returns the refreshed aggregate.
    pub async fn add_line_item(
        &self,
        quotation_id: Uuid,
        draft: LineItemDraft,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        let description = normalize_required_text(&draft.description, "item description")?;
        let unit_price = parse_unit_price(&draft.unit_price)?;
        with_tx!(self, |db_tx| {
            self.require_quotation_by_id(&db_tx, quotation_id).await?;

            let backend = self.database.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(MAX(position), 0) + 1 AS next FROM line_items WHERE quotation_id = ?;",
                vec![quotation_id.to_string().into()],
            );
            let row = db_tx.query_one(stmt).await?;
            let position: i32 = row.and_then(|r| r.try_get("", "next").ok()).unwrap_or(1);

            let item = LineItem::new(
                quotation_id,
                position,
                description,
                draft.quantity,
                unit_price,
            )?;
            let active: line_items::ActiveModel = (&item).into();
            active.insert(&db_tx).await?;

            self.recompute_quotation_totals(&db_tx, quotation_id).await?;
            self.resolved_quotation(&db_tx, quotation_id).await
        })
    }

    /// Updates an item's fields and refreshes the quotation totals.
    ///
    /// `None` fields are left unchanged. The merged item is revalidated as a
    /// whole, so an update can never leave an invalid row behind.
    pub async fn update_line_item(
        &self,
        cmd: UpdateLineItemCmd,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        let unit_price = cmd.unit_price.as_deref().map(parse_unit_price).transpose()?;
        with_tx!(self, |db_tx| {
            let model = self
                .require_line_item_in_quotation(&db_tx, cmd.quotation_id, cmd.item_id)
                .await?;
            let mut item = LineItem::try_from(model)?;

            if let Some(description) = cmd.description.clone() {
                item.description = description;
            }
            if let Some(quantity) = cmd.quantity {
                item.quantity = quantity;
            }
            if let Some(unit_price) = unit_price {
                item.unit_price = unit_price;
            }
            item.revalidate()?;

            let active: line_items::ActiveModel = (&item).into();
            active.update(&db_tx).await?;

            self.recompute_quotation_totals(&db_tx, cmd.quotation_id)
                .await?;
            self.resolved_quotation(&db_tx, cmd.quotation_id).await
        })
    }

    /// Removes an item and refreshes the quotation totals.
    ///
    /// Positions of the remaining items are left untouched; later adds fill
    /// in after the highest surviving position.
    pub async fn remove_line_item(
        &self,
        quotation_id: Uuid,
        item_id: Uuid,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_line_item_in_quotation(&db_tx, quotation_id, item_id)
                .await?;
            line_items::Entity::delete_by_id(model.id)
                .exec(&db_tx)
                .await?;

            self.recompute_quotation_totals(&db_tx, quotation_id).await?;
            self.resolved_quotation(&db_tx, quotation_id).await
        })
    }
}
