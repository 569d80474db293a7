use sea_orm::{TransactionTrait, prelude::*};

use crate::{
    Client, EngineError, LineItem, MoneyCents, Quotation, ResultEngine,
    commands::CreateQuotationCmd, line_items, quotations,
};

use super::super::{
    Engine, conflict_on_unique, normalize_optional_text, normalize_required_text, with_tx,
};

/// Attempts for the whole creation transaction when a numbering or email
/// unique race is lost.
const CREATE_MAX_ATTEMPTS: u32 = 3;

/// Intake item after validation, before any write.
struct ParsedItem {
    position: i32,
    description: String,
    quantity: i64,
    unit_price: MoneyCents,
}

impl Engine {
    /// Creates a quotation, its client and its items as one unit.
    ///
    /// Pipeline, all inside one DB transaction: validate the intake, resolve
    /// the client by email, insert the quotation shell with a freshly
    /// allocated number, insert the items in submission order with 1-based
    /// positions, recompute the totals, return the resolved aggregate. Any
    /// failure rolls the whole transaction back: no partial quotation, no
    /// visible burned number, no stray client mutation.
    ///
    /// Losing a unique race (quotation number, client email) retries the
    /// whole transaction up to [`CREATE_MAX_ATTEMPTS`] times before the
    /// conflict is surfaced.
    pub async fn create_quotation(
        &self,
        cmd: CreateQuotationCmd,
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        normalize_required_text(&cmd.client.contact_name, "client contact name")?;
        let items = parse_items(&cmd)?;

        let mut attempt = 1;
        loop {
            match self.create_quotation_once(&cmd, &items).await {
                Err(EngineError::Conflict(_)) if attempt < CREATE_MAX_ATTEMPTS => {
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn create_quotation_once(
        &self,
        cmd: &CreateQuotationCmd,
        items: &[ParsedItem],
    ) -> ResultEngine<(Quotation, Option<Client>)> {
        with_tx!(self, |db_tx| {
            let client_model = self.resolve_client(&db_tx, &cmd.client).await?;
            let client = Client::try_from(client_model)?;

            let number = self.next_quotation_number(&db_tx).await?;
            let quotation = Quotation::new(
                number,
                Some(client.id),
                normalize_optional_text(cmd.subject.as_deref()),
                normalize_optional_text(cmd.notes.as_deref()),
                normalize_optional_text(cmd.delivery_terms.as_deref()),
            );
            let quotation_id = quotation.id;
            let active: quotations::ActiveModel = (&quotation).into();
            active
                .insert(&db_tx)
                .await
                .map_err(|err| conflict_on_unique(err, "quotation number already allocated"))?;

            for parsed in items {
                let item = LineItem::new(
                    quotation_id,
                    parsed.position,
                    parsed.description.clone(),
                    parsed.quantity,
                    parsed.unit_price,
                )?;
                let item_model: line_items::ActiveModel = (&item).into();
                item_model.insert(&db_tx).await?;
            }

            self.recompute_quotation_totals(&db_tx, quotation_id).await?;
            self.resolved_quotation(&db_tx, quotation_id).await
        })
    }
}

/// Validates every intake item up front, so malformed input is rejected
/// before anything is written.
fn parse_items(cmd: &CreateQuotationCmd) -> ResultEngine<Vec<ParsedItem>> {
    let mut items = Vec::with_capacity(cmd.items.len());
    for (index, draft) in cmd.items.iter().enumerate() {
        let position = i32::try_from(index + 1)
            .map_err(|_| EngineError::InvalidInput("too many items".to_string()))?;

        let description =
            normalize_required_text(&draft.description, &format!("item {position} description"))?;
        if draft.quantity <= 0 {
            return Err(EngineError::InvalidAmount(format!(
                "item {position}: quantity must be > 0"
            )));
        }
        let unit_price: MoneyCents = draft.unit_price.parse().map_err(|_| {
            EngineError::InvalidAmount(format!(
                "item {position}: invalid unit price \"{}\"",
                draft.unit_price
            ))
        })?;
        if unit_price.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "item {position}: unit price must not be negative"
            )));
        }

        items.push(ParsedItem {
            position,
            description,
            quantity: draft.quantity,
            unit_price,
        });
    }
    Ok(items)
}
