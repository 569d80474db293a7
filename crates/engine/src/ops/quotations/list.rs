use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{Client, EngineError, Quotation, ResultEngine, clients, quotations};

use super::super::{Engine, with_tx};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct QuotationsCursor {
    number: i64,
}

impl QuotationsCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidInput("invalid quotations cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidInput("invalid quotations cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidInput("invalid quotations cursor".to_string()))
    }
}

impl Engine {
    /// Lists recent quotations with their embedded clients.
    pub async fn quotations(
        &self,
        include_inactive: bool,
        limit: u64,
    ) -> ResultEngine<Vec<(Quotation, Option<Client>)>> {
        let (items, _next) = self.quotations_page(include_inactive, limit, None).await?;
        Ok(items)
    }

    /// Lists quotations with their embedded clients, with cursor-based
    /// pagination.
    ///
    /// Pagination is newest → older by `number DESC` (the number is unique,
    /// so it is a total order). Items are not loaded for list rows.
    pub async fn quotations_page(
        &self,
        include_inactive: bool,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<(Quotation, Option<Client>)>, Option<String>)> {
        with_tx!(self, |db_tx| {
            let limit_plus_one = limit.saturating_add(1);
            let mut query = quotations::Entity::find()
                .order_by_desc(quotations::Column::Number)
                .limit(limit_plus_one);

            if !include_inactive {
                query = query.filter(quotations::Column::Active.eq(true));
            }
            if let Some(cursor) = cursor {
                let cursor = QuotationsCursor::decode(cursor)?;
                query = query.filter(quotations::Column::Number.lt(cursor.number));
            }

            let rows: Vec<quotations::Model> = query.all(&db_tx).await?;
            let has_more = rows.len() > limit as usize;

            // Batch-load the referenced clients for the page.
            let client_ids: Vec<String> = rows
                .iter()
                .take(limit as usize)
                .filter_map(|m| m.client_id.clone())
                .collect();
            let mut clients_by_id: HashMap<String, Client> = HashMap::new();
            if !client_ids.is_empty() {
                let client_models = clients::Entity::find()
                    .filter(clients::Column::Id.is_in(client_ids))
                    .all(&db_tx)
                    .await?;
                for model in client_models {
                    let id = model.id.clone();
                    clients_by_id.insert(id, Client::try_from(model)?);
                }
            }

            let mut out: Vec<(Quotation, Option<Client>)> =
                Vec::with_capacity(rows.len().min(limit as usize));
            for model in rows.into_iter().take(limit as usize) {
                let client = model
                    .client_id
                    .as_ref()
                    .and_then(|id| clients_by_id.get(id))
                    .cloned();
                out.push((Quotation::try_from(model)?, client));
            }

            let next_cursor = out.last().map(|(quotation, _)| QuotationsCursor {
                number: quotation.number,
            });
            let next_cursor = if has_more {
                next_cursor.map(|c| c.encode()).transpose()?
            } else {
                None
            };

            Ok((out, next_cursor))
        })
    }
}
