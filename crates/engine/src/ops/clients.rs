use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Client, EngineError, ResultEngine, clients,
    commands::{ClientDraft, UpdateClientCmd},
    quotations,
};

use super::{Engine, conflict_on_unique, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    /// Creates or updates the client a quotation intake refers to, inside the
    /// caller's transaction.
    ///
    /// Dedup key is the exact trimmed email. No email always inserts a new
    /// client; a known email lands on that row and overwrites its contact
    /// fields (last write wins), preserving `id` and `created_at`. A
    /// concurrent insert of the same email surfaces as a retryable conflict.
    pub(super) async fn resolve_client(
        &self,
        db: &DatabaseTransaction,
        draft: &ClientDraft,
    ) -> ResultEngine<clients::Model> {
        let contact_name = normalize_required_text(&draft.contact_name, "client contact name")?;
        let company_name = normalize_optional_text(draft.company_name.as_deref());
        let email = normalize_optional_text(draft.email.as_deref());
        let phone = normalize_optional_text(draft.phone.as_deref());
        let address = normalize_optional_text(draft.address.as_deref());

        let existing = match email.as_deref() {
            Some(email) => self.find_client_by_email(db, email).await?,
            None => None,
        };

        if let Some(model) = existing {
            let active = clients::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                contact_name: ActiveValue::Set(contact_name),
                company_name: ActiveValue::Set(company_name),
                phone: ActiveValue::Set(phone),
                address: ActiveValue::Set(address),
                ..Default::default()
            };
            return active.update(db).await.map_err(Into::into);
        }

        let client = Client::new(contact_name, company_name, email, phone, address)?;
        let active: clients::ActiveModel = (&client).into();
        active
            .insert(db)
            .await
            .map_err(|err| conflict_on_unique(err, "client email already registered"))
    }

    /// Lists all clients, ordered by company name then contact name.
    pub async fn clients(&self) -> ResultEngine<Vec<Client>> {
        with_tx!(self, |db_tx| {
            let models = clients::Entity::find()
                .order_by_asc(clients::Column::CompanyName)
                .order_by_asc(clients::Column::ContactName)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Client::try_from).collect()
        })
    }

    /// Returns a single client.
    pub async fn client(&self, client_id: Uuid) -> ResultEngine<Client> {
        with_tx!(self, |db_tx| {
            let model = self.require_client_by_id(&db_tx, client_id).await?;
            Client::try_from(model)
        })
    }

    /// Updates client fields; `None` fields are left unchanged, optional text
    /// fields set to an empty string are cleared.
    ///
    /// Moving to an email already held by another client is a conflict.
    pub async fn update_client(&self, cmd: UpdateClientCmd) -> ResultEngine<Client> {
        with_tx!(self, |db_tx| {
            let model = self.require_client_by_id(&db_tx, cmd.client_id).await?;

            let mut active = clients::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                ..Default::default()
            };
            let mut changed = false;

            if let Some(contact_name) = cmd.contact_name.as_deref() {
                active.contact_name = ActiveValue::Set(normalize_required_text(
                    contact_name,
                    "client contact name",
                )?);
                changed = true;
            }
            if let Some(company_name) = cmd.company_name.as_deref() {
                active.company_name = ActiveValue::Set(normalize_optional_text(Some(company_name)));
                changed = true;
            }
            if let Some(email) = cmd.email.as_deref() {
                let email = normalize_optional_text(Some(email));
                if let Some(new_email) = email.as_deref() {
                    let taken = clients::Entity::find()
                        .filter(clients::Column::Email.eq(new_email.to_string()))
                        .filter(clients::Column::Id.ne(model.id.clone()))
                        .one(&db_tx)
                        .await?
                        .is_some();
                    if taken {
                        return Err(EngineError::Conflict(
                            "client email already registered".to_string(),
                        ));
                    }
                }
                active.email = ActiveValue::Set(email);
                changed = true;
            }
            if let Some(phone) = cmd.phone.as_deref() {
                active.phone = ActiveValue::Set(normalize_optional_text(Some(phone)));
                changed = true;
            }
            if let Some(address) = cmd.address.as_deref() {
                active.address = ActiveValue::Set(normalize_optional_text(Some(address)));
                changed = true;
            }

            if !changed {
                return Client::try_from(model);
            }

            let updated = active
                .update(&db_tx)
                .await
                .map_err(|err| conflict_on_unique(err, "client email already registered"))?;
            Client::try_from(updated)
        })
    }

    /// Deletes a client that no quotation references.
    ///
    /// References are counted over all quotations, active or not: an
    /// inactive quotation still renders and still names its client.
    pub async fn delete_client(&self, client_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_client_by_id(&db_tx, client_id).await?;

            let referenced = quotations::Entity::find()
                .filter(quotations::Column::ClientId.eq(model.id.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if referenced {
                return Err(EngineError::Integrity(
                    "client still referenced by quotations".to_string(),
                ));
            }

            clients::Entity::delete_by_id(model.id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
