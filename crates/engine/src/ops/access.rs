use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, clients, line_items, quotations};

use super::Engine;

/// Generates a `require_*` method that loads an entity by uuid primary key or
/// fails with `KeyNotFound`.
macro_rules! impl_require_by_id {
    ($require_fn:ident, $entity:path, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<<$entity as EntityTrait>::Model> {
            <$entity>::find_by_id(id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_by_id!(
        require_quotation_by_id,
        quotations::Entity,
        "quotation not exists"
    );

    impl_require_by_id!(require_client_by_id, clients::Entity, "client not exists");

    pub(super) async fn require_line_item_in_quotation(
        &self,
        db: &DatabaseTransaction,
        quotation_id: Uuid,
        item_id: Uuid,
    ) -> ResultEngine<line_items::Model> {
        line_items::Entity::find_by_id(item_id.to_string())
            .filter(line_items::Column::QuotationId.eq(quotation_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("line item not exists".to_string()))
    }

    /// Exact-match lookup on the dedup key. Case-sensitive on purpose: two
    /// addresses differing only in case are treated as different clients.
    pub(super) async fn find_client_by_email(
        &self,
        db: &DatabaseTransaction,
        email: &str,
    ) -> ResultEngine<Option<clients::Model>> {
        clients::Entity::find()
            .filter(clients::Column::Email.eq(email.to_string()))
            .one(db)
            .await
            .map_err(Into::into)
    }
}
