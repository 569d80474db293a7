use sea_orm::{DatabaseTransaction, TransactionTrait, prelude::*};

use crate::{CompanyProfile, ResultEngine, company};

use super::{Engine, with_tx};

impl Engine {
    pub(super) async fn find_company_profile(
        &self,
        db: &DatabaseTransaction,
    ) -> ResultEngine<Option<CompanyProfile>> {
        let model = company::Entity::find_by_id(company::PROFILE_ID)
            .one(db)
            .await?;
        Ok(model.map(CompanyProfile::from))
    }

    /// Returns the issuing-company profile, if one has been set.
    pub async fn company_profile(&self) -> ResultEngine<Option<CompanyProfile>> {
        with_tx!(self, |db_tx| {
            self.find_company_profile(&db_tx).await
        })
    }

    /// Creates or replaces the single issuing-company profile row.
    pub async fn set_company_profile(&self, profile: CompanyProfile) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let exists = company::Entity::find_by_id(company::PROFILE_ID)
                .one(&db_tx)
                .await?
                .is_some();
            let active: company::ActiveModel = (&profile).into();
            if exists {
                active.update(&db_tx).await?;
            } else {
                active.insert(&db_tx).await?;
            }
            Ok(())
        })
    }
}
