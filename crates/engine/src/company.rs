//! Issuing company profile.
//!
//! A single row (fixed id) holding the business identity printed on
//! quotation documents. The admin CLI seeds and updates it.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Fixed primary key of the single profile row.
pub const PROFILE_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "company_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CompanyProfile> for ActiveModel {
    fn from(profile: &CompanyProfile) -> Self {
        Self {
            id: ActiveValue::Set(PROFILE_ID),
            name: ActiveValue::Set(profile.name.clone()),
            tax_id: ActiveValue::Set(profile.tax_id.clone()),
            address: ActiveValue::Set(profile.address.clone()),
            phone: ActiveValue::Set(profile.phone.clone()),
            email: ActiveValue::Set(profile.email.clone()),
        }
    }
}

impl From<Model> for CompanyProfile {
    fn from(model: Model) -> Self {
        Self {
            name: model.name,
            tax_id: model.tax_id,
            address: model.address,
            phone: model.phone,
            email: model.email,
        }
    }
}
