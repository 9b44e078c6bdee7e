//! SeaORM entity for the `card_profiles` table.

use sea_orm::entity::prelude::*;

use crate::domain::CardProfile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "card_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub card_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub bin_prefix: String,
    pub card_scheme: String,
    pub expiration: i32,
    pub currency: String,
    pub branch_blacklist: Option<String>,
    /// Structured fee list stored as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub fees: Json,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CardProfile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            card_name: model.card_name,
            description: model.description,
            bin_prefix: model.bin_prefix,
            card_scheme: model.card_scheme,
            expiration: model.expiration,
            currency: model.currency,
            branch_blacklist: model.branch_blacklist,
            // Rows only ever hold what normalize_fees produced
            fees: serde_json::from_value(model.fees).unwrap_or_default(),
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
