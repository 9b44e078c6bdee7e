//! SeaORM entity for the `card_requests` table.

use sea_orm::entity::prelude::*;

use crate::domain::{CardRequest, RequestStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "card_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub branch_name: String,
    pub card_type: String,
    pub quantity: i32,
    pub date_requested: DateTimeUtc,
    pub initiator: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub card_charges: Decimal,
    #[sea_orm(unique)]
    pub batch: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CardRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            branch_name: model.branch_name,
            card_type: model.card_type,
            quantity: model.quantity,
            initiator: model.initiator,
            card_charges: model.card_charges,
            batch: model.batch,
            status: RequestStatus::from(model.status.as_str()),
            date_requested: model.date_requested,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
