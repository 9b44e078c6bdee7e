//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250221_000001_create_users_table;
mod m20250221_000002_create_card_profiles_table;
mod m20250221_000003_create_card_requests_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250221_000001_create_users_table::Migration),
            Box::new(m20250221_000002_create_card_profiles_table::Migration),
            Box::new(m20250221_000003_create_card_requests_table::Migration),
        ]
    }
}
