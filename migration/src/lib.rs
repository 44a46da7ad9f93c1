pub use sea_orm_migration::prelude::*;

mod m20251020_000001_create_accounts_tables;
mod m20251020_000002_create_requirement_tables;
mod m20251021_000003_create_placement_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_accounts_tables::Migration),
            Box::new(m20251020_000002_create_requirement_tables::Migration),
            Box::new(m20251021_000003_create_placement_tables::Migration),
        ]
    }
}
