use sea_orm_migration::prelude::*;

use scanpass_codes_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
