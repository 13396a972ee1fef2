use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;

use rebate_app::{
    currency::find_currency,
    database::{self, Db},
    domain::discounts::PgDiscountsService,
};

mod db;
mod discount;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "rebate-app", about = "Rebate CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Discount(discount::DiscountCommand),
    Quote(quote::QuoteArgs),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Discount(command) => discount::run(command).await,
            Commands::Quote(args) => quote::run(&args),
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection settings shared by commands that touch storage.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Store currency (ISO 4217 code)
    #[arg(long, env = "CURRENCY", default_value = "GBP", value_parser = find_currency)]
    currency: &'static Currency,
}

impl StoreArgs {
    pub(crate) async fn discounts_service(&self) -> Result<PgDiscountsService, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(PgDiscountsService::new(Db::new(pool), self.currency))
    }
}
