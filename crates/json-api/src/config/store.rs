//! Store Config

use clap::Args;
use rusty_money::iso::Currency;

use rebate_app::currency::find_currency;

/// Discount storage and pricing settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Store currency that prices and discount amounts are expressed in
    #[arg(long, env = "CURRENCY", default_value = "GBP", value_parser = find_currency)]
    pub currency: &'static Currency,
}
