//! Command line and environment configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{
    cli::Command,
    config::{observability::LoggingConfig, pricing::PricingSettings},
};

pub(crate) mod observability;
pub(crate) mod pricing;

/// Foodie command line configuration
#[derive(Debug, Parser)]
#[command(name = "foodie", about = "Order food from the command line", long_about = None)]
pub(crate) struct AppConfig {
    /// Where the cart and favorites are kept.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Restaurant and menu data.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Fees and currency.
    #[command(flatten)]
    pub pricing: PricingSettings,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Signed-in user id
    #[arg(long, env = "FOODIE_USER", global = true)]
    pub user: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments.
    ///
    /// Prints usage and exits on invalid arguments.
    pub(crate) fn load() -> Self {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::parse()
    }
}

/// Storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the cart and favorites snapshots
    #[arg(long, env = "FOODIE_DATA_DIR", default_value = ".foodie", global = true)]
    pub data_dir: PathBuf,
}

/// Catalog settings.
#[derive(Debug, Args)]
pub(crate) struct CatalogConfig {
    /// Catalog YAML file
    #[arg(
        long = "catalog",
        env = "FOODIE_CATALOG",
        default_value = "fixtures/catalog.yml",
        global = true
    )]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{cli::Command, config::observability::LogFormat};

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        AppConfig::command().debug_assert();
    }

    #[test]
    fn defaults_apply_when_only_a_command_is_given() -> TestResult {
        let config = AppConfig::try_parse_from(["foodie", "cart", "show"])?;

        assert!(matches!(config.command, Command::Cart(_)));
        assert_eq!(config.pricing.delivery_fee, Decimal::new(299, 2));
        assert!(matches!(config.logging.log_format, LogFormat::Compact));

        Ok(())
    }

    #[test]
    fn global_options_follow_the_subcommand() -> TestResult {
        let config = AppConfig::try_parse_from([
            "foodie",
            "menu",
            "list",
            "--data-dir",
            "/tmp/foodie",
            "--log-format",
            "json",
            "--user",
            "ada",
        ])?;

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/foodie"));
        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert_eq!(config.user.as_deref(), Some("ada"));

        Ok(())
    }

    #[test]
    fn negative_delivery_fee_is_rejected() {
        let result = AppConfig::try_parse_from(["foodie", "--delivery-fee", "-1", "cart", "show"]);

        assert!(result.is_err());
    }
}
