//! vn-payments CLI
//!
//! Builds signed OnePay checkout URLs and verifies return URLs using the
//! gateway credentials from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use vn_payments::adapters::RuleSchemaValidator;
use vn_payments::config::{AppConfig, LoggingConfig};
use vn_payments::domain::onepay::{CheckoutPayload, GatewayVariant, OnePayGateway};

#[derive(Parser)]
#[command(name = "vn-payments")]
#[command(about = "Sign OnePay checkout URLs and verify return URLs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed checkout URL for a JSON payload
    Checkout {
        /// Gateway variant: domestic or international
        variant: GatewayVariant,

        /// Path to the checkout payload (JSON, camelCase fields)
        payload: PathBuf,
    },

    /// Verify a return URL and print the result as JSON
    Verify {
        /// Gateway variant: domestic or international
        variant: GatewayVariant,

        /// Full return URL or its bare query string
        return_url: String,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn gateway(config: &AppConfig, variant: GatewayVariant) -> Result<OnePayGateway> {
    let onepay = config
        .gateway(variant)
        .ok_or_else(|| anyhow!("OnePay {} gateway is not configured", variant))?;
    let validator = Arc::new(RuleSchemaValidator::new(&config.validation));
    Ok(OnePayGateway::new(variant, onepay, validator)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Checkout { variant, payload } => {
            let raw = std::fs::read_to_string(&payload)
                .with_context(|| format!("Failed to read {}", payload.display()))?;
            let payload: CheckoutPayload =
                serde_json::from_str(&raw).context("Invalid checkout payload JSON")?;
            let url = gateway(&config, variant)?.build_checkout_url(payload)?;
            println!("{}", url);
        }
        Commands::Verify {
            variant,
            return_url,
        } => {
            let result = gateway(&config, variant)?.verify_return_url_str(&return_url)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
