//! Bondkey CLI - Command-line interface for bonding-curve issuance ledgers
//!
//! Prices units, splits fees, quotes batches and replays scripted scenarios
//! against a deployment config.

#![forbid(unsafe_code)]

use anyhow::Result;
use bondkey_cli::commands::fees::{resolve_schedule, FeeOverrides};
use bondkey_cli::commands::quote::QuoteRequest;
use bondkey_cli::commands::table::TableRequest;
use bondkey_cli::utils::formatting::success_envelope;
use bondkey_cli::{
    execute_fees, execute_price, execute_quote, execute_simulate, execute_table,
    BondkeyCliConfig, OutputFormat,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bondkey",
    version,
    about = "Command-line interface for bonding-curve issuance ledgers"
)]
struct Cli {
    /// Deployment config file (defaults to $BONDKEY_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Decimals of the payment asset, for display
    #[arg(long, global = true)]
    decimals: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price of one curve position with its fees
    Price {
        /// Curve position (units bought from the curve, counting this one)
        unit: u64,
    },

    /// Price table over a range of curve positions
    Table {
        #[arg(long, default_value = "1")]
        from: u64,

        #[arg(long, default_value = "100")]
        to: u64,

        #[arg(long, default_value = "10")]
        step: u64,
    },

    /// Split a price into creator and admin fees
    Fees {
        /// Price in base units
        price: u128,

        /// Creator fee in basis points (e.g., 700 = 7%)
        #[arg(long)]
        creator_fee_bps: Option<u16>,

        /// Admin fee in basis points
        #[arg(long)]
        admin_fee_bps: Option<u16>,
    },

    /// Cost of buying, or proceeds of selling, a batch at a given supply
    Quote {
        /// Current total supply, pre-minted units included
        #[arg(long)]
        supply: u64,

        #[arg(long, default_value = "1")]
        count: u64,

        /// Quote a sale instead of a purchase
        #[arg(long)]
        sell: bool,
    },

    /// Replay a JSON scenario and report the final state
    Simulate {
        /// Scenario file
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BondkeyCliConfig::new().with_decimals(cli.decimals);

    // Use configuration with CLI overrides
    let default_output_format = parse_output_format(&config.default_output_format)?;
    let output_format = cli.output.unwrap_or(default_output_format);

    let result = execute_command(&cli, output_format, &config);

    // Handle output formatting
    match result {
        Ok(output) => match output_format {
            OutputFormat::Human => println!("{output}"),
            OutputFormat::Json => println!("{}", success_envelope(&output)?),
        },
        Err(e) => {
            match output_format {
                OutputFormat::Human => eprintln!("Error: {e}"),
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "success": false,
                        "error": e.to_string()
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Parse output format from string
fn parse_output_format(format_str: &str) -> Result<OutputFormat> {
    match format_str.to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow::anyhow!("Invalid output format: {format_str}")),
    }
}

fn execute_command(
    cli: &Cli,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    let explicit = cli.config.as_deref();

    match &cli.command {
        Commands::Price { unit } => {
            let deployment = config.load_deployment(explicit)?;
            execute_price(&deployment, *unit, output_format, config)
        }
        Commands::Table { from, to, step } => {
            let deployment = config.load_deployment(explicit)?;
            let request = TableRequest {
                from: *from,
                to: *to,
                step: *step,
            };
            execute_table(&deployment, request, output_format, config)
        }
        Commands::Fees {
            price,
            creator_fee_bps,
            admin_fee_bps,
        } => {
            let overrides = FeeOverrides {
                creator_fee_bps: *creator_fee_bps,
                admin_fee_bps: *admin_fee_bps,
            };
            // Explicit rates on both sides make the deployment optional
            let deployment = if creator_fee_bps.is_some() && admin_fee_bps.is_some() {
                None
            } else {
                Some(config.load_deployment(explicit)?)
            };
            let fees = resolve_schedule(overrides, deployment.as_ref())?;
            execute_fees(fees, *price, output_format, config)
        }
        Commands::Quote { supply, count, sell } => {
            let deployment = config.load_deployment(explicit)?;
            let request = QuoteRequest {
                supply: *supply,
                count: *count,
                sell: *sell,
            };
            execute_quote(&deployment, request, output_format, config)
        }
        Commands::Simulate { scenario } => {
            // Scenarios may carry their own deployment
            let deployment = if explicit.is_some() || config.default_config_path.is_some() {
                Some(config.load_deployment(explicit)?)
            } else {
                None
            };
            execute_simulate(scenario, deployment.as_ref(), output_format, config)
        }
    }
}
