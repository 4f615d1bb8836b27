//! Launchpad command line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use launch_config::LaunchpadConfig;
use launch_types::{units, Address, Family, TokenMetadata, U256};
use launchpad::{abi, registry, CommissionSchedule, ConversionRequest, Launchpad};
use ledger::asset::abi::{approval_event, encode_reserved_init, transfer_event};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creation commission for a ticker
    Commission { symbol: String },

    /// Evaluate a pricing formula (amounts in whole units, e.g. 12.5)
    Quote {
        #[arg(value_enum)]
        kind: QuoteKind,
        #[arg(long)]
        supply: String,
        #[arg(long)]
        reserve: String,
        #[arg(long)]
        ratio: u8,
        #[arg(long)]
        amount: String,
    },

    /// Predict the address of a reserved-family asset
    Predict {
        symbol: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        identity: String,
        #[arg(long)]
        creator: Address,
        #[arg(long, default_value_t = 50)]
        ratio: u8,
        #[arg(long, default_value = "1000")]
        initial_mint: String,
        #[arg(long, default_value = "0")]
        min_total_supply: String,
        #[arg(long, default_value = "1000000")]
        max_total_supply: String,
    },

    /// Create two assets on an in-memory ledger and convert between them
    Demo,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum QuoteKind {
    BuyOutput,
    BuyInput,
    SellOutput,
    SellInput,
}

fn amount(input: &str) -> Result<U256> {
    units::parse(input).with_context(|| format!("Invalid amount '{input}'"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = LaunchpadConfig::load(args.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Command::Commission { symbol } => {
            let fee = CommissionSchedule::required_commission(&symbol);
            print_json(json!({
                "symbol": symbol,
                "length": symbol.chars().count(),
                "commission": units::format(fee),
                "commission_native": fee.to_string(),
            }))
        }
        Command::Quote {
            kind,
            supply,
            reserve,
            ratio,
            amount: value,
        } => {
            let lp = Launchpad::from_config(&config)?;
            let (supply, reserve, value) = (amount(&supply)?, amount(&reserve)?, amount(&value)?);
            let result = match kind {
                QuoteKind::BuyOutput => lp.buy_output(supply, reserve, ratio, value),
                QuoteKind::BuyInput => lp.buy_input(supply, reserve, ratio, value),
                QuoteKind::SellOutput => lp.sell_output(supply, reserve, ratio, value),
                QuoteKind::SellInput => lp.sell_input(supply, reserve, ratio, value),
            }
            .context("Pricing query failed")?;
            print_json(json!({
                "kind": format!("{kind:?}"),
                "result": units::format(result),
                "result_native": result.to_string(),
            }))
        }
        Command::Predict {
            symbol,
            name,
            identity,
            creator,
            ratio,
            initial_mint,
            min_total_supply,
            max_total_supply,
        } => {
            let lp = Launchpad::from_config(&config)?;
            let meta = TokenMetadata {
                name: if name.is_empty() { symbol.clone() } else { name },
                symbol,
                identity,
                creator,
                ratio,
                initial_mint: amount(&initial_mint)?,
                min_total_supply: amount(&min_total_supply)?,
                max_total_supply: amount(&max_total_supply)?,
            };
            meta.validate()?;
            let init = encode_reserved_init(&meta)?;
            let salt = registry::reserved_salt(&meta.symbol);
            let predicted = lp.predict(Family::Reserved, salt, &init)?;
            print_json(json!({
                "symbol": meta.symbol,
                "launchpad": format!("{:?}", lp.address()),
                "salt": format!("{salt:?}"),
                "predicted": format!("{predicted:?}"),
            }))
        }
        Command::Demo => run_demo(&config),
    }
}

fn print_json(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn demo_meta(symbol: &str, creator: Address) -> TokenMetadata {
    TokenMetadata {
        name: format!("{symbol} Demo"),
        symbol: symbol.to_string(),
        identity: format!("demo://{}", symbol.to_lowercase()),
        creator,
        ratio: 50,
        initial_mint: units::whole(1_000),
        min_total_supply: units::whole(10),
        max_total_supply: units::whole(1_000_000),
    }
}

fn run_demo(config: &LaunchpadConfig) -> Result<()> {
    info!("🚀 Starting launchpad demo");
    let mut lp = Launchpad::from_config(config)?;
    let creator = Address::repeat_byte(0xc0);
    let trader = Address::repeat_byte(0x7a);
    lp.ledger_mut().mint_native(creator, units::whole(10_000));

    let alpha = lp
        .create_token(creator, demo_meta("ALPHAXX", creator), units::whole(350))
        .context("Failed to create ALPHAXX")?;
    let beta = lp
        .create_token(creator, demo_meta("BETAXXX", creator), units::whole(350))
        .context("Failed to create BETAXXX")?;

    let amount_in = units::whole(25);
    let this = lp.address();
    lp.ledger_mut()
        .asset_mut(alpha)
        .approve(creator, this, amount_in)
        .context("Approval failed")?;
    let received = lp
        .convert(
            creator,
            ConversionRequest {
                asset_in: alpha,
                asset_out: beta,
                amount_in,
                amount_out_min: U256::zero(),
                recipient: trader,
            },
        )
        .context("Conversion failed")?;

    let named = [
        ("TokenDeployed", abi::token_deployed_event().signature()),
        ("OwnershipTransferred", abi::ownership_transferred_event().signature()),
        ("Transfer", transfer_event().signature()),
        ("Approval", approval_event().signature()),
    ];
    let log: Vec<_> = lp
        .ledger()
        .logs()
        .iter()
        .map(|entry| {
            let event = entry
                .signature()
                .and_then(|sig| named.iter().find(|(_, s)| *s == sig).map(|(n, _)| *n))
                .unwrap_or("unknown");
            json!({ "address": format!("{:?}", entry.address), "event": event })
        })
        .collect();

    print_json(json!({
        "launchpad": format!("{this:?}"),
        "alpha": format!("{alpha:?}"),
        "beta": format!("{beta:?}"),
        "converted": units::format(amount_in),
        "received": units::format(received),
        "log": log,
    }))
}
