use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sts_rs::config::MeterDefaults;
use sts_rs::dkga::derive_with_trace;
use sts_rs::logging::{log_debug, log_error, log_warn};
use sts_rs::token::format_token;
use sts_rs::{
    generate_demo_token, init_logger, log_info, FileKeyStore, MeterParameters, StsConfig,
    StsError, TokenDecoder, VendingKey, VendingKeyStore,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sts-cli")]
#[command(about = "CLI tool for STS decoder keys and tokens")]
struct Cli {
    /// Vending key file (overrides STS_VENDING_KEY_PATH)
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Meter parameters; anything omitted falls back to the configured defaults.
#[derive(Args)]
struct MeterArgs {
    #[arg(long)]
    key_type: Option<String>,
    #[arg(long)]
    supply_group_code: Option<String>,
    #[arg(long)]
    tariff_index: Option<String>,
    #[arg(long)]
    key_revision_number: Option<String>,
    /// Meter number (11 or 12 digits)
    #[arg(long, short = 'm')]
    meter: Option<String>,
}

impl MeterArgs {
    fn parameters(self, defaults: &MeterDefaults) -> Result<MeterParameters, StsError> {
        let defaults = defaults.clone();
        MeterDefaults {
            key_type: self.key_type.unwrap_or(defaults.key_type),
            supply_group_code: self.supply_group_code.unwrap_or(defaults.supply_group_code),
            tariff_index: self.tariff_index.unwrap_or(defaults.tariff_index),
            key_revision_number: self.key_revision_number.unwrap_or(defaults.key_revision_number),
            decoder_reference_number: self.meter.unwrap_or(defaults.decoder_reference_number),
        }
        .to_parameters()
    }
}

/// Load the vending key, creating it on first run.
fn load_vending_key(store: &FileKeyStore) -> Result<VendingKey> {
    let fresh = !store.exists();
    let key = store.get_or_create().context("loading vending key")?;
    if fresh {
        log_info(&format!("Created vending key at {}", store.path().display()));
    } else {
        log_debug(&format!("Loaded vending key from {}", store.path().display()));
    }
    Ok(key)
}

#[derive(Subcommand)]
enum Commands {
    /// Create the vending key
    Keygen {
        /// Replace an existing key
        #[arg(long)]
        force: bool,
    },
    /// Derive a meter's decoder key
    Derive {
        #[command(flatten)]
        meter: MeterArgs,
        /// Also print the control and PAN blocks
        #[arg(long)]
        trace: bool,
    },
    /// Decrypt a token for a meter
    Decode {
        token: String,
        #[command(flatten)]
        meter: MeterArgs,
        /// Print the decoded fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a hash-based demo token
    DemoToken {
        meter: String,
        amount: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    run(cli).map_err(|e| {
        log_error(&format!("{e:#}"));
        e
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut config = StsConfig::from_env();
    if let Some(path) = cli.key_file {
        config = config.with_key_path(path);
    }
    let store = config.key_store();

    match cli.command {
        Commands::Keygen { force } => {
            if store.exists() && !force {
                bail!(
                    "vending key already exists at {} (use --force to replace it)",
                    store.path().display()
                );
            }
            if force {
                log_warn("Replacing vending key; previously derived decoder keys become invalid");
            }
            store.generate().context("generating vending key")?;
            log_info(&format!("Generated vending key at {}", store.path().display()));
            println!("Vending key written to {}", store.path().display());
        }
        Commands::Derive { meter, trace } => {
            let params = meter.parameters(&config.meter).context("invalid meter parameters")?;
            let vending_key = load_vending_key(&store)?;
            let (decoder_key, steps) = derive_with_trace(&params, &vending_key)?;
            if trace {
                println!("Control block: {}", steps.control_block.hex());
                println!("PAN block:     {}", steps.pan_block.hex());
            }
            println!("Decoder Key (Hex): {}", decoder_key.to_hex());
        }
        Commands::Decode { token, meter, json } => {
            let params = meter.parameters(&config.meter).context("invalid meter parameters")?;
            let vending_key = load_vending_key(&store)?;
            let decoder = TokenDecoder::for_meter(&params, &vending_key)?;
            log_debug(&format!("Decoding token for meter {}", params.decoder_reference_number()));
            let fields = decoder
                .decode_str(&token)
                .with_context(|| format!("decoding token {token:?}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                println!("Token Class: {} ({})", fields.class_bits, fields.class);
                println!("Subclass: {}", fields.subclass);
                println!("Random Number: {}", fields.random);
                println!("Token Identifier (TID): {}", fields.identifier);
                println!("Calculated Units: {:.2}", fields.units);
                println!("Check: 0x{:04X} (not validated)", fields.check);
            }
        }
        Commands::DemoToken { meter, amount } => {
            let token = generate_demo_token(&meter, amount)?;
            log_info(&format!("Demo token generated for meter {meter}"));
            println!("Generated Token: {}", format_token(&token));
        }
    }

    Ok(())
}
