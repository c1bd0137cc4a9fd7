mod config;
mod drain;
mod error;
mod zilliqa;

use anyhow::Result;
use clap::{Arg, Command};
use config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let matches = Command::new("zilliqa-admin")
        .version("0.1.0")
        .about("Invokes the drain_contract_balance transition on a Zilliqa contract")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("api-url")
                .short('a')
                .long("api-url")
                .value_name("URL")
                .help("JSON-RPC endpoint URL"),
        )
        .arg(
            Arg::new("contract")
                .short('t')
                .long("contract")
                .value_name("ADDRESS")
                .help("Target contract address (zil1... or 0x...)"),
        )
        .arg(
            Arg::new("gas-price")
                .long("gas-price")
                .value_name("LI")
                .value_parser(clap::value_parser!(u64))
                .help("Gas price in Li"),
        )
        .arg(
            Arg::new("gas-limit")
                .long("gas-limit")
                .value_name("UNITS")
                .value_parser(clap::value_parser!(u64))
                .help("Gas limit"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .help("Generate a sample configuration file and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Print the default configuration file path and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Handle special commands first
    if matches.get_flag("generate-config") {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        return Ok(());
    }

    if matches.get_flag("config-path") {
        match Config::default_config_path() {
            Ok(path) => {
                println!("{}", path.display());
                return Ok(());
            }
            Err(e) => {
                error!("Could not determine default config path: {}", e);
                return Err(e);
            }
        }
    }

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut config = Config::load_or_default(config_path).await;

    // Override with command line arguments
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        config.network.api_url = api_url.clone();
    }

    if let Some(contract) = matches.get_one::<String>("contract") {
        config.admin.contract_address = Some(contract.clone());
    }

    if let Some(gas_price) = matches.get_one::<u64>("gas-price") {
        config.gas.price_li = *gas_price;
    }

    if let Some(gas_limit) = matches.get_one::<u64>("gas-limit") {
        config.gas.limit = *gas_limit;
    }

    info!("Endpoint: {}", config.network.api_url);
    info!("Chain id: {}", config.network.chain_id);

    if let Err(e) = drain::run(&config).await {
        error!("Drain call failed: {}", e);
        return Err(e);
    }

    Ok(())
}
