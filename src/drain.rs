use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::zilliqa::{
    address::Address,
    contract::{CallOptions, Contract},
    crypto::KeyPair,
    rpc::RpcClient,
    units::{li_to_qa, pack_version, MSG_VERSION},
};

/// The only transition this tool ever invokes. Admin-gated on the contract
/// side; callable with no arguments and no value transfer.
pub const DRAIN_TRANSITION: &str = "drain_contract_balance";

/// Performs exactly one `drain_contract_balance` invocation and reports the
/// outcome on stdout. Any failure, including an on-chain rejection, comes
/// back as an error so the process can exit non-zero.
pub async fn run(config: &Config) -> Result<()> {
    let key = config.admin.private_key.as_deref().ok_or_else(|| {
        anyhow!("no admin private key configured; set ZIL_PRIVATE_KEY or admin.private_key")
    })?;
    let keypair = KeyPair::from_hex(key)?;

    let contract_input = config.admin.contract_address.as_deref().ok_or_else(|| {
        anyhow!("no contract address configured; set ZIL_CONTRACT_ADDRESS, admin.contract_address, or --contract")
    })?;
    let contract_address = Address::parse(contract_input)?;

    println!("Your account address is: {}", keypair.address().to_checksum());
    println!("proxy: {}\n", contract_address.to_bech32());

    let client = RpcClient::new(&config.network.api_url)?;

    let gas_price = li_to_qa(config.gas.price_li);
    match client.get_minimum_gas_price().await {
        Ok(minimum) => {
            if let Ok(minimum_qa) = minimum.parse::<u128>() {
                if gas_price < minimum_qa {
                    warn!(
                        configured = gas_price,
                        minimum = minimum_qa,
                        "configured gas price is below the network minimum"
                    );
                }
            }
        }
        Err(e) => debug!(error = %e, "could not fetch minimum gas price"),
    }

    let contract = Contract::at(contract_address, client);
    let opts = CallOptions {
        version: pack_version(config.network.chain_id, MSG_VERSION),
        amount: 0,
        gas_price,
        gas_limit: config.gas.limit,
        priority: config.network.priority,
        attempts: config.confirm.attempts,
        interval: Duration::from_millis(config.confirm.interval_ms),
    };

    println!("------------------------ begin drain contract balance ------------------------\n");
    let outcome = match contract.call(&keypair, DRAIN_TRANSITION, &[], &opts).await {
        Ok(confirmed) => {
            println!("transaction: {}", confirmed.id);
            println!("{}", serde_json::to_string_pretty(&confirmed.receipt)?);
            if confirmed.receipt.success {
                Ok(())
            } else {
                Err(Error::Rejected { id: confirmed.id }.into())
            }
        }
        Err(e) => {
            println!("{}", e);
            Err(e.into())
        }
    };
    println!("------------------------ end drain contract balance ------------------------\n");
    outcome
}
