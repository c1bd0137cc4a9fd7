use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use super::address::Address;
use super::crypto::KeyPair;
use super::rpc::RpcClient;
use super::transaction::TxParams;
use super::ConfirmedTransaction;
use crate::error::{Error, Result};

/// One named argument of a Scilla transition.
#[derive(Debug, Clone, Serialize)]
pub struct ScillaParam {
    pub vname: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: serde_json::Value,
}

/// Transaction parameters for a single transition call. Gas price and
/// amount are in Qa.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub version: u32,
    pub amount: u128,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub priority: bool,
    pub attempts: u32,
    pub interval: Duration,
}

/// A callable handle on a deployed contract.
pub struct Contract {
    address: Address,
    client: RpcClient,
}

impl Contract {
    pub fn at(address: Address, client: RpcClient) -> Self {
        Contract { address, client }
    }

    /// Signs and submits a transition call, then waits for the receipt.
    ///
    /// The sender nonce is read from the network immediately before
    /// submission; nothing is persisted between calls, so two runs with the
    /// same configuration submit two independent transactions.
    pub async fn call(
        &self,
        signer: &KeyPair,
        transition: &str,
        args: &[ScillaParam],
        opts: &CallOptions,
    ) -> Result<ConfirmedTransaction> {
        let data = json!({ "_tag": transition, "params": args }).to_string();

        let balance = self.client.get_balance(&signer.address()).await?;
        debug!(nonce = balance.nonce, balance = %balance.balance, "fetched sender account state");

        let params = TxParams {
            version: opts.version,
            nonce: balance.nonce + 1,
            to_addr: self.address,
            amount: opts.amount,
            gas_price: opts.gas_price,
            gas_limit: opts.gas_limit,
            code: None,
            data: Some(data),
            priority: opts.priority,
        };

        let signed = params.sign(signer);
        let created = self.client.create_transaction(&signed.to_payload()).await?;
        info!(id = %created.tran_id, info = %created.info, "transaction submitted");

        self.confirm(&created.tran_id, opts.attempts, opts.interval)
            .await
    }

    /// Polls `GetTransaction` until the receipt appears or the attempt
    /// budget runs out. A transaction that is not yet in a block comes back
    /// as an RPC error, so per-poll failures are logged and retried rather
    /// than propagated.
    async fn confirm(
        &self,
        id: &str,
        attempts: u32,
        interval: Duration,
    ) -> Result<ConfirmedTransaction> {
        for attempt in 1..=attempts {
            match self.client.get_transaction(id).await {
                Ok(tx) => {
                    info!(id, attempt, "transaction confirmed");
                    return Ok(ConfirmedTransaction {
                        id: tx.id,
                        receipt: tx.receipt,
                    });
                }
                Err(e) => {
                    debug!(id, attempt, error = %e, "transaction not confirmed yet");
                }
            }
            if attempt < attempts {
                sleep(interval).await;
            }
        }

        Err(Error::ConfirmationTimeout {
            id: id.to_string(),
            attempts,
        })
    }
}
