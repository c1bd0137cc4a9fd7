pub mod address;
pub mod contract;
pub mod crypto;
pub mod rpc;
pub mod schnorr;
pub mod transaction;
pub mod units;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a `GetBalance` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub balance: String,
    pub nonce: u64,
}

/// Result of a `CreateTransaction` submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(rename = "TranID")]
    pub tran_id: String,
    #[serde(rename = "Info")]
    pub info: String,
}

/// Execution record attached to a confirmed transaction. Only the success
/// flag is interpreted here; event logs, transitions and error details are
/// carried through untouched for printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub success: bool,
    pub cumulative_gas: String,
    pub epoch_num: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Result of a `GetTransaction` query once the transaction is in a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTransactionResponse {
    #[serde(rename = "ID")]
    pub id: String,
    pub receipt: TransactionReceipt,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A submitted transaction together with its network receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedTransaction {
    pub id: String,
    pub receipt: TransactionReceipt,
}
