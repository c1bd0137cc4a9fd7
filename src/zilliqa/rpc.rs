use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::address::Address;
use super::transaction::CreateTransactionPayload;
use super::{BalanceInfo, CreateTransactionResponse, GetTransactionResponse};
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    id: &'a str,
    jsonrpc: &'a str,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for a single Zilliqa node endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(RpcClient {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    async fn request<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<T> {
        debug!(method, endpoint = %self.endpoint, "sending rpc request");

        let body = RpcRequest {
            id: "1",
            jsonrpc: "2.0",
            method,
            params,
        };

        let response: RpcResponse<T> = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| {
            Error::Protocol(format!("{} returned neither result nor error", method))
        })
    }

    /// Balance and nonce of an account. The nonce feeds the next
    /// transaction: the network expects `account nonce + 1`.
    pub async fn get_balance(&self, address: &Address) -> Result<BalanceInfo> {
        self.request("GetBalance", (address.to_hex(),)).await
    }

    /// Lowest gas price (in Qa) the network currently accepts.
    pub async fn get_minimum_gas_price(&self) -> Result<String> {
        self.request("GetMinimumGasPrice", ("",)).await
    }

    pub async fn create_transaction(
        &self,
        payload: &CreateTransactionPayload,
    ) -> Result<CreateTransactionResponse> {
        self.request("CreateTransaction", (payload,)).await
    }

    pub async fn get_transaction(&self, id: &str) -> Result<GetTransactionResponse> {
        self.request("GetTransaction", (id,)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_response_parses() {
        let raw = r#"{"result":{"balance":"18446744073637511711","nonce":16}}"#;
        let response: RpcResponse<BalanceInfo> = serde_json::from_str(raw).unwrap();
        let info = response.result.unwrap();
        assert_eq!(info.balance, "18446744073637511711");
        assert_eq!(info.nonce, 16);
    }

    #[test]
    fn test_create_transaction_response_parses() {
        let raw = r#"{"result":{"Info":"Contract Txn, Sent To Ds","TranID":"2d1eea871d8845472e98dbe9b7a7d788fbcce226f52e4216612592167b89042c"}}"#;
        let response: RpcResponse<CreateTransactionResponse> = serde_json::from_str(raw).unwrap();
        let created = response.result.unwrap();
        assert_eq!(
            created.tran_id,
            "2d1eea871d8845472e98dbe9b7a7d788fbcce226f52e4216612592167b89042c"
        );
    }

    #[test]
    fn test_transaction_with_receipt_parses() {
        let raw = r#"{"result":{"ID":"2d1eea871d8845472e98dbe9b7a7d788fbcce226f52e4216612592167b89042c","amount":"0","gasLimit":"10000","gasPrice":"1000000000","nonce":"17","receipt":{"cumulative_gas":"878","epoch_num":"589742","success":true,"accepted":false},"senderPubKey":"0x0346e7b3","signature":"0xabcd","toAddr":"26b628f7a15584e2c6578b8b6572ae226c25ba3d","version":"65537"}}"#;
        let response: RpcResponse<GetTransactionResponse> = serde_json::from_str(raw).unwrap();
        let tx = response.result.unwrap();
        assert!(tx.receipt.success);
        assert_eq!(tx.receipt.cumulative_gas, "878");
        assert_eq!(tx.receipt.epoch_num, "589742");
        assert_eq!(tx.receipt.extra["accepted"], false);
    }

    #[tokio::test]
    async fn test_dead_endpoint_is_transport_error() {
        // Port 1 is never listening; the request fails before any RPC
        // exchange happens.
        let client = RpcClient::new("http://127.0.0.1:1").unwrap();
        let address = Address::from_hex("0x26b628f7a15584e2c6578b8b6572ae226c25ba3d").unwrap();
        let result = client.get_balance(&address).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_error_object_maps_to_rpc_error() {
        let raw = r#"{"error":{"code":-20,"message":"Txn Hash not Present"},"result":null}"#;
        let response: RpcResponse<GetTransactionResponse> = serde_json::from_str(raw).unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -20);
        assert_eq!(error.message, "Txn Hash not Present");
    }
}
