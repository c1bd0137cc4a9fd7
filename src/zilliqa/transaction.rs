//! Transaction construction and signing.
//!
//! The signature covers a protobuf encoding of the transaction core fields;
//! the node re-encodes the submitted JSON the same way before verifying, so
//! the wire layout here has to match the network's schema exactly.

use prost::Message;
use serde::Serialize;

use super::address::Address;
use super::crypto::KeyPair;

#[derive(Clone, PartialEq, Message)]
struct ByteArray {
    #[prost(bytes = "vec", tag = "1")]
    data: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
struct ProtoTransactionCoreInfo {
    #[prost(uint32, optional, tag = "1")]
    version: Option<u32>,
    #[prost(uint64, optional, tag = "2")]
    nonce: Option<u64>,
    #[prost(bytes = "vec", tag = "3")]
    toaddr: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    senderpubkey: Option<ByteArray>,
    #[prost(message, optional, tag = "5")]
    amount: Option<ByteArray>,
    #[prost(message, optional, tag = "6")]
    gasprice: Option<ByteArray>,
    #[prost(uint64, optional, tag = "7")]
    gaslimit: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "8")]
    code: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "9")]
    data: Option<Vec<u8>>,
}

/// Core transaction fields before signing. Amounts are in Qa.
#[derive(Debug, Clone)]
pub struct TxParams {
    pub version: u32,
    pub nonce: u64,
    pub to_addr: Address,
    pub amount: u128,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub code: Option<String>,
    pub data: Option<String>,
    pub priority: bool,
}

impl TxParams {
    /// The exact byte string the network verifies the signature against.
    fn signing_bytes(&self, sender_pubkey: &[u8]) -> Vec<u8> {
        let core = ProtoTransactionCoreInfo {
            version: Some(self.version),
            nonce: Some(self.nonce),
            toaddr: self.to_addr.as_bytes().to_vec(),
            senderpubkey: Some(ByteArray {
                data: sender_pubkey.to_vec(),
            }),
            amount: Some(ByteArray {
                data: self.amount.to_be_bytes().to_vec(),
            }),
            gasprice: Some(ByteArray {
                data: self.gas_price.to_be_bytes().to_vec(),
            }),
            gaslimit: Some(self.gas_limit),
            code: self
                .code
                .as_ref()
                .filter(|code| !code.is_empty())
                .map(|code| code.as_bytes().to_vec()),
            data: self
                .data
                .as_ref()
                .filter(|data| !data.is_empty())
                .map(|data| data.as_bytes().to_vec()),
        };
        core.encode_to_vec()
    }

    pub fn sign(self, keypair: &KeyPair) -> SignedTransaction {
        let preimage = self.signing_bytes(&keypair.public_bytes());
        let signature = keypair.sign(&preimage);
        SignedTransaction {
            params: self,
            pub_key: hex::encode(keypair.public_bytes()),
            signature: hex::encode(signature.to_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub params: TxParams,
    pub pub_key: String,
    pub signature: String,
}

/// The `CreateTransaction` JSON parameter object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub version: u32,
    pub nonce: u64,
    pub to_addr: String,
    pub amount: String,
    pub pub_key: String,
    pub gas_price: String,
    pub gas_limit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub signature: String,
    pub priority: bool,
}

impl SignedTransaction {
    pub fn to_payload(&self) -> CreateTransactionPayload {
        CreateTransactionPayload {
            version: self.params.version,
            nonce: self.params.nonce,
            to_addr: self.params.to_addr.to_checksum(),
            amount: self.params.amount.to_string(),
            pub_key: self.pub_key.clone(),
            gas_price: self.params.gas_price.to_string(),
            gas_limit: self.params.gas_limit.to_string(),
            code: self.params.code.clone(),
            data: self.params.data.clone(),
            signature: self.signature.clone(),
            priority: self.params.priority,
        }
    }
}
