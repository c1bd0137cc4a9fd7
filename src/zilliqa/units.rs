//! Zilliqa denomination and transaction-version helpers.
//!
//! Qa is the minimal unit; 1 Li = 10^6 Qa and 1 ZIL = 10^12 Qa. Gas prices
//! are configured in Li and converted to Qa before hitting the wire.

pub const QA_PER_LI: u128 = 1_000_000;
pub const QA_PER_ZIL: u128 = 1_000_000_000_000;

/// Message version understood by current Zilliqa nodes.
pub const MSG_VERSION: u16 = 1;

pub fn li_to_qa(li: u64) -> u128 {
    u128::from(li) * QA_PER_LI
}

#[allow(dead_code)]
pub fn zil_to_qa(zil: u64) -> u128 {
    u128::from(zil) * QA_PER_ZIL
}

/// Packs the chain id and message version into the transaction version
/// field: chain id in the upper 16 bits, message version in the lower 16.
pub fn pack_version(chain_id: u16, msg_version: u16) -> u32 {
    (u32::from(chain_id) << 16) | u32::from(msg_version)
}
