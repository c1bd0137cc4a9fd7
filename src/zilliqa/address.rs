use bech32::{FromBase32, ToBase32, Variant};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::Error;

const ADDRESS_LENGTH: usize = 20;
const BECH32_HRP: &str = "zil";

/// A 20-byte Zilliqa account or contract address.
///
/// Accepted text forms are bech32 (`zil1...`) and hex (`0x...` or bare).
/// Mixed-case hex is treated as checksummed and validated; all-lowercase
/// hex is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    /// Auto-detects the text form: bech32 when the string carries the `zil`
    /// prefix, hex otherwise.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.to_ascii_lowercase().starts_with("zil1") {
            Self::from_bech32(input)
        } else {
            Self::from_hex(input)
        }
    }

    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let hex_part = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if hex_part.len() != ADDRESS_LENGTH * 2 {
            return Err(Error::InvalidAddress(format!(
                "{} (expected {} hex characters, got {})",
                input,
                ADDRESS_LENGTH * 2,
                hex_part.len()
            )));
        }

        let bytes = hex::decode(hex_part)
            .map_err(|_| Error::InvalidAddress(format!("{} (not valid hex)", input)))?;
        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&bytes);
        let address = Address(raw);

        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && format!("0x{}", hex_part) != address.to_checksum() {
            return Err(Error::InvalidAddress(format!(
                "{} (checksum mismatch)",
                input
            )));
        }

        Ok(address)
    }

    pub fn from_bech32(input: &str) -> Result<Self, Error> {
        let (hrp, data, variant) = bech32::decode(input)
            .map_err(|e| Error::InvalidAddress(format!("{} ({})", input, e)))?;

        if hrp != BECH32_HRP {
            return Err(Error::InvalidAddress(format!(
                "{} (expected '{}' prefix, got '{}')",
                input, BECH32_HRP, hrp
            )));
        }
        if variant != Variant::Bech32 {
            return Err(Error::InvalidAddress(format!(
                "{} (not a bech32 encoding)",
                input
            )));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| Error::InvalidAddress(format!("{} ({})", input, e)))?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(Error::InvalidAddress(format!(
                "{} (decodes to {} bytes, expected {})",
                input,
                bytes.len(),
                ADDRESS_LENGTH
            )));
        }

        let mut raw = [0u8; ADDRESS_LENGTH];
        raw.copy_from_slice(&bytes);
        Ok(Address(raw))
    }

    pub fn to_bech32(&self) -> String {
        // Infallible for a fixed valid HRP and 20-byte payload.
        bech32::encode(BECH32_HRP, self.0.to_base32(), Variant::Bech32)
            .unwrap_or_else(|_| format!("0x{}", hex::encode(self.0)))
    }

    /// Zilliqa checksummed hex form: hex digit `i` is uppercased when bit
    /// `255 - 6*i` of `SHA256(address bytes)` is set.
    pub fn to_checksum(&self) -> String {
        let hash = Sha256::digest(self.0);
        let lower = hex::encode(self.0);

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            if c.is_ascii_alphabetic() {
                let bit_index = 6 * i;
                let set = hash[bit_index / 8] & (0x80 >> (bit_index % 8)) != 0;
                out.push(if set { c.to_ascii_uppercase() } else { c });
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Lowercase hex without the `0x` prefix, the form the JSON-RPC
    /// `GetBalance` call expects.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published reference pair for the zil HRP.
    const HEX_VECTOR: &str = "0x1d19918a737306218b5cbb3241fcdcbd998c3a72";
    const BECH32_VECTOR: &str = "zil1r5verznnwvrzrz6uhveyrlxuhkvccwnju4aehf";

    #[test]
    fn test_bech32_encode() {
        let address = Address::from_hex(HEX_VECTOR).unwrap();
        assert_eq!(address.to_bech32(), BECH32_VECTOR);
    }

    #[test]
    fn test_bech32_decode() {
        let address = Address::from_bech32(BECH32_VECTOR).unwrap();
        assert_eq!(format!("0x{}", address.to_hex()), HEX_VECTOR);
    }

    #[test]
    fn test_checksum_casing() {
        let address = Address::from_hex("0x26b628f7a15584e2c6578b8b6572ae226c25ba3d").unwrap();
        assert_eq!(
            address.to_checksum(),
            "0x26b628F7a15584e2c6578B8B6572ae226c25bA3D"
        );
    }

    #[test]
    fn test_checksummed_input_accepted() {
        let address = Address::from_hex("0x26b628F7a15584e2c6578B8B6572ae226c25bA3D").unwrap();
        assert_eq!(address.to_hex(), "26b628f7a15584e2c6578b8b6572ae226c25ba3d");
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Same address with two casing bits flipped.
        assert!(Address::from_hex("0x26B628f7a15584e2c6578B8B6572ae226c25bA3D").is_err());
    }

    #[test]
    fn test_parse_auto_detects() {
        let from_bech32 = Address::parse(BECH32_VECTOR).unwrap();
        let from_hex = Address::parse(HEX_VECTOR).unwrap();
        assert_eq!(from_bech32, from_hex);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("zil1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq").is_err());
        assert!(Address::from_hex("0xgg19918a737306218b5cbb3241fcdcbd998c3a72").is_err());
        // Valid bech32, wrong prefix.
        assert!(Address::from_bech32("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").is_err());
    }
}
