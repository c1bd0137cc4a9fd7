use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey, Scalar, SecretKey};
use sha2::{Digest, Sha256};

use super::address::Address;
use super::schnorr::{self, Signature, PUBLIC_KEY_LENGTH};
use crate::error::Error;

const SECRET_KEY_LENGTH: usize = 32;

/// A secp256k1 keypair held in memory for the lifetime of one run.
pub struct KeyPair {
    secret: Scalar,
    public: PublicKey,
}

impl KeyPair {
    /// Parses a 32-byte secret key from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(hex_part)
            .map_err(|_| Error::InvalidKey("not valid hex".to_string()))?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(Error::InvalidKey(format!(
                "expected {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            )));
        }

        let secret_key = SecretKey::from_slice(&bytes)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        let public = secret_key.public_key();
        Ok(KeyPair {
            secret: *secret_key.to_nonzero_scalar(),
            public,
        })
    }

    /// Compressed SEC1 encoding of the public key.
    pub fn public_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let encoded = self.public.to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    #[allow(dead_code)]
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The account address: last 20 bytes of SHA256 over the compressed
    /// public key.
    pub fn address(&self) -> Address {
        let hash = Sha256::digest(self.public_bytes());
        let mut raw = [0u8; 20];
        raw.copy_from_slice(&hash[12..]);
        Address::new(raw)
    }

    pub fn sign(&self, msg: &[u8]) -> Signature {
        schnorr::sign(&self.secret, &self.public_bytes(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zilliqa::schnorr::verify;

    const KEY_A: &str = "d96e9eb5b782a80ea153c937fa83e5948485fbfc8b7e7c069d7b914dbc350aba";
    const KEY_B: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_address_is_deterministic() {
        let first = KeyPair::from_hex(KEY_A).unwrap().address();
        let second = KeyPair::from_hex(KEY_A).unwrap().address();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefixed_key_matches_bare() {
        let bare = KeyPair::from_hex(KEY_A).unwrap();
        let prefixed = KeyPair::from_hex(&format!("0x{}", KEY_A)).unwrap();
        let upper_prefixed = KeyPair::from_hex(&format!("0X{}", KEY_A)).unwrap();
        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(bare.address(), upper_prefixed.address());
    }

    #[test]
    fn test_distinct_keys_distinct_addresses() {
        let a = KeyPair::from_hex(KEY_A).unwrap();
        let b = KeyPair::from_hex(KEY_B).unwrap();
        assert_ne!(a.address(), b.address());
        assert_ne!(a.public_bytes(), b.public_bytes());
    }

    #[test]
    fn test_sign_matches_public_key() {
        let keypair = KeyPair::from_hex(KEY_A).unwrap();
        let msg = b"one-shot admin call";
        let signature = keypair.sign(msg);
        assert!(verify(&signature, keypair.public_key(), msg));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(KeyPair::from_hex("").is_err());
        assert!(KeyPair::from_hex("abcd").is_err());
        assert!(KeyPair::from_hex("zz6e9eb5b782a80ea153c937fa83e5948485fbfc8b7e7c069d7b914dbc350aba").is_err());
        // All-zero bytes are not a valid scalar.
        assert!(KeyPair::from_hex(&"00".repeat(32)).is_err());
    }
}
