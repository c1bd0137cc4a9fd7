//! Schnorr signatures over secp256k1 as Zilliqa nodes verify them.
//!
//! Signing commits to the compressed nonce point, the compressed public key
//! and the raw message: `r = SHA256(Q || pubkey || msg) mod n` and
//! `s = k - r * sk mod n`. The wire form is `r || s`, 64 bytes.

use k256::{
    elliptic_curve::{group::Group, ops::Reduce, sec1::ToEncodedPoint, Field, PrimeField},
    FieldBytes, ProjectivePoint, PublicKey, Scalar, U256,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::Error;

pub const SIGNATURE_LENGTH: usize = 64;

pub const PUBLIC_KEY_LENGTH: usize = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    #[allow(dead_code)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidKey(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            )));
        }
        let r = Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(&bytes[..32])))
            .ok_or_else(|| Error::InvalidKey("signature r out of range".into()))?;
        let s = Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(&bytes[32..])))
            .ok_or_else(|| Error::InvalidKey("signature s out of range".into()))?;
        Ok(Signature { r, s })
    }
}

fn challenge(nonce_point: &ProjectivePoint, pubkey: &[u8; PUBLIC_KEY_LENGTH], msg: &[u8]) -> Scalar {
    let encoded = nonce_point.to_affine().to_encoded_point(true);
    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    hasher.update(pubkey);
    hasher.update(msg);
    <Scalar as Reduce<U256>>::reduce_bytes(&hasher.finalize())
}

/// Signs `msg` with a fresh random nonce, retrying on the (negligible)
/// chance of a zero challenge or zero `s`.
pub fn sign(secret: &Scalar, pubkey: &[u8; PUBLIC_KEY_LENGTH], msg: &[u8]) -> Signature {
    loop {
        let k = Scalar::random(&mut OsRng);
        if bool::from(k.is_zero()) {
            continue;
        }
        let nonce_point = ProjectivePoint::GENERATOR * k;
        let r = challenge(&nonce_point, pubkey, msg);
        if bool::from(r.is_zero()) {
            continue;
        }
        let s = k - r * secret;
        if bool::from(s.is_zero()) {
            continue;
        }
        return Signature { r, s };
    }
}

/// Verifies by reconstructing the nonce point `Q = sG + rP` and recomputing
/// the challenge.
#[allow(dead_code)]
pub fn verify(signature: &Signature, public_key: &PublicKey, msg: &[u8]) -> bool {
    if bool::from(signature.r.is_zero()) || bool::from(signature.s.is_zero()) {
        return false;
    }

    let nonce_point = ProjectivePoint::GENERATOR * signature.s
        + public_key.to_projective() * signature.r;
    if bool::from(nonce_point.is_identity()) {
        return false;
    }

    let encoded = public_key.to_encoded_point(true);
    let mut pubkey = [0u8; PUBLIC_KEY_LENGTH];
    pubkey.copy_from_slice(encoded.as_bytes());

    challenge(&nonce_point, &pubkey, msg) == signature.r
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::SecretKey;

    fn test_key() -> (Scalar, [u8; PUBLIC_KEY_LENGTH], PublicKey) {
        let secret = SecretKey::from_slice(
            &hex::decode("d96e9eb5b782a80ea153c937fa83e5948485fbfc8b7e7c069d7b914dbc350aba")
                .unwrap(),
        )
        .unwrap();
        let public = secret.public_key();
        let mut compressed = [0u8; PUBLIC_KEY_LENGTH];
        compressed.copy_from_slice(public.to_encoded_point(true).as_bytes());
        (*secret.to_nonzero_scalar(), compressed, public)
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let (secret, compressed, public) = test_key();
        let msg = b"drain the contract balance";
        let signature = sign(&secret, &compressed, msg);
        assert!(verify(&signature, &public, msg));
    }

    #[test]
    fn test_tampered_message_fails() {
        let (secret, compressed, public) = test_key();
        let signature = sign(&secret, &compressed, b"original message");
        assert!(!verify(&signature, &public, b"tampered message"));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let (secret, compressed, public) = test_key();
        let msg = b"original message";
        let signature = sign(&secret, &compressed, msg);
        let mut bytes = signature.to_bytes();
        bytes[0] ^= 0x01;
        if let Ok(mangled) = Signature::from_bytes(&bytes) {
            assert!(!verify(&mangled, &public, msg));
        }
    }

    #[test]
    fn test_signature_byte_roundtrip() {
        let (secret, compressed, _) = test_key();
        let signature = sign(&secret, &compressed, b"roundtrip");
        let decoded = Signature::from_bytes(&signature.to_bytes()).unwrap();
        assert_eq!(decoded, signature);
    }

    #[test]
    fn test_from_bytes_rejects_bad_length() {
        assert!(Signature::from_bytes(&[0u8; 63]).is_err());
        assert!(Signature::from_bytes(&[0u8; 65]).is_err());
    }
}
