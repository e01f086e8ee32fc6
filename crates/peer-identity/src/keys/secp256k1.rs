//! secp256k1 key backend.
//!
//! Wire format: the public key is the 33-byte compressed SEC1 point,
//! the private key is the 32-byte scalar.

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::error::{PeerIdError, Result};

pub(crate) fn generate() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

pub(crate) fn public_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid secp256k1 public key: {e}")))
}

pub(crate) fn public_to_bytes(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(true).as_bytes().to_vec()
}

pub(crate) fn private_from_bytes(bytes: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid secp256k1 private key: {e}")))
}

pub(crate) fn private_to_bytes(key: &SigningKey) -> Vec<u8> {
    key.to_bytes().to_vec()
}
