//! Ed25519 key backend.
//!
//! Wire format: the public key is the 32 raw point bytes; the private
//! key is the 64-byte secret‖public concatenation produced by the go
//! and js implementations. A bare 32-byte secret is also accepted on
//! unmarshal.

use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::error::{PeerIdError, Result};

pub(crate) fn generate() -> SigningKey {
    SigningKey::generate(&mut rand::thread_rng())
}

pub(crate) fn public_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| PeerIdError::InvalidKey("ed25519 public key must be 32 bytes".into()))?;
    VerifyingKey::from_bytes(&arr)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid ed25519 public key: {e}")))
}

pub(crate) fn public_to_bytes(key: &VerifyingKey) -> Vec<u8> {
    key.to_bytes().to_vec()
}

pub(crate) fn private_from_bytes(bytes: &[u8]) -> Result<SigningKey> {
    match bytes.len() {
        64 => {
            let mut arr = [0u8; 64];
            arr.copy_from_slice(bytes);
            SigningKey::from_keypair_bytes(&arr)
                .map_err(|e| PeerIdError::InvalidKey(format!("invalid ed25519 key pair: {e}")))
        }
        32 => {
            let mut arr = [0u8; 32];
            arr.copy_from_slice(bytes);
            Ok(SigningKey::from_bytes(&arr))
        }
        n => Err(PeerIdError::InvalidKey(format!(
            "ed25519 private key must be 64 or 32 bytes, got {n}"
        ))),
    }
}

pub(crate) fn private_to_bytes(key: &SigningKey) -> Vec<u8> {
    key.to_keypair_bytes().to_vec()
}
