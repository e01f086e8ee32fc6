//! RSA key backend.
//!
//! Wire format: the public key is DER SubjectPublicKeyInfo (X.509),
//! the private key is DER PKCS#1, matching the go implementation's
//! `MarshalPKIXPublicKey` / `MarshalPKCS1PrivateKey` output.

use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{PeerIdError, Result};

pub(crate) fn generate(bits: usize) -> Result<RsaPrivateKey> {
    RsaPrivateKey::new(&mut rand::thread_rng(), bits)
        .map_err(|e| PeerIdError::KeyGeneration(format!("rsa: {e}")))
}

pub(crate) fn public_from_bytes(bytes: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid rsa public key: {e}")))
}

pub(crate) fn public_to_bytes(key: &RsaPublicKey) -> Result<Vec<u8>> {
    let doc = key
        .to_public_key_der()
        .map_err(|e| PeerIdError::InvalidKey(format!("rsa public key encoding: {e}")))?;
    Ok(doc.as_bytes().to_vec())
}

pub(crate) fn private_from_bytes(bytes: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_der(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("invalid rsa private key: {e}")))
}

pub(crate) fn private_to_bytes(key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let doc = key
        .to_pkcs1_der()
        .map_err(|e| PeerIdError::InvalidKey(format!("rsa private key encoding: {e}")))?;
    Ok(doc.as_bytes().to_vec())
}
