//! Key material handling for peer identities.
//!
//! This module provides:
//! - key pair generation for RSA, Ed25519 and secp256k1
//! - canonical protobuf marshal/unmarshal of public and private keys
//! - SHA-256 hashing of marshaled public keys
//!
//! The marshaled form (`PublicKeyProto`/`PrivateKeyProto`) is the
//! canonical byte representation everywhere in this crate: digests are
//! computed over it and key equality is defined by it.

mod ed25519;
mod rsa;
mod secp256k1;

use prost::Message;
use sha2::{Digest, Sha256};

use crate::digest::{Multihash, SHA2_256_CODE};
use crate::error::{PeerIdError, Result};
use crate::proto::{KeyTypeProto, PrivateKeyProto, PublicKeyProto};

/// Supported key algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Ed25519,
    Secp256k1,
}

impl KeyType {
    fn proto(self) -> KeyTypeProto {
        match self {
            Self::Rsa => KeyTypeProto::Rsa,
            Self::Ed25519 => KeyTypeProto::Ed25519,
            Self::Secp256k1 => KeyTypeProto::Secp256k1,
        }
    }

    fn from_proto(tag: i32) -> Result<Self> {
        match KeyTypeProto::try_from(tag) {
            Ok(KeyTypeProto::Rsa) => Ok(Self::Rsa),
            Ok(KeyTypeProto::Ed25519) => Ok(Self::Ed25519),
            Ok(KeyTypeProto::Secp256k1) => Ok(Self::Secp256k1),
            Err(_) => Err(PeerIdError::InvalidKey(format!(
                "unsupported key type tag {tag}"
            ))),
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rsa => "rsa",
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for KeyType {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(Self::Rsa),
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            other => Err(PeerIdError::InvalidKey(format!(
                "unknown key type '{other}'"
            ))),
        }
    }
}

/// A public key of any supported algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum PublicKey {
    Rsa(::rsa::RsaPublicKey),
    Ed25519(ed25519_dalek::VerifyingKey),
    Secp256k1(k256::ecdsa::VerifyingKey),
}

impl PublicKey {
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa(_) => KeyType::Rsa,
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// Algorithm-specific raw key bytes (the protobuf `Data` field).
    pub fn raw_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Rsa(key) => rsa::public_to_bytes(key),
            Self::Ed25519(key) => Ok(ed25519::public_to_bytes(key)),
            Self::Secp256k1(key) => Ok(secp256k1::public_to_bytes(key)),
        }
    }

    /// Canonical protobuf serialization, the byte form identities are
    /// derived from.
    pub fn to_protobuf(&self) -> Result<Vec<u8>> {
        let msg = PublicKeyProto {
            key_type: self.key_type().proto() as i32,
            data: self.raw_bytes()?,
        };
        Ok(msg.encode_to_vec())
    }

    /// SHA-256 multihash of the canonical serialization.
    pub fn hash(&self) -> Result<Multihash> {
        let digest = Sha256::digest(self.to_protobuf()?);
        Multihash::wrap(SHA2_256_CODE, &digest)
            .map_err(|e| PeerIdError::InvalidId(format!("multihash: {e}")))
    }
}

/// A private key of any supported algorithm.
///
/// Does not implement `Debug` with key material; only the algorithm
/// name is printed.
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(::rsa::RsaPrivateKey),
    Ed25519(ed25519_dalek::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
}

impl PrivateKey {
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa(_) => KeyType::Rsa,
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// Derive the public counterpart.
    pub fn public(&self) -> PublicKey {
        match self {
            Self::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
            Self::Secp256k1(key) => PublicKey::Secp256k1(*key.verifying_key()),
        }
    }

    /// Algorithm-specific raw key bytes (the protobuf `Data` field).
    pub fn raw_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Rsa(key) => rsa::private_to_bytes(key),
            Self::Ed25519(key) => Ok(ed25519::private_to_bytes(key)),
            Self::Secp256k1(key) => Ok(secp256k1::private_to_bytes(key)),
        }
    }

    /// Canonical protobuf serialization.
    pub fn to_protobuf(&self) -> Result<Vec<u8>> {
        let msg = PrivateKeyProto {
            key_type: self.key_type().proto() as i32,
            data: self.raw_bytes()?,
        };
        Ok(msg.encode_to_vec())
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({})", self.key_type())
    }
}

/// Generate a fresh key pair. `bits` is only consulted for RSA.
pub fn generate_key_pair(key_type: KeyType, bits: usize) -> Result<(PrivateKey, PublicKey)> {
    log::debug!("generating {key_type} key pair");
    let private = match key_type {
        KeyType::Rsa => PrivateKey::Rsa(rsa::generate(bits)?),
        KeyType::Ed25519 => PrivateKey::Ed25519(ed25519::generate()),
        KeyType::Secp256k1 => PrivateKey::Secp256k1(secp256k1::generate()),
    };
    let public = private.public();
    Ok((private, public))
}

/// Serialize a public key to its canonical protobuf form.
pub fn marshal_public_key(key: &PublicKey) -> Result<Vec<u8>> {
    key.to_protobuf()
}

/// Serialize a private key to its canonical protobuf form.
pub fn marshal_private_key(key: &PrivateKey) -> Result<Vec<u8>> {
    key.to_protobuf()
}

/// Parse a public key from its canonical protobuf form.
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<PublicKey> {
    let msg = PublicKeyProto::decode(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("public key protobuf: {e}")))?;
    match KeyType::from_proto(msg.key_type)? {
        KeyType::Rsa => Ok(PublicKey::Rsa(rsa::public_from_bytes(&msg.data)?)),
        KeyType::Ed25519 => Ok(PublicKey::Ed25519(ed25519::public_from_bytes(&msg.data)?)),
        KeyType::Secp256k1 => Ok(PublicKey::Secp256k1(secp256k1::public_from_bytes(
            &msg.data,
        )?)),
    }
}

/// Parse a private key from its canonical protobuf form.
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<PrivateKey> {
    let msg = PrivateKeyProto::decode(bytes)
        .map_err(|e| PeerIdError::InvalidKey(format!("private key protobuf: {e}")))?;
    match KeyType::from_proto(msg.key_type)? {
        KeyType::Rsa => Ok(PrivateKey::Rsa(rsa::private_from_bytes(&msg.data)?)),
        KeyType::Ed25519 => Ok(PrivateKey::Ed25519(ed25519::private_from_bytes(&msg.data)?)),
        KeyType::Secp256k1 => Ok(PrivateKey::Secp256k1(secp256k1::private_from_bytes(
            &msg.data,
        )?)),
    }
}
