//! Protobuf wire messages.
//!
//! Field numbers and proto2 semantics are frozen for interoperability
//! with the go and js implementations of the same identity format:
//!
//! ```text
//! enum KeyType { RSA = 0; Ed25519 = 1; Secp256k1 = 2; }
//! message PublicKey  { required KeyType Type = 1; required bytes Data = 2; }
//! message PrivateKey { required KeyType Type = 1; required bytes Data = 2; }
//! message PeerIdProto { bytes id = 1; bytes pubKey = 2; bytes privKey = 3; }
//! ```
//!
//! The messages are derived by hand with `prost` rather than generated
//! from `.proto` files so the crate builds without protoc. The key
//! `Type` field is `required`: it must be emitted even for the zero
//! value (RSA), otherwise the serialized key — and therefore the
//! digest derived from it — would not match other implementations.

/// Key algorithm tag used inside marshaled keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum KeyTypeProto {
    Rsa = 0,
    Ed25519 = 1,
    Secp256k1 = 2,
}

/// Canonical serialized form of a public key.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PublicKeyProto {
    #[prost(enumeration = "KeyTypeProto", required, tag = "1")]
    pub key_type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: Vec<u8>,
}

/// Canonical serialized form of a private key.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PrivateKeyProto {
    #[prost(enumeration = "KeyTypeProto", required, tag = "1")]
    pub key_type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: Vec<u8>,
}

/// Serialized form of a whole peer identity, all fields optional.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PeerIdProto {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub id: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub pub_key: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub priv_key: Option<Vec<u8>>,
}
