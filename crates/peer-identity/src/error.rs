//! Error types for peer-identity.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

/// Peer identity error types covering construction and codec operations.
#[derive(Debug, thiserror::Error)]
pub enum PeerIdError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("inconsistent arguments: private and public key do not match")]
    InconsistentArguments,

    /// A recomputed digest disagrees with supplied material during
    /// JSON or protobuf import.
    #[error("{0}")]
    KeyMismatch(&'static str),

    #[error("protobuf did not contain any usable key material")]
    NoUsableKeyMaterial,

    #[error("invalid CID: {0}")]
    InvalidCid(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid protobuf: {0}")]
    InvalidProtobuf(String),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}

impl PeerIdError {
    /// Mismatch between an independently supplied public and private key.
    pub(crate) const PUBLIC_PRIVATE: &'static str = "public and private key do not match";
    /// Mismatch between a supplied id and the private-key-derived digest.
    pub(crate) const ID_PRIVATE: &'static str = "id and private key do not match";
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PeerIdError>;
