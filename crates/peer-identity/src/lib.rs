//! peer-identity — self-certifying peer identifiers.
//!
//! A [`PeerId`] names a participant in a peer-to-peer network: a
//! multihash of the canonical serialization of its public key,
//! optionally carrying the key material it is bound to. Identities for
//! small keys (Ed25519, secp256k1) embed the key verbatim in the id;
//! RSA identities carry a SHA-256 commitment instead.
//!
//! The crate covers every wire and text representation of the libp2p
//! peer-id format: raw multihash bytes, hex, base58btc, version-1
//! `libp2p-key` CIDs (with legacy `dag-pb`/version-0 acceptance),
//! JSON and protobuf.
//!
//! ```no_run
//! use peer_identity::{KeyType, PeerId};
//!
//! let peer = PeerId::generate(KeyType::Ed25519, 0)?;
//! assert!(peer.has_inline_public_key());
//! let restored: PeerId = peer.to_base58().parse()?;
//! assert_eq!(restored, peer);
//! # Ok::<(), peer_identity::PeerIdError>(())
//! ```

pub mod digest;
pub mod error;
pub mod identity;
pub mod keys;
pub mod proto;

// Re-export primary types
pub use error::{PeerIdError, Result};
pub use identity::codec::PeerIdJson;
pub use identity::PeerId;
pub use keys::{KeyType, PrivateKey, PublicKey};
