//! Digest computation for peer identities.
//!
//! Small keys are embedded verbatim in the id using the identity
//! multihash code, so the public key can be recovered from the id
//! alone. Larger keys (RSA) are committed to with SHA-256.

use crate::error::{PeerIdError, Result};
use crate::keys::PublicKey;

/// Multihash with enough digest room for the largest inline key.
pub type Multihash = multihash::Multihash<64>;

/// Identity ("no hash") multihash function code.
pub const IDENTITY_CODE: u64 = 0x00;

/// SHA-256 multihash function code.
pub const SHA2_256_CODE: u64 = 0x12;

/// Largest marshaled public key that is inlined into the id. Ed25519
/// (36 bytes) and compressed secp256k1 (37 bytes) fit; RSA does not.
pub const MAX_INLINE_KEY_LENGTH: usize = 42;

/// Compute the multihash id for a public key.
///
/// Deterministic: the same key always produces the same bytes.
pub fn compute_digest(public: &PublicKey) -> Result<Multihash> {
    let bytes = public.to_protobuf()?;
    if bytes.len() <= MAX_INLINE_KEY_LENGTH {
        Multihash::wrap(IDENTITY_CODE, &bytes)
            .map_err(|e| PeerIdError::InvalidId(format!("multihash: {e}")))
    } else {
        public.hash()
    }
}
