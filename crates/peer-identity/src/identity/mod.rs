//! The peer identity value type.
//!
//! A `PeerId` is a multihash of a public key's canonical protobuf
//! serialization. The id is immutable for the lifetime of the value;
//! the attached key material is optional and may be filled in after
//! construction through unchecked setters, with `is_valid` available
//! as the explicit full re-verification.

pub mod codec;

use once_cell::sync::OnceCell;

use crate::digest::{compute_digest, Multihash, IDENTITY_CODE};
use crate::error::{PeerIdError, Result};
use crate::keys::{self, KeyType, PrivateKey, PublicKey};

/// A self-certifying peer identifier.
#[derive(Clone)]
pub struct PeerId {
    /// The multihash id. Never reassigned after construction.
    id: Multihash,
    /// Base58btc text of the id, derived solely from `id` at
    /// construction time.
    b58: String,
    /// CIDv1 text form, comparatively expensive, memoized on first use.
    cid_string: OnceCell<String>,
    private_key: Option<PrivateKey>,
    public_key: Option<PublicKey>,
}

impl PeerId {
    /// Construct from parts, enforcing key consistency.
    ///
    /// All public construction paths funnel through here.
    pub(crate) fn with_keys(
        id: Multihash,
        private_key: Option<PrivateKey>,
        public_key: Option<PublicKey>,
    ) -> Result<Self> {
        if let (Some(private), Some(public)) = (&private_key, &public_key) {
            if private.public().to_protobuf()? != public.to_protobuf()? {
                return Err(PeerIdError::InconsistentArguments);
            }
        }

        let b58 = bs58::encode(id.to_bytes()).into_string();
        Ok(Self {
            id,
            b58,
            cid_string: OnceCell::new(),
            private_key,
            public_key,
        })
    }

    /// Generate a fresh identity from a new key pair.
    ///
    /// `bits` is only consulted for RSA. Key generation is CPU-bound
    /// (RSA especially); callers on async executors should wrap this
    /// in their blocking facility.
    pub fn generate(key_type: KeyType, bits: usize) -> Result<Self> {
        let (private, public) = keys::generate_key_pair(key_type, bits)?;
        let digest = compute_digest(&public)?;
        let peer = Self::with_keys(digest, Some(private), Some(public))?;
        log::debug!("generated {key_type} identity {}", peer.b58);
        Ok(peer)
    }

    /// Wrap raw multihash bytes. No validation beyond multihash
    /// well-formedness.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let id = Multihash::from_bytes(bytes)
            .map_err(|e| PeerIdError::InvalidId(e.to_string()))?;
        Self::with_keys(id, None, None)
    }

    /// Build from a public key, computing the digest.
    pub fn from_public_key(public: PublicKey) -> Result<Self> {
        let digest = compute_digest(&public)?;
        Self::with_keys(digest, None, Some(public))
    }

    /// Build from a private key; the public counterpart is derived and
    /// attached as well.
    pub fn from_private_key(private: PrivateKey) -> Result<Self> {
        let public = private.public();
        let digest = compute_digest(&public)?;
        Self::with_keys(digest, Some(private), Some(public))
    }

    /// The multihash id.
    pub fn multihash(&self) -> &Multihash {
        &self.id
    }

    /// The attached private key, if any.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Attach a private key after construction.
    ///
    /// Unchecked fast path: the id is not recomputed and no
    /// consistency check runs. Use [`PeerId::is_valid`] to verify.
    pub fn set_private_key(&mut self, private: PrivateKey) {
        self.private_key = Some(private);
    }

    /// Attach a public key after construction.
    ///
    /// Unchecked fast path, see [`PeerId::set_private_key`].
    pub fn set_public_key(&mut self, public: PublicKey) {
        self.public_key = Some(public);
    }

    /// Resolve the public key.
    ///
    /// Priority: explicitly attached key, then the private key's
    /// public half, then a key recovered from an inline digest.
    /// Decode failures while probing the digest mean "no inline key"
    /// and are not surfaced.
    pub fn public_key(&self) -> Option<PublicKey> {
        if let Some(public) = &self.public_key {
            return Some(public.clone());
        }

        if let Some(private) = &self.private_key {
            return Some(private.public());
        }

        if self.id.code() == IDENTITY_CODE {
            if let Ok(public) = keys::unmarshal_public_key(self.id.digest()) {
                return Some(public);
            }
        }

        None
    }

    /// Whether the id embeds the public key verbatim.
    pub fn has_inline_public_key(&self) -> bool {
        self.id.code() == IDENTITY_CODE
    }

    /// Full re-verification of the private/public key binding, for use
    /// after the unchecked setters.
    pub fn is_valid(&self) -> bool {
        let Some(private) = &self.private_key else {
            return false;
        };
        let Some(public) = self.public_key() else {
            return false;
        };
        match (private.public().to_protobuf(), public.to_protobuf()) {
            (Ok(derived), Ok(attached)) => derived == attached,
            _ => false,
        }
    }

    /// Short human label, e.g. `<peer.ID 2sunRF>`.
    ///
    /// SHA-256 ids all start with `Qm` in base58; the prefix is
    /// dropped to keep the informative part.
    pub fn to_printable(&self) -> String {
        let b58 = self.b58.strip_prefix("Qm").unwrap_or(&self.b58);
        let short: String = b58.chars().take(6).collect();
        format!("<peer.ID {short}>")
    }
}

impl std::fmt::Debug for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PeerId").field(&self.b58).finish()
    }
}

impl PartialEq for PeerId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PeerId {}

impl std::hash::Hash for PeerId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Byte-exact comparison against a raw multihash buffer.
impl PartialEq<[u8]> for PeerId {
    fn eq(&self, other: &[u8]) -> bool {
        self.id.to_bytes() == other
    }
}

impl PartialEq<&[u8]> for PeerId {
    fn eq(&self, other: &&[u8]) -> bool {
        self == *other
    }
}
