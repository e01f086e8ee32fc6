//! Text, CID, JSON and protobuf codecs for [`PeerId`].
//!
//! Every conversion is a pure function of the identity's state; the
//! only hidden effect is memoization of the CIDv1 text form.
//!
//! Interop notes:
//! - the JSON form matches the go-ipfs config file layout: base58 id,
//!   base64pad (standard, padded) key fields, absent when unresolvable.
//! - CID inputs accept the `libp2p-key` tag and the legacy `dag-pb`
//!   tag used by version-0 identifiers; output always renders as a
//!   version-1 `libp2p-key` CID in base32.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use cid::Cid;
use prost::Message;
use serde::{Deserialize, Serialize};

use super::PeerId;
use crate::digest::{compute_digest, Multihash};
use crate::error::{PeerIdError, Result};
use crate::keys;
use crate::proto::PeerIdProto;

/// Multicodec tag for public-key CIDs.
pub(crate) const LIBP2P_KEY_CODEC: u64 = 0x72;
/// Legacy Merkle-DAG tag carried by version-0 identifiers.
pub(crate) const DAG_PB_CODEC: u64 = 0x70;

/// JSON form of a peer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerIdJson {
    /// Base58btc text of the multihash id.
    pub id: String,
    /// Base64pad of the marshaled public key.
    #[serde(rename = "pubKey", skip_serializing_if = "Option::is_none", default)]
    pub pub_key: Option<String>,
    /// Base64pad of the marshaled private key.
    #[serde(rename = "privKey", skip_serializing_if = "Option::is_none", default)]
    pub priv_key: Option<String>,
}

impl PeerId {
    // ── Binary and text output ───────────────────────────────────────────

    /// The raw multihash bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.id.to_bytes()
    }

    /// Hex text of the id, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.id.to_bytes())
    }

    /// Base58btc text of the id, no multibase prefix.
    pub fn to_base58(&self) -> &str {
        &self.b58
    }

    /// Version-1 `libp2p-key` CID in base32, memoized on first call.
    pub fn to_cid_string(&self) -> &str {
        self.cid_string
            .get_or_init(|| Cid::new_v1(LIBP2P_KEY_CODEC, self.id).to_string())
    }

    // ── Binary and text input ────────────────────────────────────────────

    /// Decode from unprefixed hex text.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|e| PeerIdError::InvalidEncoding(format!("hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Decode from unprefixed base58btc text.
    pub fn from_base58(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| PeerIdError::InvalidEncoding(format!("base58: {e}")))?;
        Self::from_bytes(&bytes)
    }

    // ── CID ──────────────────────────────────────────────────────────────

    /// Extract the id from a CID, rejecting unsupported multicodecs.
    pub fn from_cid(cid: &Cid) -> Result<Self> {
        if cid.codec() != LIBP2P_KEY_CODEC && cid.codec() != DAG_PB_CODEC {
            return Err(PeerIdError::InvalidCid(format!(
                "unsupported multicodec 0x{:x}",
                cid.codec()
            )));
        }
        Self::with_keys(*cid.hash(), None, None)
    }

    /// Parse a binary CID and extract the id.
    pub fn from_cid_bytes(bytes: &[u8]) -> Result<Self> {
        let cid = Cid::try_from(bytes).map_err(|e| PeerIdError::InvalidCid(e.to_string()))?;
        Self::from_cid(&cid)
    }

    // ── Keys ─────────────────────────────────────────────────────────────

    /// Build from a marshaled public key.
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_public_key(keys::unmarshal_public_key(bytes)?)
    }

    /// Build from a base64pad marshaled public key.
    pub fn from_public_key_b64(s: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(s)
            .map_err(|e| PeerIdError::InvalidEncoding(format!("base64: {e}")))?;
        Self::from_public_key_bytes(&bytes)
    }

    /// Build from a marshaled private key.
    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_private_key(keys::unmarshal_private_key(bytes)?)
    }

    /// Build from a base64pad marshaled private key.
    pub fn from_private_key_b64(s: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(s)
            .map_err(|e| PeerIdError::InvalidEncoding(format!("base64: {e}")))?;
        Self::from_private_key_bytes(&bytes)
    }

    /// Marshaled form of the resolvable public key, if any.
    pub fn marshal_public_key(&self) -> Result<Option<Vec<u8>>> {
        self.public_key().map(|key| key.to_protobuf()).transpose()
    }

    /// Marshaled form of the attached private key, if any.
    pub fn marshal_private_key(&self) -> Result<Option<Vec<u8>>> {
        self.private_key().map(|key| key.to_protobuf()).transpose()
    }

    // ── JSON ─────────────────────────────────────────────────────────────

    /// The JSON form. Key fields are present only when resolvable.
    pub fn to_json(&self) -> Result<PeerIdJson> {
        Ok(PeerIdJson {
            id: self.b58.clone(),
            pub_key: self.marshal_public_key()?.map(|b| BASE64.encode(b)),
            priv_key: self.marshal_private_key()?.map(|b| BASE64.encode(b)),
        })
    }

    /// Rebuild from the JSON form, cross-checking every supplied field.
    pub fn from_json(json: &PeerIdJson) -> Result<Self> {
        let id_bytes = bs58::decode(&json.id)
            .into_vec()
            .map_err(|e| PeerIdError::InvalidEncoding(format!("base58 id: {e}")))?;
        let id = Multihash::from_bytes(&id_bytes)
            .map_err(|e| PeerIdError::InvalidId(e.to_string()))?;

        let public = json
            .pub_key
            .as_deref()
            .map(|s| {
                let bytes = BASE64
                    .decode(s)
                    .map_err(|e| PeerIdError::InvalidEncoding(format!("base64 pubKey: {e}")))?;
                keys::unmarshal_public_key(&bytes)
            })
            .transpose()?;

        let Some(priv_b64) = json.priv_key.as_deref() else {
            return Self::with_keys(id, None, public);
        };

        let priv_bytes = BASE64
            .decode(priv_b64)
            .map_err(|e| PeerIdError::InvalidEncoding(format!("base64 privKey: {e}")))?;
        let private = keys::unmarshal_private_key(&priv_bytes)?;
        let priv_digest = compute_digest(&private.public())?;

        if let Some(public) = &public {
            if compute_digest(public)? != priv_digest {
                return Err(PeerIdError::KeyMismatch(PeerIdError::PUBLIC_PRIVATE));
            }
        }
        if priv_digest != id {
            return Err(PeerIdError::KeyMismatch(PeerIdError::ID_PRIVATE));
        }

        Self::with_keys(id, Some(private), public)
    }

    // ── Protobuf ─────────────────────────────────────────────────────────

    /// The 3-field protobuf form.
    pub fn marshal(&self, exclude_private: bool) -> Result<Vec<u8>> {
        let msg = PeerIdProto {
            id: Some(self.id.to_bytes()),
            pub_key: self.marshal_public_key()?,
            priv_key: if exclude_private {
                None
            } else {
                self.marshal_private_key()?
            },
        };
        Ok(msg.encode_to_vec())
    }

    /// Rebuild from protobuf bytes.
    ///
    /// When a private key is present its derived digest is the
    /// canonical id; a bare public key is digested next; a bare id is
    /// accepted last.
    pub fn from_protobuf(bytes: &[u8]) -> Result<Self> {
        let msg = PeerIdProto::decode(bytes)
            .map_err(|e| PeerIdError::InvalidProtobuf(e.to_string()))?;

        let private = msg
            .priv_key
            .as_deref()
            .map(keys::unmarshal_private_key)
            .transpose()?;
        let public = msg
            .pub_key
            .as_deref()
            .map(keys::unmarshal_public_key)
            .transpose()?;

        if let Some(private) = private {
            let priv_digest = compute_digest(&private.public())?;
            if let Some(public) = &public {
                if compute_digest(public)? != priv_digest {
                    return Err(PeerIdError::KeyMismatch(PeerIdError::PUBLIC_PRIVATE));
                }
            }
            let derived_public = private.public();
            return Self::with_keys(priv_digest, Some(private), Some(derived_public));
        }

        if let Some(public) = public {
            let digest = compute_digest(&public)?;
            return Self::with_keys(digest, None, Some(public));
        }

        if let Some(id) = msg.id.as_deref() {
            return Self::from_bytes(id);
        }

        Err(PeerIdError::NoUsableKeyMaterial)
    }

    /// Rebuild from hex-encoded protobuf bytes.
    pub fn from_protobuf_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|e| PeerIdError::InvalidEncoding(format!("hex: {e}")))?;
        Self::from_protobuf(&bytes)
    }
}

/// Renders the self-describing CIDv1 form.
impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_cid_string())
    }
}

/// Parses any supported text form.
///
/// A leading `'1'` or `'Q'` marks unprefixed base58btc multihash text
/// (legacy compatibility); everything else goes through full
/// self-describing multibase detection, and the payload is accepted
/// either as a bare multihash or as a binary CID.
impl FromStr for PeerId {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('1') || s.starts_with('Q') {
            return Self::from_base58(s);
        }
        let (_, bytes) = multibase::decode(s)
            .map_err(|e| PeerIdError::InvalidEncoding(format!("multibase: {e}")))?;
        Self::from_bytes(&bytes).or_else(|_| Self::from_cid_bytes(&bytes))
    }
}

impl TryFrom<&Cid> for PeerId {
    type Error = PeerIdError;

    fn try_from(cid: &Cid) -> Result<Self> {
        Self::from_cid(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyType;

    fn ed_id() -> PeerId {
        PeerId::generate(KeyType::Ed25519, 0).unwrap()
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = ed_id();
        let restored = PeerId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(restored.to_bytes(), id.to_bytes());
    }

    #[test]
    fn test_base58_roundtrip() {
        let id = ed_id();
        let restored = PeerId::from_base58(id.to_base58()).unwrap();
        assert_eq!(restored.to_bytes(), id.to_bytes());
    }

    #[test]
    fn test_cid_string_roundtrip() {
        let id = ed_id();
        let restored: PeerId = id.to_cid_string().parse().unwrap();
        assert_eq!(restored.to_bytes(), id.to_bytes());
    }

    #[test]
    fn test_from_str_legacy_base58() {
        let id = PeerId::generate(KeyType::Rsa, 512).unwrap();
        // sha2-256 multihash text starts with Qm
        let parsed: PeerId = id.to_base58().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_cid_dag_pb_accepted_and_normalized() {
        let id = ed_id();
        let dag_pb = Cid::new_v1(DAG_PB_CODEC, *id.multihash());
        let from_dag = PeerId::from_cid(&dag_pb).unwrap();
        assert_eq!(from_dag.to_bytes(), id.to_bytes());
        // Rendering always uses the libp2p-key tag
        assert_eq!(from_dag.to_cid_string(), id.to_cid_string());
    }

    #[test]
    fn test_cid_unsupported_codec_rejected() {
        let id = ed_id();
        // 0x55 is the raw codec
        let raw = Cid::new_v1(0x55, *id.multihash());
        let err = PeerId::from_cid(&raw).unwrap_err();
        assert!(matches!(err, PeerIdError::InvalidCid(_)));
    }

    #[test]
    fn test_cid_bytes_roundtrip() {
        let id = ed_id();
        let cid = Cid::new_v1(LIBP2P_KEY_CODEC, *id.multihash());
        let restored = PeerId::from_cid_bytes(&cid.to_bytes()).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_public_key_bytes_roundtrip() {
        let id = ed_id();
        let marshaled = id.marshal_public_key().unwrap().unwrap();
        let restored = PeerId::from_public_key_bytes(&marshaled).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_private_key_b64_roundtrip() {
        let id = PeerId::generate(KeyType::Secp256k1, 0).unwrap();
        let b64 = BASE64.encode(id.marshal_private_key().unwrap().unwrap());
        let restored = PeerId::from_private_key_b64(&b64).unwrap();
        assert_eq!(restored, id);
        assert!(restored.is_valid());
    }

    #[test]
    fn test_json_roundtrip_full() {
        let id = ed_id();
        let json = id.to_json().unwrap();
        assert!(json.pub_key.is_some());
        assert!(json.priv_key.is_some());
        let restored = PeerId::from_json(&json).unwrap();
        assert_eq!(restored, id);
        assert_eq!(
            restored.marshal_private_key().unwrap(),
            id.marshal_private_key().unwrap()
        );
        assert_eq!(
            restored.marshal_public_key().unwrap(),
            id.marshal_public_key().unwrap()
        );
    }

    #[test]
    fn test_json_id_only() {
        let id = PeerId::from_bytes(&PeerId::generate(KeyType::Rsa, 512).unwrap().to_bytes())
            .unwrap();
        let json = id.to_json().unwrap();
        assert!(json.pub_key.is_none());
        assert!(json.priv_key.is_none());
        let restored = PeerId::from_json(&json).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_json_serde_field_names() {
        let id = ed_id();
        let text = serde_json::to_string(&id.to_json().unwrap()).unwrap();
        assert!(text.contains("\"id\""));
        assert!(text.contains("\"pubKey\""));
        assert!(text.contains("\"privKey\""));
    }

    #[test]
    fn test_json_mismatched_private_key() {
        let id = ed_id();
        let other = ed_id();
        let mut json = id.to_json().unwrap();
        json.priv_key = other.to_json().unwrap().priv_key;
        let err = PeerId::from_json(&json).unwrap_err();
        assert!(matches!(err, PeerIdError::KeyMismatch(_)));
    }

    #[test]
    fn test_json_mismatched_id() {
        let id = ed_id();
        let other = ed_id();
        let mut json = id.to_json().unwrap();
        json.id = other.to_base58().to_string();
        json.pub_key = None;
        let err = PeerId::from_json(&json).unwrap_err();
        assert!(matches!(err, PeerIdError::KeyMismatch(m) if m.contains("id and private")));
    }

    #[test]
    fn test_protobuf_roundtrip() {
        let id = ed_id();
        let restored = PeerId::from_protobuf(&id.marshal(false).unwrap()).unwrap();
        assert_eq!(restored, id);
        assert!(restored.private_key().is_some());
    }

    #[test]
    fn test_protobuf_exclude_private() {
        let id = ed_id();
        let restored = PeerId::from_protobuf(&id.marshal(true).unwrap()).unwrap();
        assert_eq!(restored, id);
        assert!(restored.private_key().is_none());
    }

    #[test]
    fn test_protobuf_hex_roundtrip() {
        let id = PeerId::generate(KeyType::Secp256k1, 0).unwrap();
        let hex_text = hex::encode(id.marshal(false).unwrap());
        let restored = PeerId::from_protobuf_hex(&hex_text).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_protobuf_id_only() {
        let id = PeerId::generate(KeyType::Rsa, 512).unwrap();
        let msg = PeerIdProto {
            id: Some(id.to_bytes()),
            pub_key: None,
            priv_key: None,
        };
        let restored = PeerId::from_protobuf(&msg.encode_to_vec()).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_protobuf_no_material() {
        let msg = PeerIdProto {
            id: None,
            pub_key: None,
            priv_key: None,
        };
        let err = PeerId::from_protobuf(&msg.encode_to_vec()).unwrap_err();
        assert!(matches!(err, PeerIdError::NoUsableKeyMaterial));
    }

    #[test]
    fn test_protobuf_mismatched_keys() {
        let a = ed_id();
        let b = ed_id();
        let msg = PeerIdProto {
            id: Some(a.to_bytes()),
            pub_key: a.marshal_public_key().unwrap(),
            priv_key: b.marshal_private_key().unwrap(),
        };
        let err = PeerId::from_protobuf(&msg.encode_to_vec()).unwrap_err();
        assert!(matches!(err, PeerIdError::KeyMismatch(_)));
    }

    #[test]
    fn test_display_is_cid_form() {
        let id = ed_id();
        assert_eq!(id.to_string(), id.to_cid_string());
        assert!(id.to_string().starts_with('b'));
    }

    #[test]
    fn test_garbage_text_rejected() {
        assert!(PeerId::from_hex("zzzz").is_err());
        assert!(PeerId::from_base58("0OIl").is_err());
        assert!("not-an-id".parse::<PeerId>().is_err());
        assert!(PeerId::from_protobuf(b"\xff\xff\xff").is_err());
    }
}
