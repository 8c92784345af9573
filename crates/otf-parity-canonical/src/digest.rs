use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use canonical_json::to_string;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::validation::ValidationError;
use crate::value::CanonicalValue;

/// Supported digest algorithms for canonical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + bytes digest, encoded as base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm (currently always `sha-256`).
    pub alg: DigestAlg,
    /// Base64URL (no padding) digest bytes.
    #[serde(rename = "b64")]
    pub b64: String,
}

impl Digest {
    /// SHA-256 over the RFC 8785 encoding of `value`.
    ///
    /// Two trees with the same content but different map insertion order
    /// hash identically, since the encoding sorts object members.
    pub fn of(value: &CanonicalValue) -> Result<Self, ValidationError> {
        let json = serde_json::to_value(value).map_err(|err| ValidationError::Encoding {
            reason: err.to_string(),
        })?;
        let bytes = to_string(&json).map_err(|err| ValidationError::Encoding {
            reason: err.to_string(),
        })?;
        let hash = Sha256::digest(bytes.as_bytes());
        Ok(Digest {
            alg: DigestAlg::Sha256,
            b64: URL_SAFE_NO_PAD.encode(hash),
        })
    }
}
