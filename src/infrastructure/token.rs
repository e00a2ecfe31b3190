//! Access-token codec.
//!
//! Tokens are `base64url(payload) "." base64url(signature)` where the
//! signature is HMAC-SHA256 over the serialized payload bytes, keyed with a
//! server-held secret. Tamper-evident, stateless, no server-side revocation:
//! expiry is the only invalidation mechanism, and expiry checking is the
//! caller's job, not the codec's.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::AccessClaims;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies access tokens with a process-wide secret.
///
/// The secret is read once at startup and never mutated; both operations are
/// pure functions over it.
pub struct AccessTokenCodec {
    secret: Vec<u8>,
}

impl AccessTokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Encode and sign the claims.
    pub fn encode(&self, claims: &AccessClaims) -> String {
        // serde_json produces a deterministic field order for a struct, so the
        // signed bytes are canonical.
        let payload = serde_json::to_vec(claims).unwrap_or_default();
        let signature = self.sign(&payload);
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify and decode a token.
    ///
    /// Any malformed, truncated or tampered input yields `None`, never a
    /// panic; callers must treat `None` as "unauthorized". Expired tokens are
    /// still returned here; see [`AccessClaims::is_expired`].
    pub fn decode(&self, token: &str) -> Option<AccessClaims> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        if signature_b64.contains('.') {
            return None;
        }
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(&payload);
        // Constant-time comparison.
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&payload).ok()
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
