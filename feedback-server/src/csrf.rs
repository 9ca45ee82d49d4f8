//! Anti-forgery tokens.
//!
//! A token is `v1.<base64url(payload)>.<base64url(hmac-sha256(payload))>`
//! where the JSON payload binds the browser session and the issue time.
//! Tokens are stateless: verification needs only the server secret, the
//! session id from the request cookie, and the clock.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;
const TOKEN_VERSION_V1: &str = "v1";
const MAX_TOKEN_LEN: usize = 1024;
const MAX_PAYLOAD_PART_LEN: usize = 768;
const MAX_SIG_PART_LEN: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("invalid token format")]
    InvalidFormat,
    #[error("unsupported token version")]
    UnsupportedVersion,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("invalid token payload")]
    InvalidPayload,
    #[error("token session mismatch")]
    SessionMismatch,
    #[error("token expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    session_id: String,
    /// Unix timestamp (seconds) of issue.
    issued_at: i64,
}

/// Issues and verifies session-bound anti-forgery tokens.
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            secret: secret.to_vec(),
            ttl_secs,
        }
    }

    /// Issues a token bound to `session_id`, valid for the configured TTL.
    pub fn issue(&self, session_id: &str) -> Result<String, CsrfError> {
        let payload = TokenPayload {
            session_id: session_id.to_string(),
            issued_at: Utc::now().timestamp(),
        };
        let payload_bytes =
            serde_json::to_vec(&payload).map_err(|_| CsrfError::InvalidPayload)?;
        let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| CsrfError::InvalidPayload)?;
        mac.update(payload_part.as_bytes());
        let sig = mac.finalize().into_bytes();
        let sig_part = URL_SAFE_NO_PAD.encode(sig);
        Ok(format!("{}.{}.{}", TOKEN_VERSION_V1, payload_part, sig_part))
    }

    /// Verifies signature, session binding and freshness of `token`.
    pub fn verify(&self, token: &str, session_id: &str) -> Result<(), CsrfError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(CsrfError::InvalidFormat);
        }
        let (payload_part, sig_part) = parse_token_parts(token)?;
        if payload_part.len() > MAX_PAYLOAD_PART_LEN || sig_part.len() > MAX_SIG_PART_LEN {
            return Err(CsrfError::InvalidFormat);
        }

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| CsrfError::InvalidPayload)?;
        mac.update(payload_part.as_bytes());
        let expected = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| CsrfError::InvalidFormat)?;
        mac.verify_slice(&expected)
            .map_err(|_| CsrfError::InvalidSignature)?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| CsrfError::InvalidFormat)?;
        let payload: TokenPayload =
            serde_json::from_slice(&payload_bytes).map_err(|_| CsrfError::InvalidPayload)?;

        if payload.session_id != session_id {
            return Err(CsrfError::SessionMismatch);
        }

        let age = Utc::now().timestamp() - payload.issued_at;
        if age < 0 || age > self.ttl_secs {
            return Err(CsrfError::Expired);
        }

        Ok(())
    }
}

fn parse_token_parts(token: &str) -> Result<(&str, &str), CsrfError> {
    let parts: Vec<&str> = token.split('.').collect();
    match parts.as_slice() {
        [version, payload, sig] if *version == TOKEN_VERSION_V1 => Ok((payload, sig)),
        [_, _, _] => Err(CsrfError::UnsupportedVersion),
        _ => Err(CsrfError::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"unit-test-secret-0123456789", 3600)
    }

    #[test]
    fn issued_token_verifies_for_its_session() {
        let signer = signer();
        let token = signer.issue("session-a").expect("issue token");
        assert!(signer.verify(&token, "session-a").is_ok());
    }

    #[test]
    fn token_rejected_for_other_session() {
        let signer = signer();
        let token = signer.issue("session-a").expect("issue token");
        assert_eq!(
            signer.verify(&token, "session-b"),
            Err(CsrfError::SessionMismatch)
        );
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let signer = signer();
        let token = signer.issue("session-a").expect("issue token");
        let other = TokenSigner::new(b"another-secret-entirely-here", 3600);
        assert_eq!(
            other.verify(&token, "session-a"),
            Err(CsrfError::InvalidSignature)
        );
    }

    #[test]
    fn tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue("session-a").expect("issue token");
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let forged = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&TokenPayload {
                session_id: "session-b".to_string(),
                issued_at: Utc::now().timestamp(),
            })
            .expect("payload json"),
        );
        parts[1] = forged;
        let tampered = parts.join(".");
        assert_eq!(
            signer.verify(&tampered, "session-b"),
            Err(CsrfError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_rejected() {
        let signer = TokenSigner::new(b"unit-test-secret-0123456789", 0);
        let token = signer.issue("session-a").expect("issue token");
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert_eq!(
            signer.verify(&token, "session-a"),
            Err(CsrfError::Expired)
        );
    }

    #[test]
    fn garbage_tokens_rejected() {
        let signer = signer();
        assert_eq!(
            signer.verify("", "session-a"),
            Err(CsrfError::InvalidFormat)
        );
        assert_eq!(
            signer.verify("v1.only-two", "session-a"),
            Err(CsrfError::InvalidFormat)
        );
        assert_eq!(
            signer.verify("v9.payload.sig", "session-a"),
            Err(CsrfError::UnsupportedVersion)
        );
    }
}
