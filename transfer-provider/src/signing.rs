//! Request signing and webhook verification.
//!
//! Both directions use the same scheme:
//! `hex(HMAC-SHA512(secret, nonce & METHOD & url & hex(SHA-512(body))))`.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use transfer_types::{WebhookHeaders, WebhookVerifier};

type HmacSha512 = Hmac<Sha512>;

/// Hex-encoded SHA-512 of a request body.
pub fn body_digest(body: &[u8]) -> String {
    hex::encode(Sha512::digest(body))
}

/// Signs a request the way the provider expects it.
pub fn sign_request(secret: &str, nonce: &str, method: &str, url: &str, body: &[u8]) -> String {
    let message = format!(
        "{}&{}&{}&{}",
        nonce,
        method.to_ascii_uppercase(),
        url,
        body_digest(body)
    );

    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a signature using constant-time comparison.
pub fn verify_signature(
    secret: &str,
    nonce: &str,
    method: &str,
    url: &str,
    body: &[u8],
    signature: &str,
) -> bool {
    let expected = sign_request(secret, nonce, method, url, body);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// API key and secret issued by the provider.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Signs an outbound request.
    pub fn sign(&self, nonce: &str, method: &str, url: &str, body: &[u8]) -> String {
        sign_request(&self.api_secret, nonce, method, url, body)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl WebhookVerifier for Credentials {
    fn verify(&self, url: &str, body: &[u8], headers: &WebhookHeaders) -> bool {
        let (Some(nonce), Some(key), Some(signature)) = (
            headers.nonce.as_deref(),
            headers.key.as_deref(),
            headers.signature.as_deref(),
        ) else {
            return false;
        };

        let key_matches: bool = key.as_bytes().ct_eq(self.api_key.as_bytes()).into();
        // Callbacks are always delivered with POST.
        key_matches
            && verify_signature(
                &self.api_secret,
                nonce,
                "POST",
                url,
                body,
                signature,
            )
    }
}
