//! Webhook signature helpers.
//!
//! Bling signs every webhook delivery with HMAC-SHA256 over the exact raw bytes of the request
//! body, using the shared client secret as the key. The signature travels in the
//! `X-Bling-Signature-256` header as `sha256=<lowercase hex>`. Verification must run against the
//! raw bytes as received; re-serializing the parsed payload can change the byte layout and break
//! the check.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the webhook signature for `body`: `sha256=` followed by the lowercase hex digest of
/// HMAC-SHA256 keyed with `secret`.
pub fn calculate_hmac(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies `provided` against the signature of `body` under `secret`. An absent or empty
/// signature never matches. The comparison is constant-time so response timing leaks nothing
/// about the expected signature.
pub fn verify_signature(secret: &str, body: &[u8], provided: &str) -> bool {
    if provided.is_empty() {
        return false;
    }
    let expected = calculate_hmac(secret, body);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
