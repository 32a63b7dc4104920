//! Webhook signature computation and verification.
//!
//! Webhook deliveries carry a hex-encoded HMAC-SHA256 of the raw request
//! body, keyed by the secret registered with the webhook.
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &str) -> HmacSha256 {
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC can take any size key"),
    }
}

/// Lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign_webhook_payload(payload: impl AsRef<[u8]>, secret: &str) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(payload.as_ref());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a webhook signature.
///
/// Returns true iff `signature` is exactly the lowercase hex HMAC-SHA256 of
/// `payload` under `secret`. The tag comparison is constant time.
pub fn verify_webhook_signature(payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
    // Signatures are always emitted in lowercase; anything else is not ours.
    if signature.bytes().any(|b| b.is_ascii_uppercase()) {
        return false;
    }
    let Ok(tag) = hex::decode(signature) else {
        return false;
    };
    let mut mac = keyed_mac(secret);
    mac.update(payload.as_ref());
    mac.verify_slice(&tag).is_ok()
}
