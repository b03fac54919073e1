//! `X-Line-Signature` verification.
//!
//! The signature is base64(HMAC-SHA256(channel_secret, raw_body)).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use yurei_core::error::YureiError;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(channel_secret: &str, body: &[u8]) -> Result<HmacSha256, YureiError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| YureiError::SignatureInvalid(format!("bad channel secret: {e}")))?;
    mac.update(body);
    Ok(mac)
}

/// Compute the signature LINE would send for `body`.
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, YureiError> {
    let mac = mac_for(channel_secret, body)?;
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Check a signature header value against `body`, in constant time.
pub fn verify_signature(
    channel_secret: &str,
    body: &[u8],
    signature: &str,
) -> Result<(), YureiError> {
    let expected = BASE64
        .decode(signature.trim())
        .map_err(|_| YureiError::SignatureInvalid("signature is not valid base64".into()))?;
    mac_for(channel_secret, body)?
        .verify_slice(&expected)
        .map_err(|_| YureiError::SignatureInvalid("signature mismatch".into()))
}
