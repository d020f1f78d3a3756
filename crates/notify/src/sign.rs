//! Webhook request signing (HMAC-SHA256, base64-encoded).
//!
//! The two providers disagree on what gets keyed: Feishu keys the HMAC with
//! `"{timestamp}\n{secret}"` over an empty message; Dingtalk keys with the
//! secret over `"{timestamp}\n{secret}"`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn feishu_sign(secret: &str, timestamp_secs: i64) -> String {
    let key = format!("{timestamp_secs}\n{secret}");
    let mac = HmacSha256::new_from_slice(key.as_bytes()).expect("hmac accepts any key length");
    BASE64.encode(mac.finalize().into_bytes())
}

pub fn dingtalk_sign(secret: &str, timestamp_millis: i64) -> String {
    let message = format!("{timestamp_millis}\n{secret}");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
