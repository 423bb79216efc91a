// src/api/flash.rs
use axum::http::{header, HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::SessionConfig;

/// 以簽名 cookie 傳遞一次性提示訊息
///
/// cookie 值為 `hex(message).hex(sha256(secret + message))`，
/// 簽名不符的 cookie 一律忽略。
#[derive(Debug, Clone)]
pub struct FlashSigner {
    secret_key: String,
    cookie_name: String,
}

impl FlashSigner {
    pub fn new(secret_key: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.secret_key.clone(), config.flash_cookie.clone())
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn compute_signature(&self, message: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret_key.as_bytes());
        hasher.update(message.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 簽署訊息，返回 cookie 值
    pub fn sign(&self, message: &str) -> String {
        format!("{}.{}", hex::encode(message), self.compute_signature(message))
    }

    /// 驗證 cookie 值並取回訊息
    pub fn verify(&self, value: &str) -> Option<String> {
        let (payload, signature) = value.split_once('.')?;
        let bytes = hex::decode(payload).ok()?;
        let message = String::from_utf8(bytes).ok()?;

        if signature != self.compute_signature(&message) {
            warn!("忽略簽名不符的 flash cookie");
            return None;
        }

        Some(message)
    }

    /// 設定 flash 訊息的 `Set-Cookie` 標頭值
    pub fn set_cookie(&self, message: &str) -> HeaderValue {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name,
            self.sign(message)
        );
        // 值僅含十六進位字元與 '.'，必為合法標頭
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    /// 清除 flash cookie 的 `Set-Cookie` 標頭值
    pub fn clear_cookie(&self) -> HeaderValue {
        let cookie = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.cookie_name);
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    /// 從請求標頭讀取並驗證 flash 訊息
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .and_then(|(_, value)| self.verify(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> FlashSigner {
        FlashSigner::new("test-secret", "buzz_flash")
    }

    #[test]
    fn test_sign_and_verify() {
        let value = signer().sign("Missing file(s)");
        assert_eq!(signer().verify(&value).as_deref(), Some("Missing file(s)"));
    }

    #[test]
    fn test_tampered_cookie_is_ignored() {
        let value = signer().sign("hello");
        let (_, signature) = value.split_once('.').unwrap();
        let forged = format!("{}.{}", hex::encode("goodbye"), signature);

        assert_eq!(signer().verify(&forged), None);
        assert_eq!(signer().verify("not-a-cookie"), None);
    }

    #[test]
    fn test_other_secret_rejects() {
        let value = FlashSigner::new("other", "buzz_flash").sign("hello");
        assert_eq!(signer().verify(&value), None);
    }

    #[test]
    fn test_read_from_cookie_header() {
        let signer = signer();
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; buzz_flash={}", signer.sign("File type mismatch"));
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        assert_eq!(signer.read(&headers).as_deref(), Some("File type mismatch"));
    }

    #[test]
    fn test_set_and_clear_cookie() {
        let signer = signer();
        let set = signer.set_cookie("hi");
        assert!(set.to_str().unwrap().starts_with("buzz_flash="));

        let clear = signer.clear_cookie();
        assert!(clear.to_str().unwrap().contains("Max-Age=0"));
    }
}
