//! One-shot user notices carried between requests.
//!
//! A [`Notice`] is set when the pipeline short-circuits a request (for example
//! "you need to sign in") and shown by whichever page the user lands on next.
//! It travels in a cookie, so [`Notice::encode`] produces a cookie-safe value.

use data_encoding::BASE64URL_NOPAD;
use serde::{Deserialize, Serialize};

/// Name of the cookie that carries the pending notice.
pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Encodes the notice as JSON wrapped in unpadded URL-safe base64.
    pub fn encode(&self) -> String {
        // Serializing a struct of a unit enum and a String cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        BASE64URL_NOPAD.encode(&json)
    }

    /// Decodes a cookie value produced by [`Notice::encode`].
    ///
    /// Tampered or stale values yield `None`; a bad flash cookie is never an
    /// error worth surfacing.
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = BASE64URL_NOPAD.decode(value.as_bytes()).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(notice) => Some(notice),
            Err(err) => {
                tracing::debug!(error = %err, "Discarding unreadable flash notice");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_value_is_cookie_safe() {
        let notice = Notice::error("Vous n'êtes pas autorisé; merci");
        let encoded = notice.encode();

        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(Notice::decode(&encoded), Some(notice));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(Notice::decode("not base64 at all!"), None);
        assert_eq!(Notice::decode(&BASE64URL_NOPAD.encode(b"{}")), None);
    }
}
