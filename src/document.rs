//! JSON form of a message used by the command-line wrapper.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::message::Message;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDocument {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Payload as UTF-8 text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_hex: Option<String>,
}

impl MessageDocument {
    pub fn into_message(self) -> Result<Message> {
        let payload = match (self.payload, self.payload_hex) {
            (Some(_), Some(_)) => bail!("give either `payload` or `payload_hex`, not both"),
            (Some(text), None) => text.into_bytes(),
            (None, Some(encoded)) => hex::decode(encoded.trim()).context("invalid payload_hex")?,
            (None, None) => Vec::new(),
        };
        Ok(Message {
            headers: self.headers,
            payload,
        })
    }

    /// Always carries `payload_hex`; `payload` too when the bytes are UTF-8
    pub fn from_message(message: &Message) -> Self {
        Self {
            headers: message.headers.clone(),
            payload: std::str::from_utf8(&message.payload).ok().map(str::to_owned),
            payload_hex: Some(hex::encode(&message.payload)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_document() {
        let doc: MessageDocument = serde_json::from_str(
            r#"{"headers":{"header1":"value1"},"payload":"This is the payload"}"#,
        )
        .unwrap();
        let msg = doc.into_message().unwrap();
        assert_eq!(msg.header("header1"), Some("value1"));
        assert_eq!(msg.payload(), b"This is the payload");
    }

    #[test]
    fn hex_payload_document() {
        let doc: MessageDocument = serde_json::from_str(r#"{"payload_hex":"00ff10"}"#).unwrap();
        let msg = doc.into_message().unwrap();
        assert_eq!(msg.header_count(), 0);
        assert_eq!(msg.payload(), &[0x00u8, 0xFF, 0x10]);
    }

    #[test]
    fn both_payload_forms_rejected() {
        let doc = MessageDocument {
            payload: Some("a".into()),
            payload_hex: Some("61".into()),
            ..Default::default()
        };
        assert!(doc.into_message().is_err());
    }

    #[test]
    fn binary_payload_has_no_text_form() {
        let doc = MessageDocument::from_message(&Message::with_payload(vec![0xFFu8, 0xFE]));
        assert!(doc.payload.is_none());
        assert_eq!(doc.payload_hex.as_deref(), Some("fffe"));
    }
}
