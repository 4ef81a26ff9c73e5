use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single message: unordered ASCII headers plus an opaque payload.
///
/// The type holds whatever the caller puts in it; limits are checked by
/// the codec on the way to and from the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub headers: HashMap<String, String>,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: HashMap::new(),
            payload: payload.into(),
        }
    }

    /// Insert or overwrite a header, returning the displaced value
    pub fn insert_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.headers.insert(name.into(), value.into())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_parts(self) -> (HashMap<String, String>, Vec<u8>) {
        (self.headers, self.payload)
    }
}
