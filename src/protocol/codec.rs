//! Message encode/decode.
//!
//! Layout (all lengths u32 little-endian):
//! ```text
//! [count:u8] { [name_len][name][value_len][value] } x count [payload_len][payload]
//! ```

use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::message::Message;
use crate::protocol::constants::{HEADER_COUNT_SIZE, HEADER_ENTRY_OVERHEAD, LENGTH_PREFIX_SIZE};
use crate::protocol::error::{CodecResult, FormatError, ValidationError};
use crate::utils::ascii::{is_ascii, is_ascii_bytes};
use crate::utils::buffer::{ByteBuffer, ByteReader};
use crate::utils::limits::{MAX_ENCODED_SIZE, MAX_HEADERS, MAX_HEADER_FIELD_SIZE, MAX_PAYLOAD_SIZE};

/// How much of the encode-side validation `decode` repeats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Accept any field length the buffer can satisfy; ignore trailing bytes
    #[default]
    Lenient,
    /// Also enforce header/payload size caps and reject trailing bytes
    Strict,
}

/// Stateless codec handle; the mode is picked per call site
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec {
    mode: DecodeMode,
}

impl MessageCodec {
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(DecodeMode::Strict)
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn encode(&self, message: &Message) -> CodecResult<Vec<u8>> {
        encode(message)
    }

    pub fn decode(&self, bytes: &[u8]) -> CodecResult<Message> {
        decode_with(bytes, self.mode)
    }
}

/// Exact number of bytes `encode` produces for `message`
pub fn encoded_len(message: &Message) -> usize {
    let headers: usize = message
        .headers
        .iter()
        .map(|(name, value)| HEADER_ENTRY_OVERHEAD + name.len() + value.len())
        .sum();
    HEADER_COUNT_SIZE + headers + LENGTH_PREFIX_SIZE + message.payload.len()
}

pub fn encode(message: &Message) -> CodecResult<Vec<u8>> {
    let count = message.headers.len();
    if count > MAX_HEADERS {
        return Err(ValidationError::TooManyHeaders(count).into());
    }

    // Oversized messages are rejected below; never reserve more than a valid one needs.
    let mut out = ByteBuffer::with_capacity(encoded_len(message).min(MAX_ENCODED_SIZE));
    out.write_u8(count as u8);

    for (name, value) in &message.headers {
        if !is_ascii(name) || !is_ascii(value) {
            return Err(ValidationError::NonAsciiHeader.into());
        }
        // ASCII text is one byte per character, so len() is the encoded size.
        if name.len() > MAX_HEADER_FIELD_SIZE || value.len() > MAX_HEADER_FIELD_SIZE {
            return Err(ValidationError::HeaderTooLarge.into());
        }
        out.write_length_prefixed(name.as_bytes());
        out.write_length_prefixed(value.as_bytes());
    }

    if message.payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ValidationError::PayloadTooLarge(message.payload.len()).into());
    }
    out.write_length_prefixed(&message.payload);

    trace!(
        "Encoded message: {} headers, {} payload bytes, {} total",
        count,
        message.payload.len(),
        out.len()
    );
    Ok(out.into_vec())
}

pub fn decode(bytes: &[u8]) -> CodecResult<Message> {
    decode_with(bytes, DecodeMode::Lenient)
}

/// `decode` plus the size caps `encode` enforces, and no trailing bytes
pub fn decode_strict(bytes: &[u8]) -> CodecResult<Message> {
    decode_with(bytes, DecodeMode::Strict)
}

pub fn decode_with(bytes: &[u8], mode: DecodeMode) -> CodecResult<Message> {
    let strict = mode == DecodeMode::Strict;
    let mut reader = ByteReader::new(bytes);

    let count = reader.read_u8()? as usize;
    if count > MAX_HEADERS {
        warn!("Rejecting message declaring {} headers", count);
        return Err(ValidationError::TooManyHeaders(count).into());
    }

    let mut headers = HashMap::with_capacity(count);
    for _ in 0..count {
        let name = read_header_field(&mut reader, strict)?;
        let value = read_header_field(&mut reader, strict)?;
        if headers.insert(name, value).is_some() {
            debug!("Duplicate header name, keeping the later value");
        }
    }

    let payload = reader.read_length_prefixed()?;
    if strict && payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ValidationError::PayloadTooLarge(payload.len()).into());
    }

    let trailing = reader.remaining();
    if trailing > 0 {
        if strict {
            return Err(FormatError::TrailingBytes(trailing).into());
        }
        debug!("Ignoring {} bytes after payload", trailing);
    }

    trace!(
        "Decoded message: {} headers, {} payload bytes",
        headers.len(),
        payload.len()
    );
    Ok(Message {
        headers,
        payload: payload.to_vec(),
    })
}

/// Read one header name or value, rejecting non-ASCII bytes before
/// anything after it is touched.
pub(crate) fn read_header_bytes<'a>(
    reader: &mut ByteReader<'a>,
    strict: bool,
) -> CodecResult<&'a [u8]> {
    let raw = reader.read_length_prefixed()?;
    if !is_ascii_bytes(raw) {
        warn!("Rejecting non-ASCII header field at offset {}", reader.position() - raw.len());
        return Err(ValidationError::NonAsciiHeader.into());
    }
    if strict && raw.len() > MAX_HEADER_FIELD_SIZE {
        return Err(ValidationError::HeaderTooLarge.into());
    }
    Ok(raw)
}

/// ASCII bytes to text; every byte is <= 0x7F, which is always valid UTF-8.
pub(crate) fn ascii_to_string(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}

fn read_header_field(reader: &mut ByteReader<'_>, strict: bool) -> CodecResult<String> {
    read_header_bytes(reader, strict).map(ascii_to_string)
}
