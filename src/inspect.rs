use serde::Serialize;

use crate::protocol::codec::{ascii_to_string, read_header_bytes};
use crate::protocol::error::{CodecResult, ValidationError};
use crate::utils::buffer::ByteReader;
use crate::utils::crc::crc32;
use crate::utils::digest::sha256_hex;
use crate::utils::limits::MAX_HEADERS;

#[derive(Debug, Clone, Serialize)]
pub struct HeaderSummary {
    pub name: String,
    pub name_len: usize,
    pub value_len: usize,
}

/// Structural breakdown of an encoded message
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub total_len: usize,
    pub header_count: usize,
    /// In wire order, duplicates included
    pub headers: Vec<HeaderSummary>,
    pub payload_len: usize,
    pub trailing_bytes: usize,
    pub crc32: u32,
    pub sha256: String,
}

impl Inspection {
    /// Header names occurring more than once on the wire
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for h in &self.headers {
            if !seen.insert(h.name.as_str()) && !dups.contains(&h.name.as_str()) {
                dups.push(h.name.as_str());
            }
        }
        dups
    }
}

/// Walk an encoded buffer with the same rules as lenient decode,
/// keeping the layout details decode throws away.
pub fn inspect(bytes: &[u8]) -> CodecResult<Inspection> {
    let mut reader = ByteReader::new(bytes);

    let count = reader.read_u8()? as usize;
    if count > MAX_HEADERS {
        return Err(ValidationError::TooManyHeaders(count).into());
    }

    let mut headers = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_header_bytes(&mut reader, false)?;
        let value = read_header_bytes(&mut reader, false)?;
        headers.push(HeaderSummary {
            name: ascii_to_string(name),
            name_len: name.len(),
            value_len: value.len(),
        });
    }

    let payload = reader.read_length_prefixed()?;

    Ok(Inspection {
        total_len: bytes.len(),
        header_count: count,
        headers,
        payload_len: payload.len(),
        trailing_bytes: reader.remaining(),
        crc32: crc32(bytes),
        sha256: sha256_hex(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::protocol::codec::{decode, encode};
    use crate::protocol::error::CodecError;

    #[test]
    fn summarizes_encoded_message() {
        let mut msg = Message::with_payload(b"This is the payload".to_vec());
        msg.insert_header("header1", "value1");
        let bytes = encode(&msg).unwrap();

        let report = inspect(&bytes).unwrap();
        assert_eq!(report.total_len, bytes.len());
        assert_eq!(report.header_count, 1);
        assert_eq!(report.headers[0].name, "header1");
        assert_eq!(report.headers[0].value_len, 6);
        assert_eq!(report.payload_len, 19);
        assert_eq!(report.trailing_bytes, 0);
        assert_eq!(report.crc32, crc32(&bytes));
        assert!(report.duplicate_names().is_empty());
    }

    #[test]
    fn reports_duplicates_and_trailing() {
        let mut bytes = vec![3u8];
        for (k, v) in [("a", "1"), ("b", "2"), ("a", "3")] {
            bytes.extend_from_slice(&1u32.to_le_bytes());
            bytes.extend_from_slice(k.as_bytes());
            bytes.extend_from_slice(&1u32.to_le_bytes());
            bytes.extend_from_slice(v.as_bytes());
        }
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.push(0xAA);

        let report = inspect(&bytes).unwrap();
        assert_eq!(report.headers.len(), 3);
        assert_eq!(report.duplicate_names(), vec!["a"]);
        assert_eq!(report.trailing_bytes, 1);
    }

    #[test]
    fn non_ascii_name_rejected_before_value_is_read() {
        let name = "ä".as_bytes();
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&(name.len() as u32).to_le_bytes());
        bytes.extend_from_slice(name);

        let decoded = decode(&bytes).unwrap_err();
        let inspected = inspect(&bytes).unwrap_err();
        assert_eq!(decoded.validation(), Some(&ValidationError::NonAsciiHeader));
        assert_eq!(inspected.validation(), Some(&ValidationError::NonAsciiHeader));
    }

    #[test]
    fn rejects_what_decode_rejects() {
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![64, 0, 0, 0, 0],
            vec![1, 1, 0, 0, 0, b'k'],
            vec![1, 1, 0, 0, 0, b'k', 1, 0, 0, 0, 0xFF, 0, 0, 0, 0],
            vec![0, 9, 0, 0, 0, 1],
        ];
        for bytes in cases {
            match (decode(&bytes), inspect(&bytes)) {
                (Err(CodecError::Validation(a)), Err(CodecError::Validation(b))) => {
                    assert_eq!(a, b)
                }
                (Err(CodecError::Format(a)), Err(CodecError::Format(b))) => assert_eq!(a, b),
                (d, i) => panic!("{:?}: decode {:?}, inspect {:?}", bytes, d, i),
            }
        }
    }
}
