use sha2::{Digest, Sha256};

/// Hex SHA-256 fingerprint of an encoded message
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
