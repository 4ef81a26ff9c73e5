/// True iff every code point of `text` is <= 127
pub fn is_ascii(text: &str) -> bool {
    text.chars().all(|c| (c as u32) <= 0x7F)
}

/// Byte-level check for input that has not been turned into text yet
pub fn is_ascii_bytes(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b <= 0x7F)
}
