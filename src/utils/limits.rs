/// Maximum number of headers in one message (count must fit the 1-byte field)
pub const MAX_HEADERS: usize = 63;

/// Maximum encoded length of a header name or value
pub const MAX_HEADER_FIELD_SIZE: usize = 1023;

/// Maximum payload length
pub const MAX_PAYLOAD_SIZE: usize = 256 * 1024; // 256KiB

/// Largest buffer a conforming encoder can emit
pub const MAX_ENCODED_SIZE: usize = 1
    + MAX_HEADERS * 2 * (4 + MAX_HEADER_FIELD_SIZE)
    + 4
    + MAX_PAYLOAD_SIZE;
