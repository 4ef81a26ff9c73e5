//! Wire layout constants for msgwire messages

/// Width of the header count field
pub const HEADER_COUNT_SIZE: usize = 1;

/// Width of every length prefix (u32, little-endian)
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Fixed overhead of one header entry: name prefix + value prefix
pub const HEADER_ENTRY_OVERHEAD: usize = 2 * LENGTH_PREFIX_SIZE;

/// Smallest valid message: zero headers, empty payload
pub const MIN_MESSAGE_SIZE: usize = HEADER_COUNT_SIZE + LENGTH_PREFIX_SIZE;
