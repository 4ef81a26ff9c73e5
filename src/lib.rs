//! Compact binary encoding for a single message made of ASCII headers and
//! an opaque payload.

pub mod config;
pub mod document;
pub mod inspect;
pub mod message;
pub mod protocol;
pub mod utils;

pub use inspect::{inspect, Inspection};
pub use message::Message;
pub use protocol::codec::{
    decode, decode_strict, decode_with, encode, encoded_len, DecodeMode, MessageCodec,
};
pub use protocol::error::{CodecError, CodecResult, FormatError, ValidationError};
