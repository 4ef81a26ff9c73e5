pub mod codec;
pub mod constants;
pub mod error;

pub use codec::*;
pub use error::*;
