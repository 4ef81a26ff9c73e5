pub mod ascii;
pub mod buffer;
pub mod crc;
pub mod digest;
pub mod io;
pub mod limits;
