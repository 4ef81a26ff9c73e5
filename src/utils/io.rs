use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::message::Message;
use crate::protocol::codec::{decode_with, encode, DecodeMode};
use crate::protocol::error::{CodecResult, FormatError};

/// Encode `message` and write the whole buffer, then flush
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Message,
) -> CodecResult<usize> {
    let bytes = encode(message)?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    debug!("Wrote {} byte message", bytes.len());
    Ok(bytes.len())
}

/// Read until EOF, failing with `TooLong` once more than `max_len` bytes arrive
pub async fn read_bounded<R: AsyncRead + Unpin>(
    reader: &mut R,
    max_len: usize,
) -> CodecResult<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(max_len as u64 + 1).read_to_end(&mut buf).await?;
    if buf.len() > max_len {
        return Err(FormatError::TooLong(max_len).into());
    }
    debug!("Read {} byte message", buf.len());
    Ok(buf)
}

/// Read until EOF (at most `max_len` bytes) and decode one message.
///
/// The reader must end where the message ends; there is no outer framing.
pub async fn read_message<R: AsyncRead + Unpin>(
    reader: &mut R,
    max_len: usize,
    mode: DecodeMode,
) -> CodecResult<Message> {
    let buf = read_bounded(reader, max_len).await?;
    decode_with(&buf, mode)
}
