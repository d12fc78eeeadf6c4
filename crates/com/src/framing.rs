//! Positional wire codec.
//!
//! Every field on the wire is either a bare big-endian `u32` or a big-endian
//! `u32` length followed by exactly that many raw bytes. There is no type tag;
//! the caller knows what comes next from its position in the protocol.

use {
    crate::ComError,
    tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
};

pub const MAX_FRAME_SIZE: u32 = 64 * 1024 * 1024; // 64 MB

/// Upper bound for the unframed identity string a client sends on connect.
pub const MAX_IDENTITY_SIZE: usize = 1024;

/// Fill `buf` completely, looping over short reads.
///
/// A read of zero bytes before anything arrived is a disconnect
/// (`ComError::ConnectionClosed`); zero bytes after a partial fill is
/// `ComError::IncompleteRead`.
async fn fill<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> Result<(), ComError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(if filled == 0 {
                ComError::ConnectionClosed
            } else {
                ComError::IncompleteRead {
                    expected: buf.len(),
                    received: filled,
                }
            });
        }
        filled += n;
    }
    Ok(())
}

/// Read exactly `len` bytes.
///
/// `len == 0` returns an empty buffer without touching the reader, so an empty
/// payload is never mistaken for a closed peer.
pub async fn read_exact<R: AsyncRead + Unpin>(
    reader: &mut R,
    len: usize,
) -> Result<Vec<u8>, ComError> {
    let mut buf = vec![0u8; len];
    fill(reader, &mut buf).await?;
    Ok(buf)
}

/// Read one big-endian `u32` field.
pub async fn read_u32<R: AsyncRead + Unpin>(reader: &mut R) -> Result<u32, ComError> {
    let mut buf = [0u8; 4];
    fill(reader, &mut buf).await?;
    Ok(u32::from_be_bytes(buf))
}

/// Write one big-endian `u32` field.
pub async fn write_u32<W: AsyncWrite + Unpin>(writer: &mut W, value: u32) -> Result<(), ComError> {
    writer.write_all(&value.to_be_bytes()).await?;
    Ok(())
}

/// Write a `width, height` pair.
pub async fn write_dimensions<W: AsyncWrite + Unpin>(
    writer: &mut W,
    width: u32,
    height: u32,
) -> Result<(), ComError> {
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&width.to_be_bytes());
    buf[4..].copy_from_slice(&height.to_be_bytes());
    writer.write_all(&buf).await?;
    Ok(())
}

/// Read a `width, height` pair.
///
/// Only a close before the width is a disconnect; a close after it is an
/// incomplete read.
pub async fn read_dimensions<R: AsyncRead + Unpin>(reader: &mut R) -> Result<(u32, u32), ComError> {
    let width = read_u32(reader).await?;
    let height = match read_u32(reader).await {
        Ok(height) => height,
        Err(ComError::ConnectionClosed) => {
            return Err(ComError::IncompleteRead {
                expected: 8,
                received: 4,
            });
        }
        Err(e) => return Err(e),
    };
    Ok((width, height))
}

/// Write a length-prefixed payload.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ComError> {
    let len = u32::try_from(payload.len()).map_err(|_| ComError::MessageTooLarge(u32::MAX))?;

    if len > MAX_FRAME_SIZE {
        return Err(ComError::MessageTooLarge(len));
    }

    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;

    Ok(())
}

/// Read the payload that follows an already-read length prefix.
///
/// The length prefix was the frame boundary, so a peer closing here is an
/// incomplete read, never a clean disconnect.
pub async fn read_payload<R: AsyncRead + Unpin>(
    reader: &mut R,
    len: u32,
) -> Result<Vec<u8>, ComError> {
    if len > MAX_FRAME_SIZE {
        return Err(ComError::MessageTooLarge(len));
    }

    match read_exact(reader, len as usize).await {
        Err(ComError::ConnectionClosed) => Err(ComError::IncompleteRead {
            expected: len as usize,
            received: 0,
        }),
        other => other,
    }
}

/// Read a length-prefixed payload.
///
/// Returns `ComError::ConnectionClosed` if the peer closed before the prefix,
/// `ComError::IncompleteRead` if it closed inside the frame, and
/// `ComError::MessageTooLarge` if the prefix exceeds `MAX_FRAME_SIZE`.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ComError> {
    let len = read_u32(reader).await?;
    read_payload(reader, len).await
}

/// Read whatever a single read returns, up to `MAX_IDENTITY_SIZE` bytes.
///
/// Used for the unframed identity string; its length is a client convention.
pub async fn read_identity<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ComError> {
    let mut buf = vec![0u8; MAX_IDENTITY_SIZE];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Err(ComError::ConnectionClosed);
    }
    buf.truncate(n);
    Ok(buf)
}
