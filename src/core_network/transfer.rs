use crate::constants::TRANSFER_CHUNK_SIZE;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Copies `reader` into `writer` in fixed-size chunks until the reader hits EOF.
///
/// Returns the number of bytes moved. Shutting down the data channel is left
/// to the caller.
pub async fn pump<R, W>(reader: &mut R, writer: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buffer = vec![0; TRANSFER_CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let bytes_read = match reader.read(&mut buffer).await? {
            0 => break, // End of stream
            n => n,
        };
        writer.write_all(&buffer[..bytes_read]).await?;
        total += bytes_read as u64;
    }

    writer.flush().await?;
    Ok(total)
}
