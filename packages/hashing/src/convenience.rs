//! Input ingestion on top of the transform contract
//!
//! Everything here only calls `transform_bytes`, so it works for every engine.
//! Reads happen in chunks of the hash's working buffer size; the digest never
//! depends on where those chunk boundaries fall.

use crate::{HashError, HashFunction, HashResult, Result};
use hashkit_common::on_error;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Seekable input for [`HashFunction::transform_stream`]
pub trait HashSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> HashSource for T {}

/// Feed `region` to `hash` in working-buffer-sized chunks
///
/// # Errors
///
/// Propagates errors from `transform_bytes`.
pub fn feed_chunked<H>(hash: &mut H, region: &[u8]) -> Result<()>
where
    H: HashFunction + ?Sized,
{
    let chunk = hash.buffer_size().max(1);
    for piece in region.chunks(chunk) {
        hash.transform_bytes(piece)?;
    }
    Ok(())
}

/// Read from `reader` and absorb, stopping at end of input or after `limit` bytes
///
/// With a `limit`, hitting end of input early is an out-of-range error.
pub(crate) fn transform_reader<H, R>(
    hash: &mut H,
    reader: &mut R,
    limit: Option<u64>,
) -> Result<u64>
where
    H: HashFunction + ?Sized,
    R: Read + ?Sized,
{
    let mut buf = vec![0u8; hash.buffer_size().max(1)];
    let mut total: u64 = 0;

    loop {
        let want = match limit {
            Some(limit) if total >= limit => break,
            Some(limit) => clamp(limit - total, buf.len()),
            None => buf.len(),
        };

        let n = match reader.read(&mut buf[..want]) {
            Ok(0) => {
                if let Some(limit) = limit {
                    return Err(on_error(
                        "transform_stream",
                        HashError::out_of_range(format!(
                            "input ended after {total} of {limit} requested bytes"
                        )),
                    ));
                }
                break;
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        hash.transform_bytes(&buf[..n])?;
        total += n as u64;
    }

    Ok(total)
}

fn clamp(left: u64, cap: usize) -> usize {
    usize::try_from(left).map_or(cap, |left| left.min(cap))
}

fn unusable(what: &str, err: &std::io::Error) -> HashError {
    on_error(
        "transform_stream",
        HashError::invalid_argument(format!("{what} is not usable: {err}")),
    )
}

/// Absorb from the stream's current position, `length` bytes or to the end
pub(crate) fn transform_stream<H, S>(
    hash: &mut H,
    stream: &mut S,
    length: Option<u64>,
) -> Result<u64>
where
    H: HashFunction + ?Sized,
    S: Read + Seek + ?Sized,
{
    let start = stream
        .stream_position()
        .map_err(|e| unusable("stream", &e))?;
    let end = stream
        .seek(SeekFrom::End(0))
        .map_err(|e| unusable("stream", &e))?;
    stream
        .seek(SeekFrom::Start(start))
        .map_err(|e| unusable("stream", &e))?;

    let available = end.saturating_sub(start);
    let length = match length {
        Some(length) if length > available => {
            return Err(on_error(
                "transform_stream",
                HashError::out_of_range(format!(
                    "requested {length} bytes but only {available} remain in the stream"
                )),
            ));
        }
        Some(length) => length,
        None => available,
    };

    let total = transform_reader(hash, stream, Some(length))?;
    tracing::debug!(algorithm = %hash.name(), bytes = total, "absorbed stream");
    Ok(total)
}

/// Absorb `length` bytes (or the rest) of the file at `path` from offset `from`
pub(crate) fn transform_file<H>(
    hash: &mut H,
    path: &Path,
    from: u64,
    length: Option<u64>,
) -> Result<u64>
where
    H: HashFunction + ?Sized,
{
    let name = path.display().to_string();
    let mut file = File::open(path).map_err(|e| unusable(&name, &e))?;
    let size = file.metadata().map_err(|e| unusable(&name, &e))?.len();

    if from > size {
        return Err(on_error(
            "transform_file",
            HashError::out_of_range(format!(
                "offset {from} is past the end of {} ({size} bytes)",
                path.display()
            )),
        ));
    }
    let available = size - from;
    let length = match length {
        Some(length) if length > available => {
            return Err(on_error(
                "transform_file",
                HashError::out_of_range(format!(
                    "requested {length} bytes from offset {from} but {} has {size} bytes",
                    path.display()
                )),
            ));
        }
        Some(length) => length,
        None => available,
    };

    file.seek(SeekFrom::Start(from))
        .map_err(|e| unusable(&name, &e))?;
    let total = transform_reader(hash, &mut file, Some(length))?;
    tracing::debug!(
        algorithm = %hash.name(),
        path = %path.display(),
        from,
        bytes = total,
        "absorbed file"
    );
    Ok(total)
}

/// Initialize, absorb everything an async reader yields, and finalize
///
/// Reads are awaited; the transform calls in between are synchronous.
///
/// # Errors
///
/// Returns `HashError::Io` if a read fails and propagates transform errors.
pub async fn compute_async_reader<H, R>(hash: &mut H, mut reader: R) -> Result<HashResult>
where
    H: HashFunction + ?Sized,
    R: AsyncRead + Unpin,
{
    hash.initialize();
    let mut buf = vec![0u8; hash.buffer_size().max(1)];
    let mut total: u64 = 0;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hash.transform_bytes(&buf[..n])?;
        total += n as u64;
    }
    tracing::debug!(algorithm = %hash.name(), bytes = total, "absorbed async reader");
    hash.transform_final()
}

/// Hash a whole file with tokio's async file I/O
///
/// # Errors
///
/// Returns `HashError::InvalidArgument` if the file cannot be opened and
/// `HashError::Io` if a read fails.
pub async fn compute_file_async<H>(hash: &mut H, path: impl AsRef<Path>) -> Result<HashResult>
where
    H: HashFunction + ?Sized,
{
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| unusable(&path.display().to_string(), &e))?;
    compute_async_reader(hash, file).await
}
