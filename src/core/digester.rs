//! Streaming SHA-256 file digests

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use super::error::{DedupError, Result};

const CHUNK_SIZE: usize = 8192;

/// Digest of one file plus what it cost to compute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Hex-encoded SHA-256 of the full contents
    pub digest: String,
    /// Bytes streamed through the hasher
    pub size_bytes: u64,
    /// Wall-clock time for open + read + hash
    pub elapsed: Duration,
}

/// Compute the SHA-256 digest of a file
///
/// The file is read in fixed-size chunks, so memory use does not depend on
/// file size. The handle is closed when this function returns, on success
/// and on error alike.
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// Hex digest, byte count and elapsed time
pub fn digest_file(path: &Path) -> Result<FileDigest> {
    let start = Instant::now();

    let mut file = File::open(path).map_err(|source| DedupError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut size_bytes = 0u64;

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(DedupError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        hasher.update(&buffer[..bytes_read]);
        size_bytes += bytes_read as u64;
    }

    Ok(FileDigest {
        digest: format!("{:x}", hasher.finalize()),
        size_bytes,
        elapsed: start.elapsed(),
    })
}

/// Hex SHA-256 of an in-memory buffer
pub fn digest_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
