//! On-disk cache snapshot.
//!
//! Layout:
//!
//! ```text
//! +--------+-------------+------------------+-------------------+
//! | "FRSN" | version u16 | SHA-256(payload) | JSON payload ...  |
//! | 4 B    | 2 B, BE     | 32 B             |                   |
//! +--------+-------------+------------------+-------------------+
//! ```
//!
//! Records keep their creation timestamps, so TTLs keep decaying across a
//! restart.

use ferrous_relay_domain::RecordSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const MAGIC: &[u8; 4] = b"FRSN";
pub const SNAPSHOT_VERSION: u16 = 1;
const CHECKSUM_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 2 + CHECKSUM_LEN;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot file not found: {0}")]
    NotFound(String),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot truncated: {0} bytes")]
    Truncated(usize),

    #[error("not a cache snapshot (bad magic)")]
    BadMagic,

    #[error("unsupported snapshot version {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    #[error("snapshot payload invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// One cached name with its record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: Arc<str>,
    pub records: RecordSet,
}

#[derive(Serialize, Deserialize)]
struct SnapshotPayload {
    entries: Vec<SnapshotEntry>,
}

/// Snapshot stored at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheSnapshotFile {
    path: PathBuf,
}

impl CacheSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    pub fn load(&self) -> Result<Vec<SnapshotEntry>, SnapshotError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let entries = decode(&bytes)?;
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            entries = entries.len(),
            "Snapshot read"
        );
        Ok(entries)
    }

    /// Writes to `<path>.tmp`, then renames over the real path.
    pub fn save(&self, entries: Vec<SnapshotEntry>) -> Result<usize, SnapshotError> {
        let count = entries.len();
        let bytes = encode(entries)?;

        let tmp = self.tmp_path();
        std::fs::write(&tmp, &bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            entries = count,
            "Snapshot written"
        );
        Ok(count)
    }
}

pub fn encode(entries: Vec<SnapshotEntry>) -> Result<Vec<u8>, SnapshotError> {
    let payload = serde_json::to_vec(&SnapshotPayload { entries })?;
    let checksum = Sha256::digest(&payload);

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_be_bytes());
    out.extend_from_slice(&checksum);
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<Vec<SnapshotEntry>, SnapshotError> {
    if bytes.len() < HEADER_LEN {
        return Err(SnapshotError::Truncated(bytes.len()));
    }

    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(SnapshotError::BadMagic);
    }

    let (version, rest) = rest.split_at(2);
    let version = u16::from_be_bytes([version[0], version[1]]);
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let (checksum, payload) = rest.split_at(CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let payload: SnapshotPayload = serde_json::from_slice(payload)?;
    Ok(payload.entries)
}
