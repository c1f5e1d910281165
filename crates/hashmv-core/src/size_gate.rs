//! Size gate: discard files above the configured limit before hashing.

use crate::error::{HashmvError, Result};
use std::path::Path;

const MIB: i64 = 1024 * 1024;

/// Maximum accepted size, as given on the command line in mebibytes.
///
/// The value is not range-checked: zero rejects every non-empty file and a
/// negative limit never rejects anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit {
    mib: i64,
}

impl SizeLimit {
    pub fn from_mib(mib: i64) -> Self {
        if mib <= 0 {
            tracing::warn!(max_mib = mib, "non-positive size limit");
        }
        Self { mib }
    }

    pub fn mib(&self) -> i64 {
        self.mib
    }

    /// Limit in bytes (`mib * 1024 * 1024`, saturating).
    pub fn bytes(&self) -> i64 {
        self.mib.saturating_mul(MIB)
    }

    /// True when `size` is strictly above the limit.
    pub fn exceeded_by(&self, size: u64) -> bool {
        match u64::try_from(self.bytes()) {
            Ok(limit) => size > limit,
            Err(_) => false,
        }
    }
}

/// Result of running the gate over one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Keep { size: u64 },
    Discarded { size: u64 },
}

/// Stat `path` and delete it if it is larger than `limit`.
pub fn enforce(path: &Path, limit: SizeLimit) -> Result<GateDecision> {
    let size = std::fs::metadata(path)
        .map_err(|e| HashmvError::io("stat", path, e))?
        .len();
    if !limit.exceeded_by(size) {
        return Ok(GateDecision::Keep { size });
    }
    std::fs::remove_file(path).map_err(|e| HashmvError::io("remove", path, e))?;
    tracing::info!(
        path = %path.display(),
        size,
        limit_bytes = limit.bytes(),
        "discarded oversized file"
    );
    Ok(GateDecision::Discarded { size })
}
