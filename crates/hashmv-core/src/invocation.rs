//! One hashmv invocation: validate directories, apply the size gate, hash,
//! move. Each call handles exactly one file and keeps no state between runs.

use crate::config::HashmvConfig;
use crate::content_name;
use crate::error::{HashmvError, Result};
use crate::mover::{self, MoveKind};
use crate::size_gate::{self, GateDecision, SizeLimit};
use std::path::PathBuf;

/// Typed form of the command-line parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// File name relative to `hold`, as reported by the watcher.
    pub file: String,
    /// Watched source directory.
    pub hold: PathBuf,
    /// Destination directory.
    pub web: PathBuf,
    /// Size limit in MiB; None means fall back to the config default.
    pub max_mib: Option<i64>,
}

/// Terminal state of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// File now lives at `destination` (`web/<name>`).
    Moved {
        name: String,
        destination: PathBuf,
        kind: MoveKind,
    },
    /// File was above the limit and has been deleted from `hold`.
    Discarded { size: u64, limit_bytes: i64 },
}

impl Invocation {
    pub fn source_path(&self) -> PathBuf {
        self.hold.join(&self.file)
    }

    /// Both directories must exist before anything is touched. Hold is checked first.
    pub fn check_dirs(&self) -> Result<()> {
        if !self.hold.is_dir() {
            return Err(HashmvError::HoldDirMissing(self.hold.clone()));
        }
        if !self.web.is_dir() {
            return Err(HashmvError::WebDirMissing(self.web.clone()));
        }
        Ok(())
    }

    /// `--max` wins over the config default; neither means unlimited.
    pub fn size_limit(&self, cfg: &HashmvConfig) -> Option<SizeLimit> {
        self.max_mib
            .or(cfg.default_max_mib)
            .map(SizeLimit::from_mib)
    }

    /// Validate the directories, then gate, hash and move.
    pub fn run(&self, cfg: &HashmvConfig) -> Result<Outcome> {
        self.check_dirs()?;
        self.run_checked(cfg)
    }

    /// Same as `run` for callers that already called `check_dirs` (the CLI
    /// does, so a missing directory exits 1 before the config is read).
    pub fn run_checked(&self, cfg: &HashmvConfig) -> Result<Outcome> {
        let src = self.source_path();

        if let Some(limit) = self.size_limit(cfg) {
            if let GateDecision::Discarded { size } = size_gate::enforce(&src, limit)? {
                return Ok(Outcome::Discarded {
                    size,
                    limit_bytes: limit.bytes(),
                });
            }
        }

        let name = content_name::content_addressed_name(&self.hold, &self.file)?;
        let destination = self.web.join(&name);
        let kind = mover::move_file(&src, &destination, cfg.cross_device_copy)?;
        tracing::info!(
            src = %src.display(),
            dest = %destination.display(),
            ?kind,
            "moved file"
        );
        Ok(Outcome::Moved {
            name,
            destination,
            kind,
        })
    }
}
