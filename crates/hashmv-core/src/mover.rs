//! Move a file from the hold directory into the web directory.
//!
//! The normal path is a single `rename`, which is atomic when both directories
//! live on the same filesystem and replaces any existing destination. Across
//! filesystems the file is copied to a `.part` temp next to the destination,
//! synced, renamed into place, and only then removed from the source.

use crate::error::{HashmvError, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the final rename on the copy path.
pub const TEMP_SUFFIX: &str = ".part";

/// How the file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Renamed,
    Copied,
}

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Move `src` to `dest`, overwriting `dest`. When `cross_device_copy` is false
/// a cross-filesystem rename fails like any other I/O error.
pub fn move_file(src: &Path, dest: &Path, cross_device_copy: bool) -> Result<MoveKind> {
    match std::fs::rename(src, dest) {
        Ok(()) => Ok(MoveKind::Renamed),
        Err(e) if fallback_applies(&e, cross_device_copy) => {
            tracing::debug!(
                src = %src.display(),
                dest = %dest.display(),
                "rename crosses filesystems, copying instead"
            );
            copy_then_rename(src, dest)?;
            Ok(MoveKind::Copied)
        }
        Err(e) => Err(HashmvError::io("rename", src, e)),
    }
}

/// True when a failed rename should be retried as copy + rename.
fn fallback_applies(e: &io::Error, cross_device_copy: bool) -> bool {
    cross_device_copy && is_cross_device(e)
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

pub(crate) fn copy_then_rename(src: &Path, dest: &Path) -> Result<()> {
    let tmp = temp_path(dest);
    if let Err(e) = write_temp_copy(src, &tmp) {
        discard_temp(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, dest) {
        discard_temp(&tmp);
        return Err(HashmvError::io("rename", &tmp, e));
    }
    std::fs::remove_file(src).map_err(|e| HashmvError::io("remove", src, e))
}

fn write_temp_copy(src: &Path, tmp: &Path) -> Result<()> {
    let mut input = File::open(src).map_err(|e| HashmvError::io("open", src, e))?;
    let mut out = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)
        .map_err(|e| HashmvError::io("create", tmp, e))?;
    io::copy(&mut input, &mut out).map_err(|e| HashmvError::io("copy", tmp, e))?;
    // Keep the source mode, as a rename would.
    let perms = input
        .metadata()
        .map_err(|e| HashmvError::io("stat", src, e))?
        .permissions();
    out.set_permissions(perms)
        .map_err(|e| HashmvError::io("chmod", tmp, e))?;
    out.sync_all().map_err(|e| HashmvError::io("sync", tmp, e))
}

fn discard_temp(tmp: &Path) {
    match std::fs::remove_file(tmp) {
        Ok(()) => tracing::debug!(path = %tmp.display(), "removed partial copy"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %tmp.display(), "could not remove partial copy: {}", e),
    }
}
