//! Content-addressed destination names: SHA-1 of the file bytes plus the
//! original extension.

use crate::error::{HashmvError, Result};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Split `name` into `(root, extension)` at the last `.` of its final path
/// component. The extension keeps its dot. Leading dots do not start an
/// extension, so `.bashrc` and `...` have none, while `notes.` has `"."`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    let base = &name[base_start..];
    let Some(dot) = base.rfind('.') else {
        return (name, "");
    };
    let leading_dots = base.len() - base.trim_start_matches('.').len();
    if dot < leading_dots {
        return (name, "");
    }
    name.split_at(base_start + dot)
}

/// Compute SHA-1 of a file and return the digest as lowercase hex (40 chars).
/// Reads in chunks so large uploads don't have to fit in memory.
pub fn sha1_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|e| HashmvError::io("open", path, e))?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .map_err(|e| HashmvError::io("read", path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// New name for `file_name` inside `hold`: `<sha1-hex><ext>`.
pub fn content_addressed_name(hold: &Path, file_name: &str) -> Result<String> {
    let (_, ext) = split_extension(file_name);
    let digest = sha1_path(&hold.join(file_name))?;
    Ok(format!("{digest}{ext}"))
}
