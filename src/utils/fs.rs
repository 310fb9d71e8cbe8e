//! Filesystem helpers shared by the store and the maintenance commands.

use crate::errors::AppResult;
use crate::utils::path::with_suffix;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Refuse to clobber an existing file unless `force` is set.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ),
    )
    .into())
}

/// Replace `path` with `data` via a synced sibling `.tmp` file and a rename.
///
/// Readers see either the old or the new content, never a half-written file.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> AppResult<()> {
    let tmp = with_suffix(path, ".tmp");

    let written = (|| -> io::Result<()> {
        let mut f = File::create(&tmp)?;
        f.write_all(data)?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    sync_parent(path);
    Ok(())
}

/// Best effort: make a create/rename in the parent directory durable.
#[cfg(unix)]
pub(crate) fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
pub(crate) fn sync_parent(_path: &Path) {}
