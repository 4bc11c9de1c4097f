//! Markdown deliverable persistence.
//!
//! Agents hand their final packages (briefs, scripts, beat maps) to
//! [`save_markdown`], which is the only thing in Byline that writes to disk.

use crate::error::{BylineError, Result};
use std::path::{Path, PathBuf};

/// Save markdown contents to the given path, creating parent directories
/// as needed.
///
/// The `.md` extension is appended when missing. Relative paths resolve
/// under `base_dir`. Refuses to replace an existing file unless
/// `overwrite` is set. Returns the absolute path written.
pub fn save_markdown(
    base_dir: &Path,
    path: &str,
    contents: &str,
    overwrite: bool,
) -> Result<PathBuf> {
    let mut target = PathBuf::from(path);
    if !target.is_absolute() {
        target = base_dir.join(target);
    }

    let is_md = target
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    if !is_md {
        target.set_extension("md");
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if target.exists() && !overwrite {
        return Err(BylineError::ArtifactExists(target.display().to_string()));
    }

    std::fs::write(&target, contents)?;

    // Canonicalize after the write so the file is guaranteed to exist.
    Ok(std::fs::canonicalize(&target)?)
}
