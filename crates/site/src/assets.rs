//! Copying asset folders into the output directory.

use crate::error::SiteError;
use std::path::Path;
use walkdir::WalkDir;

/// Copy everything under `src` into `dst`, creating directories as needed and
/// overwriting files that already exist. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| SiteError::Config(format!("{} escaped {}", entry.path().display(), src.display())))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(SiteError::io(&target))?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(SiteError::io(entry.path()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
