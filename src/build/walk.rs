use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::foundation::error::{CatalogError, CatalogResult};

/// Extension of vector sources picked up by the walker.
pub const SVG_EXTENSION: &str = "svg";

pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SVG_EXTENSION)
}

/// Every `.svg` file below `root`, relative to `root`, in component order.
pub fn svg_sources(root: &Path) -> CatalogResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CatalogError::validation(format!(
            "source '{}' is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => CatalogError::fs(path, io),
                None => CatalogError::Other(anyhow::anyhow!(
                    "filesystem loop at '{}'",
                    path.display()
                )),
            }
        })?;
        if !entry.file_type().is_file() || !is_svg(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| CatalogError::Other(anyhow::Error::new(e)))?;
        files.push(rel.to_path_buf());
    }
    files.sort_by(|a, b| a.components().cmp(b.components()));
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/unit/build/walk.rs"]
mod tests;
