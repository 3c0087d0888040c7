use std::path::Path;

use crate::{
    catalog::tree::ImageSet,
    foundation::error::{CatalogResult, IoResultExt as _},
};

/// Decide whether `set` must be regenerated from `source`.
///
/// Stale when forced, when the persisted image count differs from `expected`, or when any
/// persisted output is unnamed, missing, or older than the source. A source that cannot be
/// stat'ed is an error.
pub fn needs_update(
    set: &ImageSet,
    source: &Path,
    expected: usize,
    force: bool,
) -> CatalogResult<bool> {
    if force || set.images.len() != expected {
        return Ok(true);
    }

    let source_modified = std::fs::metadata(source)
        .and_then(|m| m.modified())
        .at_path(source)?;

    for image in &set.images {
        if image.filename.is_empty() {
            return Ok(true);
        }
        let output = set.dir().join(&image.filename);
        let Ok(modified) = std::fs::metadata(&output).and_then(|m| m.modified()) else {
            return Ok(true);
        };
        if modified < source_modified {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "../../tests/unit/build/staleness.rs"]
mod tests;
