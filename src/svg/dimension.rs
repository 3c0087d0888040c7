use std::path::Path;

use crate::foundation::error::{CatalogError, CatalogResult};

/// Logical size used when a root `width`/`height` is missing or zero.
pub const DEFAULT_DIMENSION: f32 = 150.0;

/// Intrinsic logical size declared on an SVG root element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgSize {
    /// Declared height.
    pub height: f32,
    /// Declared width.
    pub width: f32,
}

/// A `width`/`height` attribute value that is neither empty, a number, nor a `px` length.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dimension '{0}'")]
pub struct InvalidDimension(pub String);

/// Parse one root dimension attribute.
///
/// Accepts an empty string, a bare number, or a number with a `px` suffix. Any result equal to `0`
/// (including an explicit `"0"`) becomes [`DEFAULT_DIMENSION`].
pub fn parse_dimension(raw: &str) -> Result<f32, InvalidDimension> {
    let value = if raw.is_empty() {
        0.0
    } else {
        let number = raw.strip_suffix("px").unwrap_or(raw);
        match number.parse::<f32>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(InvalidDimension(raw.to_string())),
        }
    };

    if value == 0.0 {
        Ok(DEFAULT_DIMENSION)
    } else {
        Ok(value)
    }
}

/// Read the root element's `height` and `width` from SVG bytes.
///
/// `path` only labels errors.
pub fn parse_svg_size(bytes: &[u8], path: &Path) -> CatalogResult<SvgSize> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CatalogError::source_parse(path, format!("failed to parse svg: {e}")))?;
    let text = text.trim_start_matches('\u{feff}');

    let mut opts = roxmltree::ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = roxmltree::Document::parse_with_options(text, opts)
        .map_err(|e| CatalogError::source_parse(path, format!("failed to parse svg: {e}")))?;

    let root = doc.root_element();
    let dim = |name: &str| {
        parse_dimension(root.attribute(name).unwrap_or_default())
            .map_err(|e| CatalogError::source_parse(path, format!("failed to parse dim: {e}")))
    };

    Ok(SvgSize {
        height: dim("height")?,
        width: dim("width")?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/svg/dimension.rs"]
mod tests;
