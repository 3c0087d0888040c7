use std::path::Path;

use crate::{
    build::{plan::GenerateTask, staleness::needs_update},
    catalog::{contents::Image, tree::ImageSet},
    foundation::error::{CatalogResult, IoResultExt as _},
    svg::dimension::{SvgSize, parse_svg_size},
};

/// Scale factors of a generic image set.
pub const UNIVERSAL_SCALES: [u32; 3] = [1, 2, 3];

/// One entry of an app icon table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconSlot {
    /// Device class the variant targets.
    pub idiom: &'static str,
    /// Integer scale factor.
    pub scale: u32,
    /// Logical edge length in points.
    pub size: f32,
}

const fn slot(idiom: &'static str, scale: u32, size: f32) -> IconSlot {
    IconSlot { idiom, scale, size }
}

/// iPhone and iPad app icon variants.
pub const APP_ICON_SLOTS: [IconSlot; 13] = [
    slot("iphone", 2, 29.0),
    slot("iphone", 3, 29.0),
    slot("iphone", 2, 40.0),
    slot("iphone", 3, 40.0),
    slot("iphone", 2, 60.0),
    slot("iphone", 3, 60.0),
    slot("ipad", 1, 29.0),
    slot("ipad", 2, 29.0),
    slot("ipad", 1, 40.0),
    slot("ipad", 2, 40.0),
    slot("ipad", 1, 76.0),
    slot("ipad", 2, 76.0),
    slot("ipad", 2, 83.5),
];

/// Check `source` against `set` and, when stale, read its declared size.
///
/// Returns `None` when the set is up to date; the source is then not read.
pub fn check_source(
    set: &ImageSet,
    source: &Path,
    expected: usize,
    force: bool,
) -> CatalogResult<Option<SvgSize>> {
    if !needs_update(set, source, expected, force)? {
        return Ok(None);
    }
    let bytes = std::fs::read(source).at_path(source)?;
    parse_svg_size(&bytes, source).map(Some)
}

/// Descriptors and tasks for a generic `1x/2x/3x` image set.
pub fn universal_outputs(
    stem: &str,
    set_dir: &Path,
    source: &Path,
    size: SvgSize,
) -> (Vec<Image>, Vec<GenerateTask>) {
    UNIVERSAL_SCALES
        .iter()
        .map(|&scale| {
            let filename = format!("{stem}-{scale}x.png");
            let task = GenerateTask {
                scale,
                height: size.height,
                width: size.width,
                source: source.to_path_buf(),
                output: set_dir.join(&filename),
            };
            let image = Image {
                filename,
                idiom: "universal".to_string(),
                scale: format!("{scale}x"),
                ..Image::default()
            };
            (image, task)
        })
        .unzip()
}

/// Descriptors and tasks for an app icon set laid out by `slots`.
///
/// Each variant is rendered square at `scale × size` pixels.
pub fn app_icon_outputs(
    stem: &str,
    set_dir: &Path,
    source: &Path,
    slots: &[IconSlot],
) -> (Vec<Image>, Vec<GenerateTask>) {
    slots
        .iter()
        .map(|s| {
            let filename = format!("{stem}-{}-@{}-{}.png", s.idiom, s.scale, s.size as i64);
            let label = size_label(s.size);
            let task = GenerateTask {
                scale: s.scale,
                height: s.size,
                width: s.size,
                source: source.to_path_buf(),
                output: set_dir.join(&filename),
            };
            let image = Image {
                filename,
                size: format!("{label}x{label}"),
                idiom: s.idiom.to_string(),
                scale: format!("{}x", s.scale),
                ..Image::default()
            };
            (image, task)
        })
        .unzip()
}

/// Format a logical size with one decimal, dropping a trailing `.0`.
pub fn size_label(size: f32) -> String {
    let text = format!("{size:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/pipeline.rs"]
mod tests;
