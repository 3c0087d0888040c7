use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, OnceLock},
};

use crate::foundation::error::{CatalogError, CatalogResult, IoResultExt as _};

/// Rasterizes one SVG into a PNG at a given scale.
///
/// Implementations must be safe to call concurrently: parallel writes invoke `convert` from
/// several worker threads at once, never twice for the same `png`.
pub trait SvgConverter: Send + Sync {
    /// Write `png` at `scale × width` by `scale × height` pixels, rendered from `svg`.
    fn convert(
        &self,
        scale: u32,
        height: f32,
        width: f32,
        svg: &Path,
        png: &Path,
    ) -> CatalogResult<()>;
}

/// Pixel extent of a logical dimension at `scale`, truncated and at least 1.
pub fn pixel_size(scale: u32, logical: f32) -> u32 {
    ((scale as f32 * logical) as u32).max(1)
}

// Avoid pathological allocations for absurd declared sizes.
const MAX_DIM: u32 = 16_384;

/// In-process rasterizer backed by `usvg` + `resvg`.
#[derive(Clone)]
pub struct ResvgConverter {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for ResvgConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResvgConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResvgConverter")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl ResvgConverter {
    /// Construct a converter with system fonts loaded for SVG text.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Construct a converter that resolves SVG text against `fontdb` only.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }
}

impl SvgConverter for ResvgConverter {
    fn convert(
        &self,
        scale: u32,
        height: f32,
        width: f32,
        svg: &Path,
        png: &Path,
    ) -> CatalogResult<()> {
        let w = pixel_size(scale, width);
        let h = pixel_size(scale, height);
        if w > MAX_DIM || h > MAX_DIM {
            return Err(CatalogError::conversion(
                svg,
                format!("raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"),
            ));
        }

        let bytes = std::fs::read(svg).at_path(svg)?;
        let opts = usvg::Options {
            resources_dir: svg.parent().map(Path::to_path_buf),
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(&bytes, &opts)
            .map_err(|e| CatalogError::conversion(svg, format!("parse svg tree: {e}")))?;

        let mut rgba = rasterize_to_premul_rgba8(&tree, w, h)
            .ok_or_else(|| CatalogError::conversion(svg, "failed to allocate svg pixmap"))?;
        unpremultiply_rgba8_in_place(&mut rgba);

        if let Some(parent) = png.parent() {
            std::fs::create_dir_all(parent).at_path(parent)?;
        }
        image::save_buffer_with_format(
            png,
            &rgba,
            w,
            h,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| CatalogError::conversion(svg, format!("write png '{}': {e}", png.display())))
    }
}

fn rasterize_to_premul_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> Option<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Some(pixmap.take())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Rasterizer that shells out to the `inkscape` binary.
#[derive(Debug)]
pub struct InkscapeConverter {
    program: PathBuf,
    available: OnceLock<bool>,
}

impl Default for InkscapeConverter {
    fn default() -> Self {
        Self::new("inkscape")
    }
}

impl InkscapeConverter {
    /// Use `program` as the inkscape executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            available: OnceLock::new(),
        }
    }

    /// Whether the executable can be launched. Probed once per converter.
    pub fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            Command::new(&self.program)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|s| s.success())
                .unwrap_or(false)
        })
    }
}

impl SvgConverter for InkscapeConverter {
    fn convert(
        &self,
        scale: u32,
        height: f32,
        width: f32,
        svg: &Path,
        png: &Path,
    ) -> CatalogResult<()> {
        if !self.is_available() {
            return Err(CatalogError::missing_tool(format!(
                "{} not installed. inkscape (https://inkscape.org/) is needed to convert SVG files",
                self.program.display()
            )));
        }

        let output = Command::new(&self.program)
            .arg("--export-type=png")
            .arg(format!("--export-width={}", pixel_size(scale, width)))
            .arg(format!("--export-height={}", pixel_size(scale, height)))
            .arg("--export-filename")
            .arg(png)
            .arg(svg)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CatalogError::conversion(svg, format!("failed to spawn inkscape: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CatalogError::conversion(
                svg,
                format!("inkscape exited with status {}: {}", output.status, stderr.trim()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/convert.rs"]
mod tests;
