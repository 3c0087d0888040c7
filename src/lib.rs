//! Incremental SVG to PNG asset catalog builder.
//!
//! Sources below a root directory are mirrored into an `.xcassets` catalog: every directory
//! becomes a group, every `.svg` file an image set with `1x`, `2x` and `3x` rasters. A single
//! source can additionally be laid out as the catalog's app icon. Image sets whose outputs are
//! newer than their source are left untouched.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use svgasset::{BuildOptions, Catalog, CatalogBuilder, ResvgConverter};
//!
//! # fn main() -> svgasset::CatalogResult<()> {
//! let catalog = Catalog::open("Assets.xcassets")?;
//! let mut builder = CatalogBuilder::new(catalog, BuildOptions::default())?;
//! builder.add_svgs(Path::new("art"))?;
//! builder.write(&ResvgConverter::new())?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod build;
mod catalog;
mod foundation;
mod svg;

pub use build::{
    builder::{AddReport, CatalogBuilder},
    observer::{BuildObserver, NoopObserver, TracingObserver},
    options::BuildOptions,
    pipeline::{
        APP_ICON_SLOTS, IconSlot, UNIVERSAL_SCALES, app_icon_outputs, check_source, size_label,
        universal_outputs,
    },
    plan::{BuildPlan, GenerateTask},
    staleness::needs_update,
    walk::{SVG_EXTENSION, svg_sources},
    write::WriteStats,
};
pub use catalog::{
    contents::{CONTENTS_FILE, CatalogInfo, GroupProperties, Image, ResourceTags},
    tree::{
        APP_ICON_DIR, APP_ICON_NAME, CATALOG_EXTENSION, Catalog, Container, Group,
        IMAGESET_EXTENSION, ImageSet, sanitize_name, split_source_path,
    },
};
pub use foundation::error::{CatalogError, CatalogResult, ErrorKind};
pub use svg::{
    convert::{InkscapeConverter, ResvgConverter, SvgConverter, pixel_size},
    dimension::{DEFAULT_DIMENSION, InvalidDimension, SvgSize, parse_dimension, parse_svg_size},
};
