use std::{collections::BTreeMap, fs, io, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::foundation::error::{CatalogError, CatalogResult, IoResultExt as _};

/// File name of the per-node metadata document.
pub const CONTENTS_FILE: &str = "Contents.json";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Provenance stamp written into every persisted node.
pub struct CatalogInfo {
    /// Tool that produced the node.
    pub author: String,
    /// Metadata format version.
    pub version: i64,
}

impl Default for CatalogInfo {
    fn default() -> Self {
        Self {
            author: "svgasset".to_string(),
            version: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// On-demand resource tags shared by groups and image sets.
pub struct ResourceTags {
    /// Tags assigned to this node, omitted from JSON when empty.
    #[serde(
        rename = "on-demand-resource-tags",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub on_demand_resource_tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Properties of a namespace group.
pub struct GroupProperties {
    /// Tags assigned to the group, omitted from JSON when empty.
    #[serde(
        rename = "on-demand-resource-tags",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub on_demand_resource_tags: Vec<String>,
    /// Whether the group contributes its name to asset lookups.
    #[serde(rename = "provides-namespace", default)]
    pub provides_namespace: bool,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One derived raster variant of an image set.
///
/// Fields serialize in declaration order; optional attributes are omitted from JSON when empty.
pub struct Image {
    /// File name relative to the image set directory. Empty for an unfilled slot.
    #[serde(default)]
    pub filename: String,
    /// Logical size label, e.g. `"29x29"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    /// Metal graphics feature set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graphics_feature_set: String,
    /// Device class, e.g. `"universal"`, `"iphone"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub idiom: String,
    /// Minimum device memory.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memory: String,
    /// Scale label, e.g. `"2x"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scale: String,
    /// Device subtype.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtype: String,
    /// Screen width class for watch assets.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub screen_width: String,
    /// Horizontal size class.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub width_class: String,
    /// Vertical size class.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub height_class: String,
    /// Slot declared without a file.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unassigned: bool,
    /// Alignment insets keyed by edge.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alignment_insets: BTreeMap<String, serde_json::Value>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct CatalogDoc {
    #[serde(default)]
    pub(crate) info: CatalogInfo,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct GroupDoc {
    #[serde(default)]
    pub(crate) info: CatalogInfo,
    #[serde(default)]
    pub(crate) properties: GroupProperties,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct ImageSetDoc {
    #[serde(default)]
    pub(crate) info: CatalogInfo,
    #[serde(default, alias = "Properties")]
    pub(crate) properties: ResourceTags,
    #[serde(default)]
    pub(crate) images: Vec<Image>,
}

/// Read `dir/Contents.json`.
///
/// A missing file is `Ok(None)`; any other read or decode failure is a
/// [`CatalogError::MetadataRead`].
pub(crate) fn read_contents<T: DeserializeOwned>(dir: &Path) -> CatalogResult<Option<T>> {
    let path = dir.join(CONTENTS_FILE);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CatalogError::metadata(path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| CatalogError::metadata(path, e))
}

/// Overwrite `dir/Contents.json` with the pretty-printed document.
pub(crate) fn write_contents<T: Serialize>(dir: &Path, doc: &T) -> CatalogResult<()> {
    let path = dir.join(CONTENTS_FILE);
    let bytes = serde_json::to_vec_pretty(doc)
        .map_err(|e| CatalogError::Other(anyhow::Error::new(e).context("encode contents")))?;
    fs::write(&path, bytes).at_path(&path)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/contents.rs"]
mod tests;
