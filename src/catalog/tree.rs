use std::{
    collections::BTreeMap,
    collections::btree_map::Entry,
    fs,
    path::{Component, Path, PathBuf},
};

use crate::{
    catalog::contents::{
        self, CONTENTS_FILE, CatalogDoc, CatalogInfo, GroupDoc, GroupProperties, Image,
        ImageSetDoc, ResourceTags,
    },
    foundation::error::{CatalogError, CatalogResult, IoResultExt as _},
};

/// Required extension of the top-level catalog directory.
pub const CATALOG_EXTENSION: &str = "xcassets";
/// Extension of generic image set directories.
pub const IMAGESET_EXTENSION: &str = "imageset";
/// Reserved directory name of the app icon set.
pub const APP_ICON_DIR: &str = "AppIcon.appiconset";
/// Node name used for the app icon set.
pub const APP_ICON_NAME: &str = "AppIcon";

/// Replace spaces with underscores in a group or image set name.
pub fn sanitize_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Children of a catalog or group, keyed by name.
#[derive(Debug)]
pub struct Container {
    dir: PathBuf,
    groups: BTreeMap<String, Group>,
    image_sets: BTreeMap<String, ImageSet>,
}

impl Container {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            groups: BTreeMap::new(),
            image_sets: BTreeMap::new(),
        }
    }

    /// Directory backing this container.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lookup an already-resolved child group.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Lookup an already-resolved child image set.
    pub fn image_set(&self, name: &str) -> Option<&ImageSet> {
        self.image_sets.get(name)
    }

    /// Child groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Child image sets in name order.
    pub fn image_sets(&self) -> impl Iterator<Item = &ImageSet> {
        self.image_sets.values()
    }

    /// Return the child group `name`, creating it (or loading it from disk) on first use.
    pub fn resolve_group(&mut self, name: &str) -> CatalogResult<&mut Group> {
        match self.groups.entry(name.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let group = Group::open(name, self.dir.join(name))?;
                Ok(e.insert(group))
            }
        }
    }

    /// Return the child image set `name`, creating it (or loading it from disk) on first use.
    pub fn resolve_image_set(&mut self, name: &str) -> CatalogResult<&mut ImageSet> {
        match self.image_sets.entry(name.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let dir = self.dir.join(format!("{name}.{IMAGESET_EXTENSION}"));
                let set = ImageSet::open(name, dir)?;
                Ok(e.insert(set))
            }
        }
    }

    /// Resolve `groups` outermost first, then the image set `name` under the last group.
    pub fn resolve_path(&mut self, groups: &[String], name: &str) -> CatalogResult<&mut ImageSet> {
        match groups.split_first() {
            None => self.resolve_image_set(name),
            Some((first, rest)) => self
                .resolve_group(first)?
                .container
                .resolve_path(rest, name),
        }
    }

    /// Resolve every persisted child below this container.
    fn load_children(&mut self) -> CatalogResult<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CatalogError::fs(&self.dir, e)),
        };

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.at_path(&self.dir)?;
            if entry.file_type().at_path(&entry.path())?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        for path in dirs {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(stem) = file_name.strip_suffix(&format!(".{IMAGESET_EXTENSION}")) {
                self.resolve_image_set(stem)?;
                continue;
            }
            // Other asset kinds (app icons, colors, data sets) are not groups.
            let is_other_set = Path::new(file_name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.ends_with("set"));
            if is_other_set || !path.join(CONTENTS_FILE).is_file() {
                continue;
            }
            self.resolve_group(file_name)?.container.load_children()?;
        }
        Ok(())
    }
}

/// Namespace node mirroring one source directory level.
#[derive(Debug)]
pub struct Group {
    name: String,
    container: Container,
    /// Provenance stamp.
    pub info: CatalogInfo,
    /// Group properties persisted under `properties`.
    pub properties: GroupProperties,
}

impl Group {
    fn open(name: &str, dir: PathBuf) -> CatalogResult<Self> {
        let (info, properties) = match contents::read_contents::<GroupDoc>(&dir)? {
            Some(doc) => (doc.info, doc.properties),
            None => (
                CatalogInfo::default(),
                GroupProperties {
                    provides_namespace: true,
                    ..GroupProperties::default()
                },
            ),
        };
        Ok(Self {
            name: name.to_string(),
            container: Container::new(dir),
            info,
            properties,
        })
    }

    /// Group name (its directory name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory backing this group.
    pub fn dir(&self) -> &Path {
        self.container.dir()
    }

    /// Children of this group.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// See [`Container::resolve_group`].
    pub fn resolve_group(&mut self, name: &str) -> CatalogResult<&mut Group> {
        self.container.resolve_group(name)
    }

    /// See [`Container::resolve_image_set`].
    pub fn resolve_image_set(&mut self, name: &str) -> CatalogResult<&mut ImageSet> {
        self.container.resolve_image_set(name)
    }

    pub(crate) fn doc(&self) -> GroupDoc {
        GroupDoc {
            info: self.info.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// Leaf node owning the derived raster variants of one source file.
#[derive(Debug)]
pub struct ImageSet {
    name: String,
    dir: PathBuf,
    /// Provenance stamp.
    pub info: CatalogInfo,
    /// Resource tags persisted under `properties`.
    pub properties: ResourceTags,
    /// Derived image descriptors, in persisted order.
    pub images: Vec<Image>,
}

impl ImageSet {
    fn open(name: &str, dir: PathBuf) -> CatalogResult<Self> {
        let doc = contents::read_contents::<ImageSetDoc>(&dir)?;
        let (info, properties, images) = match doc {
            Some(doc) => (doc.info, doc.properties, doc.images),
            None => (CatalogInfo::default(), ResourceTags::default(), Vec::new()),
        };
        Ok(Self {
            name: name.to_string(),
            dir,
            info,
            properties,
            images,
        })
    }

    /// Image set name (directory name without extension).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding this set's metadata and generated files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn doc(&self) -> ImageSetDoc {
        ImageSetDoc {
            info: self.info.clone(),
            properties: self.properties.clone(),
            images: self.images.clone(),
        }
    }
}

/// Root node of an asset catalog (`*.xcassets`).
#[derive(Debug)]
pub struct Catalog {
    name: String,
    container: Container,
    app_icon: Option<ImageSet>,
    /// Provenance stamp.
    pub info: CatalogInfo,
}

impl Catalog {
    /// Open the catalog rooted at `dir`, loading its own metadata if present.
    ///
    /// Children are loaded lazily as they are resolved. `dir` must end in `.xcassets` and, when it
    /// exists, must be a directory.
    pub fn open(dir: impl Into<PathBuf>) -> CatalogResult<Self> {
        let dir = dir.into();
        let is_catalog = dir
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == CATALOG_EXTENSION);
        if !is_catalog {
            return Err(CatalogError::validation(format!(
                "'{}' is not a catalog folder (must end in .{CATALOG_EXTENSION})",
                dir.display()
            )));
        }
        if dir.exists() && !dir.is_dir() {
            return Err(CatalogError::validation(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }

        let name = dir
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let info = contents::read_contents::<CatalogDoc>(&dir)?
            .map(|doc| doc.info)
            .unwrap_or_default();

        Ok(Self {
            name,
            container: Container::new(dir),
            app_icon: None,
            info,
        })
    }

    /// Open the catalog at `dir` and eagerly load every persisted group and image set.
    pub fn load(dir: impl Into<PathBuf>) -> CatalogResult<Self> {
        let mut catalog = Self::open(dir)?;
        catalog.container.load_children()?;
        if catalog.dir().join(APP_ICON_DIR).is_dir() {
            catalog.resolve_app_icon()?;
        }
        Ok(catalog)
    }

    /// Catalog name (directory name without extension).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog directory.
    pub fn dir(&self) -> &Path {
        self.container.dir()
    }

    /// Top-level children.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The app icon set, if one has been resolved.
    pub fn app_icon(&self) -> Option<&ImageSet> {
        self.app_icon.as_ref()
    }

    /// Return the app icon set, loading it from disk on first use.
    pub fn resolve_app_icon(&mut self) -> CatalogResult<&mut ImageSet> {
        let set = match self.app_icon.take() {
            Some(set) => set,
            None => ImageSet::open(APP_ICON_NAME, self.dir().join(APP_ICON_DIR))?,
        };
        Ok(self.app_icon.insert(set))
    }

    /// See [`Container::resolve_group`].
    pub fn resolve_group(&mut self, name: &str) -> CatalogResult<&mut Group> {
        self.container.resolve_group(name)
    }

    /// See [`Container::resolve_image_set`].
    pub fn resolve_image_set(&mut self, name: &str) -> CatalogResult<&mut ImageSet> {
        self.container.resolve_image_set(name)
    }

    /// Resolve the image set for a source file given relative to the source root.
    ///
    /// `a/b/name.svg` resolves group `a`, then `a/b`, then image set `name`.
    pub fn resolve_source(&mut self, rel: &Path, sanitize: bool) -> CatalogResult<&mut ImageSet> {
        let (groups, name) = split_source_path(rel, sanitize)?;
        self.container.resolve_path(&groups, &name)
    }

    pub(crate) fn doc(&self) -> CatalogDoc {
        CatalogDoc {
            info: self.info.clone(),
        }
    }
}

/// Split a relative source path into group names (outermost first) and the image set name.
pub fn split_source_path(rel: &Path, sanitize: bool) -> CatalogResult<(Vec<String>, String)> {
    let clean = |s: &str| {
        if sanitize {
            sanitize_name(s)
        } else {
            s.to_string()
        }
    };

    let mut groups = Vec::new();
    if let Some(parent) = rel.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(seg) => {
                    let seg = seg.to_str().ok_or_else(|| {
                        CatalogError::validation(format!(
                            "'{}' is not valid UTF-8",
                            rel.display()
                        ))
                    })?;
                    groups.push(clean(seg));
                }
                Component::CurDir => {}
                _ => {
                    return Err(CatalogError::validation(format!(
                        "'{}' must be relative to the source root",
                        rel.display()
                    )));
                }
            }
        }
    }

    let stem = rel
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CatalogError::validation(format!("'{}' has no file name", rel.display()))
        })?;

    Ok((groups, clean(stem)))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/tree.rs"]
mod tests;
