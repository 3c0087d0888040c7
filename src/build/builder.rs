use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    build::{
        observer::{BuildObserver, NoopObserver},
        options::BuildOptions,
        pipeline::{self, APP_ICON_SLOTS, IconSlot, UNIVERSAL_SCALES},
        plan::BuildPlan,
        walk,
        write::{self, WriteStats},
    },
    catalog::tree::{Catalog, sanitize_name},
    foundation::error::{CatalogError, CatalogResult, ErrorKind},
    svg::convert::SvgConverter,
};

/// Outcome of adding a tree of sources.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Sources whose image sets were scheduled for regeneration.
    pub regenerated: Vec<PathBuf>,
    /// Sources whose image sets were already current.
    pub up_to_date: Vec<PathBuf>,
    /// Sources skipped because they could not be parsed (only with `continue_on_error`).
    pub failed: Vec<(PathBuf, CatalogError)>,
}

/// Drives one incremental build: resolves sources into a [`Catalog`], decides what is stale,
/// and writes the result.
///
/// All decisions are made while sources are added; the rasterizer only runs in [`Self::write`].
pub struct CatalogBuilder {
    catalog: Catalog,
    plan: BuildPlan,
    opts: BuildOptions,
    observer: Arc<dyn BuildObserver>,
}

impl std::fmt::Debug for CatalogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBuilder")
            .field("catalog", &self.catalog.dir())
            .field("pending_tasks", &self.plan.task_count())
            .field("opts", &self.opts)
            .finish()
    }
}

impl CatalogBuilder {
    /// Build into `catalog` with `opts`.
    pub fn new(catalog: Catalog, opts: BuildOptions) -> CatalogResult<Self> {
        opts.validate()?;
        Ok(Self {
            catalog,
            plan: BuildPlan::default(),
            opts,
            observer: Arc::new(NoopObserver),
        })
    }

    /// Report progress to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn BuildObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The catalog being built.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tasks scheduled so far.
    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    /// Release the catalog tree.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Add every `.svg` below `root`, mirroring its directories as groups.
    pub fn add_svgs(&mut self, root: &Path) -> CatalogResult<AddReport> {
        let mut report = AddReport::default();
        for rel in walk::svg_sources(root)? {
            match self.add_svg(root, &rel) {
                Ok(true) => report.regenerated.push(rel),
                Ok(false) => report.up_to_date.push(rel),
                Err(e) if self.opts.continue_on_error && e.kind() == ErrorKind::SourceParse => {
                    tracing::warn!("skipping {}: {e}", rel.display());
                    report.failed.push((rel, e));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Add the source `root/rel`. Returns whether its image set was scheduled for regeneration.
    pub fn add_svg(&mut self, root: &Path, rel: &Path) -> CatalogResult<bool> {
        if !walk::is_svg(rel) {
            return Err(CatalogError::validation(format!(
                "{}: not an svg file",
                rel.display()
            )));
        }
        let source = root.join(rel);
        let set = self.catalog.resolve_source(rel, self.opts.sanitize)?;

        let checked = pipeline::check_source(set, &source, UNIVERSAL_SCALES.len(), self.opts.force);
        let Some(size) = checked? else {
            self.observer.source_checked(&source, false);
            return Ok(false);
        };
        self.observer.source_checked(&source, true);

        let stem = set.name().to_string();
        let (images, tasks) = pipeline::universal_outputs(&stem, set.dir(), &source, size);
        set.images = images;
        self.plan.replace(set.dir(), tasks);
        Ok(true)
    }

    /// Use `path` as the catalog's app icon with the standard iPhone/iPad table.
    pub fn add_app_icon_svg(&mut self, path: &Path) -> CatalogResult<bool> {
        self.add_app_icon_svg_with(path, &APP_ICON_SLOTS)
    }

    /// Use `path` as the catalog's app icon laid out by `slots`.
    pub fn add_app_icon_svg_with(&mut self, path: &Path, slots: &[IconSlot]) -> CatalogResult<bool> {
        if !walk::is_svg(path) {
            return Err(CatalogError::validation(format!(
                "{}: not an svg file",
                path.display()
            )));
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::validation(format!("{}: bad file name", path.display())))?;
        let stem = if self.opts.sanitize {
            sanitize_name(stem)
        } else {
            stem.to_string()
        };

        let set = self.catalog.resolve_app_icon()?;
        if pipeline::check_source(set, path, slots.len(), self.opts.force)?.is_none() {
            self.observer.source_checked(path, false);
            return Ok(false);
        }
        self.observer.source_checked(path, true);

        let (images, tasks) = pipeline::app_icon_outputs(&stem, set.dir(), path, slots);
        set.images = images;
        self.plan.replace(set.dir(), tasks);
        Ok(true)
    }

    /// Run every pending task through `converter` and persist the catalog.
    ///
    /// Pending tasks are dropped only once the write succeeds.
    #[tracing::instrument(skip(self, converter), fields(catalog = %self.catalog.dir().display()))]
    pub fn write(&mut self, converter: &dyn SvgConverter) -> CatalogResult<WriteStats> {
        let stats = write::write_catalog(
            &self.catalog,
            &self.plan,
            converter,
            self.observer.as_ref(),
            &self.opts,
        )?;
        tracing::info!(
            tasks = stats.tasks_run,
            metadata = stats.metadata_written,
            "catalog written"
        );
        self.plan.clear();
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/builder.rs"]
mod tests;
