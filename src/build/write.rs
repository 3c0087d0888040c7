use std::{
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    build::{
        observer::BuildObserver,
        options::{BuildOptions, build_thread_pool},
        plan::{BuildPlan, GenerateTask},
    },
    catalog::{
        contents::{self, CONTENTS_FILE},
        tree::{Catalog, Container, Group, ImageSet},
    },
    foundation::error::{CatalogError, CatalogResult, IoResultExt as _},
    svg::convert::SvgConverter,
};

/// Counters reported by a catalog write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Rasterizer invocations performed.
    pub tasks_run: usize,
    /// `Contents.json` files written.
    pub metadata_written: usize,
}

/// Persist `catalog` and execute every task in `plan`.
///
/// Sequential mode runs an image set's tasks right before writing its metadata, in tree order.
/// Parallel mode runs all tasks first (image sets concurrently, each set's tasks in order) and
/// writes metadata only once every task succeeded. The first failure aborts the write either way.
pub(crate) fn write_catalog(
    catalog: &Catalog,
    plan: &BuildPlan,
    converter: &dyn SvgConverter,
    observer: &dyn BuildObserver,
    opts: &BuildOptions,
) -> CatalogResult<WriteStats> {
    let mut writer = CatalogWriter {
        plan,
        converter,
        observer,
        run_tasks: !opts.parallel,
        stats: WriteStats::default(),
    };
    if opts.parallel {
        writer.stats.tasks_run = run_parallel(plan, converter, observer, opts.threads)?;
    }
    writer.catalog(catalog)?;
    Ok(writer.stats)
}

struct CatalogWriter<'a> {
    plan: &'a BuildPlan,
    converter: &'a dyn SvgConverter,
    observer: &'a dyn BuildObserver,
    run_tasks: bool,
    stats: WriteStats,
}

impl CatalogWriter<'_> {
    fn catalog(&mut self, catalog: &Catalog) -> CatalogResult<()> {
        ensure_dir(catalog.dir())?;
        self.contents(catalog.dir(), &catalog.doc())?;
        if let Some(icon) = catalog.app_icon() {
            self.image_set(icon).map_err(|e| e.at_node(icon.name()))?;
        }
        self.container(catalog.container())
    }

    fn container(&mut self, container: &Container) -> CatalogResult<()> {
        for group in container.groups() {
            self.group(group).map_err(|e| e.at_node(group.name()))?;
        }
        for set in container.image_sets() {
            self.image_set(set).map_err(|e| e.at_node(set.name()))?;
        }
        Ok(())
    }

    fn group(&mut self, group: &Group) -> CatalogResult<()> {
        ensure_dir(group.dir())?;
        self.contents(group.dir(), &group.doc())?;
        self.container(group.container())
    }

    fn image_set(&mut self, set: &ImageSet) -> CatalogResult<()> {
        ensure_dir(set.dir())?;
        if self.run_tasks {
            for task in self.plan.tasks_for(set.dir()) {
                task.run(self.converter, self.observer)?;
                self.stats.tasks_run += 1;
            }
        }
        self.contents(set.dir(), &set.doc())
    }

    fn contents<T: serde::Serialize>(&mut self, dir: &Path, doc: &T) -> CatalogResult<()> {
        contents::write_contents(dir, doc)?;
        self.stats.metadata_written += 1;
        self.observer.metadata_written(&dir.join(CONTENTS_FILE));
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> CatalogResult<()> {
    std::fs::create_dir_all(dir).at_path(dir)
}

fn run_parallel(
    plan: &BuildPlan,
    converter: &dyn SvgConverter,
    observer: &dyn BuildObserver,
    threads: Option<usize>,
) -> CatalogResult<usize> {
    let sets: Vec<(&Path, &[GenerateTask])> = plan.iter().collect();
    let pool = build_thread_pool(threads)?;
    let failed = AtomicBool::new(false);

    let results = pool.install(|| {
        sets.par_iter()
            .map(|(dir, tasks)| -> CatalogResult<usize> {
                let label = node_label(dir);
                ensure_dir(dir).map_err(|e| e.at_node(label.clone()))?;
                let mut ran = 0;
                for task in tasks.iter() {
                    // Cooperative cancellation: stop starting work once a sibling failed.
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    if let Err(e) = task.run(converter, observer) {
                        failed.store(true, Ordering::Relaxed);
                        return Err(e.at_node(label));
                    }
                    ran += 1;
                }
                Ok(ran)
            })
            .collect::<Vec<_>>()
    });

    let mut total = 0;
    for result in results {
        total += result?;
    }
    Ok(total)
}

fn node_label(dir: &Path) -> String {
    dir.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/build/write.rs"]
mod tests;
