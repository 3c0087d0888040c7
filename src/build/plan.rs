use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    build::observer::BuildObserver, foundation::error::CatalogResult, svg::convert::SvgConverter,
};

/// One deferred rasterizer invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateTask {
    /// Integer scale factor.
    pub scale: u32,
    /// Logical height before scaling.
    pub height: f32,
    /// Logical width before scaling.
    pub width: f32,
    /// Source SVG.
    pub source: PathBuf,
    /// PNG to produce.
    pub output: PathBuf,
}

impl GenerateTask {
    /// Invoke `converter` once for this task.
    pub fn run(
        &self,
        converter: &dyn SvgConverter,
        observer: &dyn BuildObserver,
    ) -> CatalogResult<()> {
        observer.generating(&self.output);
        converter.convert(
            self.scale,
            self.height,
            self.width,
            &self.source,
            &self.output,
        )
    }
}

/// Pending generation tasks keyed by the directory of the image set that owns them.
#[derive(Clone, Debug, Default)]
pub struct BuildPlan {
    tasks: BTreeMap<PathBuf, Vec<GenerateTask>>,
}

impl BuildPlan {
    /// Replace every pending task of the image set at `set_dir`.
    pub fn replace(&mut self, set_dir: impl Into<PathBuf>, tasks: Vec<GenerateTask>) {
        self.tasks.insert(set_dir.into(), tasks);
    }

    /// Pending tasks of the image set at `set_dir`, in image order.
    pub fn tasks_for(&self, set_dir: &Path) -> &[GenerateTask] {
        self.tasks.get(set_dir).map(Vec::as_slice).unwrap_or_default()
    }

    /// Image sets with pending tasks, in directory order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[GenerateTask])> {
        self.tasks.iter().map(|(k, v)| (k.as_path(), v.as_slice()))
    }

    /// Total number of pending tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    /// Whether nothing needs generating.
    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }

    pub(crate) fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/plan.rs"]
mod tests;
