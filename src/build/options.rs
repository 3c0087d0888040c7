use crate::foundation::error::{CatalogError, CatalogResult};

/// Knobs for one catalog build.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Regenerate every source regardless of modification times.
    pub force: bool,
    /// Replace spaces with underscores in group and image set names.
    pub sanitize: bool,
    /// Run generation tasks of independent image sets on a thread pool.
    pub parallel: bool,
    /// Worker count for `parallel`; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Record per-source parse failures in the walk report instead of aborting the walk.
    pub continue_on_error: bool,
}

impl BuildOptions {
    /// Reject inconsistent settings.
    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(CatalogError::validation(
                "build option 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> CatalogResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        CatalogError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}
