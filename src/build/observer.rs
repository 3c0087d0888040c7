use std::path::Path;

/// Receives progress events from the generation pipeline and the catalog writer.
///
/// Every method defaults to doing nothing. Events may arrive from several threads when tasks run
/// in parallel.
pub trait BuildObserver: Send + Sync {
    /// A source was checked; `stale` tells whether it will be regenerated.
    fn source_checked(&self, _source: &Path, _stale: bool) {}

    /// A raster file is about to be generated.
    fn generating(&self, _output: &Path) {}

    /// A metadata file was written.
    fn metadata_written(&self, _path: &Path) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn source_checked(&self, source: &Path, stale: bool) {
        if stale {
            tracing::debug!(source = %source.display(), "source is stale");
        } else {
            tracing::debug!(source = %source.display(), "source is up to date");
        }
    }

    fn generating(&self, output: &Path) {
        tracing::info!("Generating {}", output.display());
    }

    fn metadata_written(&self, path: &Path) {
        tracing::debug!("Wrote {}", path.display());
    }
}
