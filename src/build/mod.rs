pub(crate) mod builder;
pub(crate) mod observer;
pub(crate) mod options;
pub(crate) mod pipeline;
pub(crate) mod plan;
pub(crate) mod staleness;
pub(crate) mod walk;
pub(crate) mod write;
