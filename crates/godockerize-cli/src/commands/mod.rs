mod build;
mod build_pipeline;

/// Prefix for user-facing progress lines.
pub(crate) const LOG_PREFIX: &str = "godockerize:";

pub use build::{BuildFlags, build};
