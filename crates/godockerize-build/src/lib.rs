//! Dockerfile generation and build staging for godockerize.
//!
//! # Build pipeline
//!
//! ```text
//! godockerize build <packages>
//!   1. Resolve     ── go list -json <pkg>
//!   2. Scan        ── //docker: comments → BuildConfig
//!   3. Dockerfile  ── DockerfileGenerator::render()   (stop here with --dry-run)
//!   4. Stage       ── StagingDir::write_dockerfile()
//!   5. Compile     ── go build -o <staging>/<bin>   (once per package)
//!   6. Image       ── docker build <staging>
//! ```
//!
//! # Layer order
//!
//! `FROM`, the optional `@edge` repository registration, `apk add`, each
//! `RUN` directive, `ENV`, `EXPOSE`, user setup, `ENTRYPOINT`, then one `ADD`
//! per package. Set-valued instructions list their tokens sorted, so the same
//! inputs always render the same Dockerfile.

pub mod dockerfile;
pub mod staging;

pub use dockerfile::{DockerfileGenerator, ImageDefinition};
pub use staging::{StagingDir, StagingError};
