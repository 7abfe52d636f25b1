use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::dockerfile::ImageDefinition;

/// Temporary Docker build context holding the Dockerfile and compiled binaries.
///
/// The directory and everything in it is removed when the value is dropped,
/// on success and on every error path.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    pub fn create() -> Result<Self, StagingError> {
        let dir = tempfile::Builder::new()
            .prefix("godockerize")
            .tempdir()
            .map_err(|e| StagingError::Create { source: e })?;
        tracing::debug!(path = %dir.path().display(), "created staging directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the binary for `name` is written by the compiler.
    pub fn binary_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `Dockerfile` into the staging directory.
    pub fn write_dockerfile(&self, definition: &ImageDefinition) -> Result<PathBuf, StagingError> {
        let path = self.dir.path().join("Dockerfile");
        std::fs::write(&path, definition.to_dockerfile()).map_err(|e| {
            StagingError::WriteDockerfile {
                path: path.clone(),
                source: e,
            }
        })?;
        Ok(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("failed to create staging directory")]
    Create { source: std::io::Error },
    #[error("failed to write Dockerfile at {path}")]
    WriteDockerfile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
