//! Resolved Go packages.

use serde::Deserialize;
use std::path::PathBuf;

/// A Go package resolved by the go tool.
///
/// Deserializes from the subset of `go list -json` output godockerize needs.
///
/// # Examples
///
/// ```
/// use godockerize_core::PackageSpec;
/// use std::path::PathBuf;
///
/// let pkg = PackageSpec {
///     import_path: "example.com/app/cmd/server".to_owned(),
///     dir: PathBuf::from("/src/app/cmd/server"),
///     go_files: vec!["main.go".to_owned()],
/// };
/// assert_eq!(pkg.binary_name(), "server");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageSpec {
    /// Full import path, e.g. `example.com/app/cmd/server`
    #[serde(rename = "ImportPath")]
    pub import_path: String,
    /// Absolute directory containing the package sources
    #[serde(rename = "Dir")]
    pub dir: PathBuf,
    /// Compilable non-test Go files, relative to `dir`
    #[serde(rename = "GoFiles", default)]
    pub go_files: Vec<String>,
}

impl PackageSpec {
    /// Name of the compiled binary: the last element of the import path.
    pub fn binary_name(&self) -> &str {
        let trimmed = self.import_path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Absolute paths of the package's Go files, in listing order.
    pub fn source_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.go_files.iter().map(|name| self.dir.join(name))
    }
}
