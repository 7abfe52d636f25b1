use crate::error::ExecError;
use crate::executor::{CommandExecutor, CommandSpec, RealExecutor};
use godockerize_core::PackageSpec;
use serde::Deserialize;
use std::path::Path;

/// Target operating system for compiled binaries.
pub const TARGET_OS: &str = "linux";
/// Target architecture for compiled binaries.
pub const TARGET_ARCH: &str = "amd64";

/// Build tags passed to `go build`.
const BUILD_TAGS: &str = "dist";

/// Toolchain locations reported by `go env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoEnv {
    pub goroot: String,
    pub gopath: String,
    pub gocache: String,
    pub gomodcache: String,
}

impl GoEnv {
    const VARS: [&'static str; 4] = ["GOROOT", "GOPATH", "GOCACHE", "GOMODCACHE"];

    /// The complete environment for `go build`. Nothing else from the
    /// calling process is passed through.
    pub fn compile_env(&self) -> Vec<(String, String)> {
        [
            ("GOOS", TARGET_OS),
            ("GOARCH", TARGET_ARCH),
            ("CGO_ENABLED", "0"),
            ("GOROOT", self.goroot.as_str()),
            ("GOPATH", self.gopath.as_str()),
            ("GOCACHE", self.gocache.as_str()),
            ("GOMODCACHE", self.gomodcache.as_str()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
    }
}

#[derive(Deserialize)]
struct GoListEntry {
    #[serde(flatten)]
    spec: PackageSpec,
    #[serde(rename = "Error")]
    error: Option<GoListError>,
}

#[derive(Deserialize)]
struct GoListError {
    #[serde(rename = "Err")]
    err: String,
}

/// go and docker operations, parameterized over the executor for testability.
pub struct Toolchain<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl Toolchain<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for Toolchain<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> Toolchain<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Package resolution ──

    /// Resolve a package name or pattern to exactly one Go package.
    pub async fn resolve_package(
        &self,
        name: &str,
        work_dir: &Path,
    ) -> Result<PackageSpec, ResolveError> {
        let cmd = CommandSpec::new("go", ["list", "-json", name]).current_dir(work_dir);
        let stdout = self
            .executor
            .exec(&cmd)
            .await
            .map_err(|e| ResolveError::List {
                package: name.to_owned(),
                source: e,
            })?;

        let mut entries = Vec::new();
        for entry in serde_json::Deserializer::from_str(&stdout).into_iter::<GoListEntry>() {
            let entry = entry.map_err(|e| ResolveError::Parse {
                package: name.to_owned(),
                source: e,
            })?;
            if let Some(error) = entry.error {
                return Err(ResolveError::Package {
                    package: name.to_owned(),
                    detail: error.err,
                });
            }
            entries.push(entry.spec);
        }

        if entries.len() != 1 {
            return Err(ResolveError::NotSinglePackage {
                package: name.to_owned(),
                matched: entries.into_iter().map(|p| p.import_path).collect(),
            });
        }
        let spec = entries.remove(0);

        tracing::debug!(
            import_path = %spec.import_path,
            dir = %spec.dir.display(),
            files = spec.go_files.len(),
            "resolved package"
        );
        Ok(spec)
    }

    // ── Compilation ──

    /// Query `go env` for the toolchain directories forwarded to `go build`.
    pub async fn go_env(&self) -> Result<GoEnv, CompileError> {
        let cmd = CommandSpec::new("go", std::iter::once("env").chain(GoEnv::VARS));
        let stdout = self
            .executor
            .exec(&cmd)
            .await
            .map_err(|e| CompileError::GoEnv { source: e })?;

        let values: Vec<&str> = stdout.lines().map(str::trim).collect();
        match values.as_slice() {
            [goroot, gopath, gocache, gomodcache] => Ok(GoEnv {
                goroot: (*goroot).to_owned(),
                gopath: (*gopath).to_owned(),
                gocache: (*gocache).to_owned(),
                gomodcache: (*gomodcache).to_owned(),
            }),
            _ => Err(CompileError::MalformedGoEnv { output: stdout }),
        }
    }

    /// Compile one package to a static linux/amd64 executable at `output`.
    pub async fn build_binary(
        &self,
        package: &PackageSpec,
        output: &Path,
        work_dir: &Path,
        go_env: &GoEnv,
    ) -> Result<(), CompileError> {
        let output_str = output
            .to_str()
            .ok_or_else(|| CompileError::InvalidPath(output.to_path_buf()))?;

        let cmd = CommandSpec::new(
            "go",
            [
                "build",
                "-buildmode",
                "exe",
                "-tags",
                BUILD_TAGS,
                "-a",
                "-o",
                output_str,
                package.import_path.as_str(),
            ],
        )
        .current_dir(work_dir)
        .env_clear_with(go_env.compile_env());

        self.executor
            .exec_streaming(&cmd)
            .await
            .map_err(|e| CompileError::Build {
                package: package.import_path.clone(),
                source: e,
            })
    }

    // ── Image build ──

    /// Run `docker build` with `context_dir` as the build context.
    /// An empty `tag` is treated as no tag.
    pub async fn build_image(
        &self,
        context_dir: &Path,
        tag: Option<&str>,
    ) -> Result<(), ImageBuildError> {
        let mut docker_args = vec!["build"];
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            docker_args.extend(["-t", tag]);
        }
        docker_args.push(".");

        let cmd = CommandSpec::new("docker", docker_args).current_dir(context_dir);
        self.executor
            .exec_streaming(&cmd)
            .await
            .map_err(|e| ImageBuildError::Build { source: e })
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot resolve package '{package}'")]
    List { package: String, source: ExecError },

    #[error("unexpected `go list` output for '{package}'")]
    Parse {
        package: String,
        source: serde_json::Error,
    },

    #[error("cannot load package '{package}': {detail}")]
    Package { package: String, detail: String },

    #[error(
        "'{package}' must name exactly one package, matched: [{}]",
        matched.join(", ")
    )]
    NotSinglePackage {
        package: String,
        matched: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to query `go env`")]
    GoEnv { source: ExecError },

    #[error("unexpected `go env` output:\n{output}")]
    MalformedGoEnv { output: String },

    #[error("output path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),

    #[error("failed to build Go binary for {package}")]
    Build { package: String, source: ExecError },
}

#[derive(Debug, thiserror::Error)]
pub enum ImageBuildError {
    #[error("docker build failed")]
    Build { source: ExecError },
}
