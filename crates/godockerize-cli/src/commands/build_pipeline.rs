use std::io::Write;
use std::path::PathBuf;

use godockerize_build::{DockerfileGenerator, ImageDefinition, StagingDir};
use godockerize_core::{BuildConfig, DockerizeConfig, collect};
use godockerize_toolchain::{CommandExecutor, Toolchain};

use super::LOG_PREFIX;
use super::build::BuildFlags;

/// Effective build settings: CLI flags over godockerize.toml over defaults.
pub(crate) struct BuildOptions {
    pub packages: Vec<String>,
    pub base: String,
    pub tag: Option<String>,
    pub env: Vec<String>,
    pub dry_run: bool,
    pub work_dir: PathBuf,
}

impl BuildOptions {
    pub(crate) fn merge(flags: BuildFlags, config: DockerizeConfig, work_dir: PathBuf) -> Self {
        let defaults = config.build;
        let mut env = defaults.env;
        env.extend(flags.env);

        Self {
            packages: flags.packages,
            base: flags.base.unwrap_or(defaults.base),
            tag: flags
                .tag
                .filter(|t| !t.is_empty())
                .or(defaults.tag.filter(|t| !t.is_empty())),
            env,
            dry_run: flags.dry_run,
            work_dir,
        }
    }
}

/// Run the build pipeline: resolve → scan → render → (stop on dry run) →
/// stage → compile each package → docker build.
///
/// Progress and the rendered Dockerfile go to `out`. The staging directory is
/// removed when this returns, whatever the outcome.
pub(crate) async fn run<E: CommandExecutor>(
    toolchain: &Toolchain<E>,
    options: &BuildOptions,
    out: &mut impl Write,
) -> anyhow::Result<ImageDefinition> {
    let staging = StagingDir::create()?;

    let mut packages = Vec::with_capacity(options.packages.len());
    for name in &options.packages {
        packages.push(toolchain.resolve_package(name, &options.work_dir).await?);
    }

    let config = collect(&packages, BuildConfig::seeded(options.env.iter().cloned()))?;
    let definition = DockerfileGenerator::new(&config, &packages, &options.base).render();

    writeln!(out, "{LOG_PREFIX} Generated Dockerfile:")?;
    write!(out, "{definition}")?;

    if options.dry_run {
        tracing::info!("dry run, skipping build");
        return Ok(definition);
    }

    staging.write_dockerfile(&definition)?;

    let go_env = toolchain.go_env().await?;
    for package in &packages {
        let name = package.binary_name();
        writeln!(out, "{LOG_PREFIX} Building Go binary {name}...")?;
        out.flush()?;
        toolchain
            .build_binary(package, &staging.binary_path(name), &options.work_dir, &go_env)
            .await?;
    }

    writeln!(out, "{LOG_PREFIX} Building Docker image...")?;
    out.flush()?;
    toolchain
        .build_image(staging.path(), options.tag.as_deref())
        .await?;

    Ok(definition)
}
