use godockerize_core::DockerizeConfig;
use godockerize_toolchain::Toolchain;

use super::build_pipeline::{self, BuildOptions};

/// Raw `godockerize build` flags, before merging with godockerize.toml.
pub struct BuildFlags {
    pub packages: Vec<String>,
    pub tag: Option<String>,
    pub base: Option<String>,
    pub env: Vec<String>,
    pub dry_run: bool,
}

/// Generate a Dockerfile for the packages and, unless `dry_run`, build the image.
pub async fn build(flags: BuildFlags) -> anyhow::Result<()> {
    if flags.packages.is_empty() {
        anyhow::bail!(r#""godockerize build" requires 1 or more arguments"#);
    }

    let work_dir = std::env::current_dir()?;
    let config = DockerizeConfig::load(&work_dir)?;
    let options = BuildOptions::merge(flags, config, work_dir);

    let toolchain = Toolchain::new();
    build_pipeline::run(&toolchain, &options, &mut std::io::stdout()).await?;
    Ok(())
}
