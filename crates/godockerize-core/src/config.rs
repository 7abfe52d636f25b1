use serde::{Deserialize, Serialize};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE: &str = "godockerize.toml";

/// godockerize.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerizeConfig {
    #[serde(default)]
    pub build: BuildDefaults,
}

/// `[build]` defaults, overridden by the matching CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDefaults {
    /// Base Docker image
    #[serde(default = "default_base_image")]
    pub base: String,
    /// Image name and optional tag passed to `docker build -t`
    #[serde(default)]
    pub tag: Option<String>,
    /// Extra `KEY=VALUE` environment tokens, merged with `--env`
    #[serde(default)]
    pub env: Vec<String>,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            base: default_base_image(),
            tag: None,
            env: Vec::new(),
        }
    }
}

impl DockerizeConfig {
    /// Load from godockerize.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %config_path.display(), "loading config");
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

pub fn default_base_image() -> String {
    "alpine:3.6".to_owned()
}
