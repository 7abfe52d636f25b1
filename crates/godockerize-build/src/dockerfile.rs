use std::fmt;

use godockerize_core::{BuildConfig, PackageSpec};

/// Suffix marking an Alpine package pinned to the edge repositories.
pub const EDGE_SUFFIX: &str = "@edge";

const EDGE_REPOSITORIES: &str = r#"RUN echo -e "@edge http://dl-cdn.alpinelinux.org/alpine/edge/main\n@edge http://dl-cdn.alpinelinux.org/alpine/edge/community" >> /etc/apk/repositories"#;

/// A rendered Dockerfile, one instruction per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDefinition {
    lines: Vec<String>,
}

impl ImageDefinition {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Dockerfile text: instructions separated and terminated by newlines.
    pub fn to_dockerfile(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Indented listing for terminal output.
impl fmt::Display for ImageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// Renders an Alpine-based Dockerfile that installs prebuilt Go binaries.
///
/// The first package is the entrypoint; every package's binary is added to
/// `/usr/local/bin`.
pub struct DockerfileGenerator<'a> {
    config: &'a BuildConfig,
    packages: &'a [PackageSpec],
    base: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a BuildConfig, packages: &'a [PackageSpec], base: &'a str) -> Self {
        Self {
            config,
            packages,
            base,
        }
    }

    pub fn render(&self) -> ImageDefinition {
        let config = self.config;
        let mut lines = vec![format!("FROM {}", self.base)];

        if config.install.iter().any(|p| p.ends_with(EDGE_SUFFIX)) {
            lines.push(EDGE_REPOSITORIES.to_owned());
        }
        if !config.install.is_empty() {
            lines.push(format!("RUN apk add --no-cache {}", join(&config.install)));
        }

        lines.extend(config.run.iter().map(|cmd| format!("RUN {cmd}")));

        if !config.env.is_empty() {
            lines.push(format!("ENV {}", join(&config.env)));
        }
        if !config.expose.is_empty() {
            lines.push(format!("EXPOSE {}", join(&config.expose)));
        }

        if let Some(user) = &config.user {
            let u = &user.name;
            lines.push(format!(
                "RUN addgroup -S {u} && adduser -S -G {u} -h /home/{u} {u}"
            ));
            for dir in &user.dirs {
                lines.push(format!("RUN mkdir -p {dir} && chown -R {u}:{u} {dir}"));
            }
            lines.push(format!("USER {u}"));
        }

        if let Some(entry) = self.packages.first() {
            lines.push(format!(
                r#"ENTRYPOINT ["/sbin/tini", "--", "/usr/local/bin/{}"]"#,
                entry.binary_name()
            ));
        }
        for package in self.packages {
            lines.push(format!("ADD {} /usr/local/bin/", package.binary_name()));
        }

        ImageDefinition { lines }
    }
}

fn join<'s>(tokens: impl IntoIterator<Item = &'s String>) -> String {
    tokens
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
