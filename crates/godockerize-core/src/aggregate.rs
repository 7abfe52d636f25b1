//! Merging directives from all packages into one [`BuildConfig`].

use std::collections::BTreeSet;

use crate::directive::Directive;
use crate::package::PackageSpec;
use crate::scanner::{self, SourceDirective};

/// Packages every image installs: CA roots, `/etc/mime.types`, and the
/// `tini` init process used by the entrypoint.
pub const BASELINE_PACKAGES: &[&str] = &["ca-certificates", "mailcap", "tini"];

/// Unprivileged user requested by a `//docker:user` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSpec {
    pub name: String,
    /// Directories created and chowned to the user, in directive order.
    pub dirs: Vec<String>,
}

/// Image settings accumulated from CLI seeds and source directives.
///
/// `env`, `expose`, and `install` are sets, so they come out sorted and
/// deduplicated. `run` keeps every command in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub env: BTreeSet<String>,
    pub expose: BTreeSet<String>,
    pub install: BTreeSet<String>,
    pub run: Vec<String>,
    pub user: Option<UserSpec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            env: BTreeSet::new(),
            expose: BTreeSet::new(),
            install: BASELINE_PACKAGES.iter().map(|p| (*p).to_owned()).collect(),
            run: Vec::new(),
            user: None,
        }
    }
}

impl BuildConfig {
    /// Baseline configuration with extra `KEY=VALUE` environment seeds.
    pub fn seeded<I, S>(env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        config.env.extend(env.into_iter().map(Into::into));
        config
    }

    /// Merge one directive.
    ///
    /// # Errors
    ///
    /// [`Error::UserSetTwice`](crate::Error::UserSetTwice) if a user was
    /// already set by an earlier directive.
    pub fn apply(&mut self, found: SourceDirective) -> crate::Result<()> {
        match found.directive {
            Directive::Env(tokens) => self.env.extend(tokens),
            Directive::Expose(tokens) => self.expose.extend(tokens),
            Directive::Install(tokens) => self.install.extend(tokens),
            Directive::Run(command) => self.run.push(command),
            Directive::User { name, dirs } => {
                if let Some(existing) = &self.user {
                    return Err(crate::Error::UserSetTwice {
                        path: found.path,
                        line: found.line,
                        column: found.column,
                        existing: existing.name.clone(),
                    });
                }
                self.user = Some(UserSpec { name, dirs });
            }
        }
        Ok(())
    }
}

/// Scan every package, in order, and fold their directives into `config`.
///
/// Packages are visited in the given order and files in listing order, so
/// `run` commands keep their source order across the whole build.
///
/// # Errors
///
/// Returns the first scan, parse, or merge error; `config` is consumed so no
/// partially merged configuration escapes.
pub fn collect(packages: &[PackageSpec], mut config: BuildConfig) -> crate::Result<BuildConfig> {
    for package in packages {
        for path in package.source_paths() {
            for found in scanner::scan_file(&path)? {
                tracing::debug!(
                    keyword = found.directive.keyword(),
                    path = %found.path.display(),
                    line = found.line,
                    "applying directive"
                );
                config.apply(found)?;
            }
        }
    }

    tracing::debug!(
        env = config.env.len(),
        expose = config.expose.len(),
        install = config.install.len(),
        run = config.run.len(),
        user = config.user.as_ref().map(|u| u.name.as_str()),
        "build configuration collected"
    );

    Ok(config)
}
