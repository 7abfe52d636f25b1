//! Core types for godockerize.
//!
//! This crate parses `//docker:` directives out of Go sources
//! ([`scanner`], [`Directive`]), merges them into a [`BuildConfig`]
//! ([`aggregate`]), and defines the `godockerize.toml` schema
//! ([`DockerizeConfig`]), resolved packages ([`PackageSpec`]), and the shared
//! error type.

pub mod aggregate;
pub mod config;
pub mod directive;
pub mod error;
pub mod package;
pub mod scanner;

pub use aggregate::{BASELINE_PACKAGES, BuildConfig, UserSpec, collect};
pub use config::{BuildDefaults, DockerizeConfig};
pub use directive::{Directive, DirectiveError};
pub use error::{Error, Result};
pub use package::PackageSpec;
pub use scanner::{ScanError, SourceDirective};
