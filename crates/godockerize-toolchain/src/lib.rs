pub mod client;
pub mod error;
pub mod executor;

pub use client::{CompileError, GoEnv, ImageBuildError, ResolveError, Toolchain};
pub use error::ExecError;
pub use executor::{CommandExecutor, CommandSpec, RealExecutor};
