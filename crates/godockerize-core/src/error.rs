use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Source scanning ──
    #[error("failed to read Go source file {path}")]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: {what}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        what: String,
    },

    #[error("failed to parse Go source file {path}")]
    Parser {
        path: PathBuf,
        source: crate::scanner::ScanError,
    },

    #[error("{}:{line}:{column}: invalid docker comment: {text}", path.display())]
    InvalidDirective {
        path: PathBuf,
        line: usize,
        column: usize,
        text: String,
        #[source]
        reason: crate::directive::DirectiveError,
    },

    // ── Aggregation ──
    #[error("{}:{line}:{column}: user set twice (already set to '{existing}')", path.display())]
    UserSetTwice {
        path: PathBuf,
        line: usize,
        column: usize,
        existing: String,
    },
}
