#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("`{program}` not found or could not be started")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("`{command}` exited with {status}")]
    Exited { command: String, status: String },

    #[error("`{command}` output was not valid UTF-8")]
    InvalidUtf8 {
        command: String,
        source: std::string::FromUtf8Error,
    },
}
