//! `//docker:` comment directives.
//!
//! A directive is a Go line comment of the form `//docker:<keyword> <payload>`.
//! The payload of `env`, `expose`, and `install` is a whitespace-separated
//! token list, `run` keeps its payload verbatim, and `user` takes a user name
//! followed by the directories that user should own.

/// Prefix that marks a comment as a directive.
pub const MARKER: &str = "//docker:";

/// A build directive extracted from a source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `KEY=VALUE` tokens added to the image environment.
    Env(Vec<String>),
    /// Ports exposed by the image.
    Expose(Vec<String>),
    /// Alpine packages installed with `apk add`.
    Install(Vec<String>),
    /// A shell command run at image build time.
    Run(String),
    /// Unprivileged user the entrypoint runs as.
    User { name: String, dirs: Vec<String> },
}

impl Directive {
    /// Keyword that introduces this directive in a comment.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Env(_) => "env",
            Self::Expose(_) => "expose",
            Self::Install(_) => "install",
            Self::Run(_) => "run",
            Self::User { .. } => "user",
        }
    }

    /// Parse the text of a comment, including its leading `//`.
    ///
    /// Returns `Ok(None)` when the comment does not start with [`MARKER`].
    ///
    /// # Examples
    ///
    /// ```
    /// use godockerize_core::Directive;
    ///
    /// let d = Directive::parse("//docker:expose 80 443").unwrap();
    /// assert_eq!(d, Some(Directive::Expose(vec!["80".into(), "443".into()])));
    ///
    /// assert_eq!(Directive::parse("// plain comment").unwrap(), None);
    /// ```
    pub fn parse(text: &str) -> Result<Option<Self>, DirectiveError> {
        let Some(rest) = text.strip_prefix(MARKER) else {
            return Ok(None);
        };

        let (keyword, payload) = match rest.split_once(' ') {
            Some((keyword, payload)) => (keyword, Some(payload)),
            None => (rest, None),
        };

        let directive = match keyword {
            "env" => Self::Env(fields(require(keyword, payload)?)),
            "expose" => Self::Expose(fields(require(keyword, payload)?)),
            "install" => Self::Install(fields(require(keyword, payload)?)),
            "run" => Self::Run(require(keyword, payload)?.to_owned()),
            "user" => {
                let mut args = fields(require(keyword, payload)?).into_iter();
                let name = args.next().ok_or(DirectiveError::MissingUserName)?;
                Self::User {
                    name,
                    dirs: args.collect(),
                }
            }
            other => return Err(DirectiveError::UnknownKeyword(other.to_owned())),
        };

        Ok(Some(directive))
    }
}

fn require<'a>(keyword: &str, payload: Option<&'a str>) -> Result<&'a str, DirectiveError> {
    payload.ok_or_else(|| DirectiveError::MissingPayload(keyword.to_owned()))
}

fn fields(payload: &str) -> Vec<String> {
    payload.split_whitespace().map(str::to_owned).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("unknown keyword '{0}' (expected env, expose, install, run, or user)")]
    UnknownKeyword(String),

    #[error("'{0}' requires a space-separated argument")]
    MissingPayload(String),

    #[error("'user' requires a user name")]
    MissingUserName,
}
