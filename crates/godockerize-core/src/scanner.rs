//! Go source comment scanning.
//!
//! Each file is parsed with the tree-sitter Go grammar. Files with syntax
//! errors are rejected, and the `comment` nodes of a clean tree are yielded
//! in source order.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

use crate::directive::Directive;

/// A comment found in Go source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text including its `//` or `/* */` delimiters.
    /// Line comments never include the trailing newline.
    pub text: String,
    /// 1-based line of the first comment character.
    pub line: usize,
    /// 1-based byte column of the first comment character.
    pub column: usize,
}

/// A directive together with the source position it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDirective {
    pub directive: Directive,
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to load the Go grammar")]
    Grammar(#[source] tree_sitter::LanguageError),

    #[error("Go parser produced no syntax tree")]
    NoTree,

    #[error("{line}:{column}: {what}")]
    Syntax {
        line: usize,
        column: usize,
        what: String,
    },
}

/// Parses `source` as Go and returns every comment, in source order.
///
/// # Errors
///
/// [`ScanError::Syntax`] at the first error or missing token if the source
/// is not valid Go.
pub fn comments(source: &str) -> Result<Vec<Comment>, ScanError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::language())
        .map_err(ScanError::Grammar)?;
    let tree = parser.parse(source, None).ok_or(ScanError::NoTree)?;
    let root = tree.root_node();

    if root.has_error() {
        let bad = first_error(root).unwrap_or(root);
        let pos = bad.start_position();
        let what = if bad.is_missing() {
            format!("syntax error: missing {}", bad.kind())
        } else {
            "syntax error".to_owned()
        };
        return Err(ScanError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
            what,
        });
    }

    let mut out = Vec::new();
    collect_comments(root, source, &mut out);
    Ok(out)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.has_error())
        .find_map(first_error);
    found
}

fn collect_comments(node: Node<'_>, source: &str, out: &mut Vec<Comment>) {
    if node.kind() == "comment" {
        if let Some(text) = source.get(node.byte_range()) {
            let pos = node.start_position();
            out.push(Comment {
                text: text.trim_end_matches(['\r', '\n']).to_owned(),
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, source, out);
    }
}

/// Reads a Go file and parses every directive comment in it, in source order.
///
/// # Errors
///
/// - [`Error::SourceRead`](crate::Error::SourceRead) if the file cannot be read
/// - [`Error::Syntax`](crate::Error::Syntax) if the file is not valid Go
/// - [`Error::InvalidDirective`](crate::Error::InvalidDirective) for a
///   `//docker:` comment with an unknown keyword or missing argument
pub fn scan_file(path: &Path) -> crate::Result<Vec<SourceDirective>> {
    let source = std::fs::read_to_string(path).map_err(|e| crate::Error::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let found = comments(&source).map_err(|e| match e {
        ScanError::Syntax { line, column, what } => crate::Error::Syntax {
            path: path.to_path_buf(),
            line,
            column,
            what,
        },
        other => crate::Error::Parser {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    let mut directives = Vec::new();
    for comment in found {
        let parsed =
            Directive::parse(&comment.text).map_err(|reason| crate::Error::InvalidDirective {
                path: path.to_path_buf(),
                line: comment.line,
                column: comment.column,
                text: comment.text.clone(),
                reason,
            })?;

        if let Some(directive) = parsed {
            directives.push(SourceDirective {
                directive,
                path: path.to_path_buf(),
                line: comment.line,
                column: comment.column,
            });
        }
    }

    tracing::debug!(
        path = %path.display(),
        directives = directives.len(),
        "scanned source file"
    );

    Ok(directives)
}
