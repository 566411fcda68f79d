//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! AST nodes describe themselves as fragments; only [`super::CodeBuilder`]
//! knows about indentation and line endings.

/// Represents a fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, indented body, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A documentation comment, one entry per line.
    Doc(Vec<String>),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>, close: Option<String>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// A block closed by `close`, the common `{ ... }` shape.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>, close: &str) -> Self {
        Self::block(header, body, Some(close.to_string()))
    }

    /// A doc comment; text is split on newlines. Empty text yields no comment.
    pub fn doc(text: &str) -> Self {
        Self::Doc(text.lines().map(str::to_string).collect())
    }

    /// Whether rendering this fragment produces no output.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Doc(lines) => lines.is_empty(),
            Self::Sequence(fragments) => fragments.iter().all(CodeFragment::is_empty),
            _ => false,
        }
    }
}

/// Trait for types that can be rendered to code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

/// Interleave groups of fragments with blank lines, skipping empty groups.
pub fn separated(groups: impl IntoIterator<Item = Vec<CodeFragment>>) -> Vec<CodeFragment> {
    let mut out = Vec::new();
    for group in groups {
        if group.iter().all(CodeFragment::is_empty) {
            continue;
        }
        if !out.is_empty() {
            out.push(CodeFragment::Blank);
        }
        out.extend(group);
    }
    out
}
