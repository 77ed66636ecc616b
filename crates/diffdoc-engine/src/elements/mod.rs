//! Typed document elements.
//!
//! The reader turns raw directive blocks into [`ElementKind`] variants; the
//! writer turns them back into directive markup.

pub mod reader;
pub mod writer;

use crate::parsing::Span;

pub use reader::{read_element, read_elements};
pub use writer::to_markup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A single verbatim prose line.
    Text(String),
    /// Declares a new snippet.
    Start {
        name: String,
        language: String,
        render: bool,
        content: String,
    },
    /// Overwrites a snippet's full content.
    Replace {
        name: String,
        render: bool,
        content: String,
    },
    /// Patches a snippet with unified-diff `content`.
    Diff {
        name: String,
        render: bool,
        content: String,
    },
    /// Shows an excerpt of a snippet without changing it.
    Render { name: String, content: String },
    /// Documents the expected output of running a snippet.
    Output {
        name: String,
        render: bool,
        content: String,
    },
}

impl ElementKind {
    /// Directive keyword, or `"text"` for prose.
    pub fn keyword(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Start { .. } => "start",
            ElementKind::Replace { .. } => "replace",
            ElementKind::Diff { .. } => "diff",
            ElementKind::Render { .. } => "render",
            ElementKind::Output { .. } => "output",
        }
    }

    /// Snippet the element refers to; `None` for prose.
    pub fn name(&self) -> Option<&str> {
        match self {
            ElementKind::Text(_) => None,
            ElementKind::Start { name, .. }
            | ElementKind::Replace { name, .. }
            | ElementKind::Diff { name, .. }
            | ElementKind::Render { name, .. }
            | ElementKind::Output { name, .. } => Some(name),
        }
    }
}

/// A typed element with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// 1-based line of the element's first source line.
    pub line: usize,
    pub span: Span,
    pub kind: ElementKind,
}

impl Element {
    /// Element not backed by any source text, mostly for tests.
    pub fn detached(line: usize, kind: ElementKind) -> Self {
        Self {
            line,
            span: Span::default(),
            kind,
        }
    }

    /// Same position, different kind.
    pub fn with_kind(&self, kind: ElementKind) -> Self {
        Self {
            line: self.line,
            span: self.span,
            kind,
        }
    }
}
