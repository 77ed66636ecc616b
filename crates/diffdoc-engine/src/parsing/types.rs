use std::collections::BTreeMap;

use super::span::Span;

/// A raw directive block before its type has been interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    /// Whitespace-separated words after the marker: block type, then name.
    pub arguments: Vec<String>,
    pub options: BTreeMap<String, String>,
    /// Unindented content, line terminators preserved.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// One prose line, terminator included.
    Text(String),
    Directive(DirectiveBlock),
}

/// A parsed node with the position of its first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 1-based line number of the node's first line.
    pub line: usize,
    /// Bytes covered in the source, from the first line to the last consumed one.
    pub span: Span,
    pub kind: NodeKind,
}
