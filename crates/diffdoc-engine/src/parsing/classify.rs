use super::{lines::LineRef, markup::Markup};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    pub line: LineRef,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Whether the line starts with one indent unit.
    pub is_indented: bool,
    /// Arguments if the line opens a directive block.
    pub marker: Option<Vec<String>>,
}

/// Classifies individual lines for the block building phase.
pub struct DirectiveLineClassifier;

impl DirectiveLineClassifier {
    pub fn classify(&self, line: LineRef) -> LineClass {
        LineClass {
            is_blank: Markup::is_blank(&line.text),
            is_indented: Markup::is_indented(&line.text),
            marker: Markup::arguments(&line.text),
            line,
        }
    }
}
