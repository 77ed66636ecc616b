//! # Markup Parsing
//!
//! Splits a document into prose lines and `.. diff-doc::` directive blocks.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (blank, indented, marker arguments)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine
//!    consumes classified lines and emits `Node`s as blocks open and close
//!
//! ## Block Shape
//!
//! ```text
//! .. diff-doc:: start example        <- marker + arguments
//!     :language: python              <- options, one indent unit
//!     :render: True
//!                                    <- skipped blank lines
//!     print(1)                       <- content, ends at the last indented line
//! ```
//!
//! ## Key Invariants
//!
//! - Every node carries the 1-based number of its first source line
//! - Blank lines after a block's last indented line are emitted as prose
//! - Node spans are disjoint and cover the document in order

pub mod builder;
pub mod classify;
pub mod error;
pub mod lines;
pub mod markup;
pub mod span;
pub mod types;

use xi_rope::Rope;

pub use builder::BlockBuilder;
pub use classify::{DirectiveLineClassifier, LineClass};
pub use error::ParseError;
pub use markup::Markup;
pub use span::Span;
pub use types::{DirectiveBlock, Node, NodeKind};

use lines::lines_with_spans;

#[derive(Debug)]
pub struct ParsedDoc {
    pub nodes: Vec<Node>,
}

pub fn parse_document(rope: &Rope) -> Result<ParsedDoc, ParseError> {
    let classifier = DirectiveLineClassifier;
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(rope) {
        builder.push(classifier.classify(lr))?;
    }

    Ok(ParsedDoc {
        nodes: builder.finish(),
    })
}

/// Convenience: parse a document held in a string.
pub fn parse_str(source: &str) -> Result<ParsedDoc, ParseError> {
    parse_document(&Rope::from(source))
}

#[cfg(test)]
mod tests;
