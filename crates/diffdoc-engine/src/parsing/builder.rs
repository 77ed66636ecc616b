use std::collections::BTreeMap;

use super::{
    classify::LineClass,
    error::ParseError,
    lines::LineRef,
    markup::Markup,
    span::Span,
    types::{DirectiveBlock, Node, NodeKind},
};

/// A directive block that has been opened but not yet emitted.
#[derive(Debug)]
struct OpenBlock {
    line: usize,
    span: Span,
    arguments: Vec<String>,
    options: BTreeMap<String, String>,
    content: String,
}

#[derive(Debug)]
enum BlockState {
    None,
    /// Directly after the marker line, reading `:key: value` lines.
    Options(OpenBlock),
    /// Past the options. Blank lines are held back until an indented line
    /// proves they sit inside the block rather than after it.
    Content {
        block: OpenBlock,
        started: bool,
        held: Vec<LineRef>,
    },
}

pub struct BlockBuilder {
    state: BlockState,
    out: Vec<Node>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: BlockState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: LineClass) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.state, BlockState::None) {
            BlockState::None => {
                self.open_or_text(c);
                Ok(())
            }
            BlockState::Options(mut block) => {
                if c.is_blank {
                    self.state = BlockState::Content {
                        block,
                        started: false,
                        held: vec![c.line],
                    };
                } else if c.is_indented {
                    Self::read_option(&mut block, &c.line)?;
                    self.state = BlockState::Options(block);
                } else {
                    self.close(block, vec![]);
                    self.open_or_text(c);
                }
                Ok(())
            }
            BlockState::Content {
                mut block,
                started,
                mut held,
            } => {
                if c.is_blank {
                    held.push(c.line);
                    self.state = BlockState::Content {
                        block,
                        started,
                        held,
                    };
                } else if c.is_indented {
                    // Blanks between the options and the first content line
                    // are consumed but are not content.
                    if started {
                        for blank in &held {
                            block.content.push_str(Markup::unindent(&blank.text));
                        }
                    }
                    block.content.push_str(Markup::unindent(&c.line.text));
                    block.span = block.span.cover(c.line.span);
                    self.state = BlockState::Content {
                        block,
                        started: true,
                        held: vec![],
                    };
                } else {
                    self.close(block, held);
                    self.open_or_text(c);
                }
                Ok(())
            }
        }
    }

    pub fn finish(mut self) -> Vec<Node> {
        // EOF flush
        match std::mem::replace(&mut self.state, BlockState::None) {
            BlockState::None => {}
            BlockState::Options(block) => self.close(block, vec![]),
            BlockState::Content { block, held, .. } => self.close(block, held),
        }
        self.out
    }

    fn open_or_text(&mut self, c: LineClass) {
        match c.marker {
            Some(arguments) => {
                log::trace!("line {}: opened block {:?}", c.line.number, arguments);
                self.state = BlockState::Options(OpenBlock {
                    line: c.line.number,
                    span: c.line.span,
                    arguments,
                    options: BTreeMap::new(),
                    content: String::new(),
                });
            }
            None => self.text(c.line),
        }
    }

    fn read_option(block: &mut OpenBlock, line: &LineRef) -> Result<(), ParseError> {
        let (key, value) = Markup::option(Markup::unindent(&line.text)).ok_or_else(|| {
            ParseError::format(
                line.number,
                format!(
                    "malformed option line {:?}, expected `:key: value`",
                    line.text.trim()
                ),
            )
        })?;
        if block.options.contains_key(&key) {
            return Err(ParseError::format(
                line.number,
                format!("duplicate option {key:?}"),
            ));
        }
        block.options.insert(key, value);
        block.span = block.span.cover(line.span);
        Ok(())
    }

    /// Emits `block`, then the trailing blank lines it did not consume.
    fn close(&mut self, block: OpenBlock, held: Vec<LineRef>) {
        log::trace!(
            "line {}: closed block with {} content bytes",
            block.line,
            block.content.len()
        );
        self.out.push(Node {
            line: block.line,
            span: block.span,
            kind: NodeKind::Directive(DirectiveBlock {
                arguments: block.arguments,
                options: block.options,
                content: block.content,
            }),
        });
        for line in held {
            self.text(line);
        }
    }

    fn text(&mut self, line: LineRef) {
        self.out.push(Node {
            line: line.number,
            span: line.span,
            kind: NodeKind::Text(line.text),
        });
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
