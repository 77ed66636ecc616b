use std::collections::BTreeMap;

use super::{Element, ElementKind};
use crate::parsing::{DirectiveBlock, Node, NodeKind, ParseError};

pub fn read_elements(nodes: Vec<Node>) -> Result<Vec<Element>, ParseError> {
    nodes.into_iter().map(read_element).collect()
}

pub fn read_element(node: Node) -> Result<Element, ParseError> {
    let kind = match node.kind {
        NodeKind::Text(text) => ElementKind::Text(text),
        NodeKind::Directive(block) => read_directive(node.line, block)?,
    };
    Ok(Element {
        line: node.line,
        span: node.span,
        kind,
    })
}

fn read_directive(line: usize, block: DirectiveBlock) -> Result<ElementKind, ParseError> {
    let DirectiveBlock {
        arguments,
        options,
        content,
    } = block;

    let [element_type, name] = <[String; 2]>::try_from(arguments).map_err(|arguments| {
        ParseError::format(
            line,
            format!("expected block type and snippet name, got {arguments:?}"),
        )
    })?;

    let mut options = Options { line, options };
    let kind = match element_type.as_str() {
        "start" => ElementKind::Start {
            name,
            language: options.take("language")?,
            render: options.take_render()?,
            content,
        },
        "replace" => ElementKind::Replace {
            name,
            render: options.take_render()?,
            content,
        },
        "diff" => ElementKind::Diff {
            name,
            render: options.take_render()?,
            content,
        },
        "output" => ElementKind::Output {
            name,
            render: options.take_render()?,
            content,
        },
        "render" => ElementKind::Render { name, content },
        other => {
            return Err(ParseError::format(
                line,
                format!("unhandled element type {other:?}"),
            ));
        }
    };
    options.finish()?;
    Ok(kind)
}

/// Options of one block, consumed as they are read.
struct Options {
    line: usize,
    options: BTreeMap<String, String>,
}

impl Options {
    fn take(&mut self, key: &str) -> Result<String, ParseError> {
        self.options
            .remove(key)
            .ok_or_else(|| ParseError::format(self.line, format!("missing option {key:?}")))
    }

    fn take_render(&mut self) -> Result<bool, ParseError> {
        match self.take("render")?.as_str() {
            "True" => Ok(true),
            "False" => Ok(false),
            other => Err(ParseError::format(
                self.line,
                format!("render option must be True or False, got {other:?}"),
            )),
        }
    }

    fn finish(self) -> Result<(), ParseError> {
        if self.options.is_empty() {
            Ok(())
        } else {
            Err(ParseError::format(
                self.line,
                format!("extra options: {:?}", self.options),
            ))
        }
    }
}
