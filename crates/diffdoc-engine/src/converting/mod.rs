//! Conversion of a single block between its `diff` and `replace` forms.
//!
//! The registry is rebuilt by replaying every element before the target,
//! so the conversion sees exactly the snippet state the compiler would.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use xi_rope::Rope;

use crate::compiling::{CompileError, Context, Registry, execute};
use crate::elements::{Element, ElementKind, to_markup};

/// Target form of a converted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Diff,
    Replace,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::Diff => "diff",
            Representation::Replace => "replace",
        })
    }
}

impl FromStr for Representation {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diff" => Ok(Representation::Diff),
            "replace" => Ok(Representation::Replace),
            other => Err(ConversionError::UnknownRepresentation(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unknown representation {0:?}, expected \"diff\" or \"replace\"")]
    UnknownRepresentation(String),

    #[error("line {line}: no element starts on this line")]
    NoElement { line: usize },

    #[error("line {line}: cannot convert a {from} element to {to}")]
    Unsupported {
        line: usize,
        from: &'static str,
        to: Representation,
    },

    #[error("line {line}: snippet {name:?} is unchanged, there is no diff to write")]
    Unchanged { line: usize, name: String },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Returns `elements` with the element starting on `line` rewritten in the
/// `to` representation. Only `diff` to `replace` and `replace` to `diff` are
/// supported.
pub fn convert(
    elements: &[Element],
    line: usize,
    to: Representation,
    context: &Context<'_>,
) -> Result<Vec<Element>, ConversionError> {
    let index = elements
        .iter()
        .position(|element| element.line == line)
        .ok_or(ConversionError::NoElement { line })?;
    let target = &elements[index];
    let preceding = &elements[..index];

    let kind = match (&target.kind, to) {
        (ElementKind::Diff { name, render, .. }, Representation::Replace) => {
            let registry = replay(preceding, context)?;
            let (patched, _) = execute(&registry, target, context)?;
            let snippet = patched.get(name).ok_or_else(|| CompileError::UnknownName {
                line,
                name: name.clone(),
            })?;
            ElementKind::Replace {
                name: name.clone(),
                render: *render,
                content: snippet.content.clone(),
            }
        }
        (
            ElementKind::Replace {
                name,
                render,
                content,
            },
            Representation::Diff,
        ) => {
            let registry = replay(preceding, context)?;
            let snippet = registry.get(name).ok_or_else(|| CompileError::UnknownName {
                line,
                name: name.clone(),
            })?;
            // A diff without hunks cannot be applied again.
            if snippet.content == *content {
                return Err(ConversionError::Unchanged {
                    line,
                    name: name.clone(),
                });
            }
            ElementKind::Diff {
                name: name.clone(),
                render: *render,
                content: context.patcher.diff(&snippet.content, content),
            }
        }
        (kind, to) => {
            return Err(ConversionError::Unsupported {
                line,
                from: kind.keyword(),
                to,
            });
        }
    };
    log::info!("line {line}: converted {} to {to}", target.kind.keyword());

    let mut converted = elements.to_vec();
    converted[index] = target.with_kind(kind);
    Ok(converted)
}

fn replay(elements: &[Element], context: &Context<'_>) -> Result<Registry, CompileError> {
    elements.iter().try_fold(Registry::default(), |registry, element| {
        Ok(execute(&registry, element, context)?.0)
    })
}

/// `source` with `element`'s span replaced by its directive markup.
pub fn rewrite_source(source: &str, element: &Element) -> String {
    let mut rope = Rope::from(source);
    rope.edit(element.span.range(), to_markup(element).as_str());
    rope.slice_to_cow(..).into_owned()
}
