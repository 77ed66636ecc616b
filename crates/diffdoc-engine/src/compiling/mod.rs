//! # Compiling
//!
//! Folds document elements over a snippet [`Registry`], checking every
//! element against the current snippet state and producing one
//! [`RenderedElement`] per element.
//!
//! ## Pending Lines
//!
//! Each snippet tracks the lines introduced but not yet shown to the reader.
//! A snippet cannot be replaced, patched or executed while any of its lines
//! are pending, so every line of code the reader runs has appeared in the
//! document first. Lines become shown by rendering a `start`/`replace` block,
//! by the `+` lines of a rendered `diff`, or by a `render` excerpt.
//!
//! ## Key Invariants
//!
//! - [`execute`] never mutates its input registry
//! - The first failing element aborts compilation
//! - Blank lines are never pending

pub mod error;
pub mod pending;
pub mod registry;

pub use error::{CompileError, Operation};
pub use registry::{Registry, Snippet};

use crate::elements::{Element, ElementKind};
use crate::execution::Executor;
use crate::patching::Patcher;
use crate::rendering::RenderedElement;

/// External collaborators used while compiling.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub executor: &'a dyn Executor,
    pub patcher: &'a dyn Patcher,
}

impl<'a> Context<'a> {
    pub fn new(executor: &'a dyn Executor, patcher: &'a dyn Patcher) -> Self {
        Self { executor, patcher }
    }
}

/// Compiles `elements` in order, starting from an empty registry.
pub fn compile(
    elements: &[Element],
    context: &Context<'_>,
) -> Result<Vec<RenderedElement>, CompileError> {
    let mut registry = Registry::default();
    let mut rendered = Vec::with_capacity(elements.len());
    for element in elements {
        let (next, output) = execute(&registry, element, context)?;
        registry = next;
        rendered.push(output);
    }
    log::info!(
        "compiled {} elements, {} snippets",
        elements.len(),
        registry.len()
    );
    Ok(rendered)
}

/// Applies one element to `registry`, returning the updated registry and
/// the element's rendering.
pub fn execute(
    registry: &Registry,
    element: &Element,
    context: &Context<'_>,
) -> Result<(Registry, RenderedElement), CompileError> {
    let line = element.line;
    if let Some(name) = element.kind.name() {
        log::debug!("line {line}: {} {name}", element.kind.keyword());
    }

    match &element.kind {
        ElementKind::Text(text) => Ok((registry.clone(), RenderedElement::PlainText(text.clone()))),

        ElementKind::Start {
            name,
            language,
            render,
            content,
        } => {
            if registry.contains(name) {
                return Err(CompileError::DuplicateName {
                    line,
                    name: name.clone(),
                });
            }
            let snippet = Snippet::new(language.as_str()).replaced(content);
            let (snippet, rendered) = if *render {
                (
                    snippet.shown(content.lines()),
                    RenderedElement::code_block(language.as_str(), content.as_str()),
                )
            } else {
                (snippet, RenderedElement::Empty)
            };
            Ok((registry.with(name.as_str(), snippet), rendered))
        }

        ElementKind::Replace {
            name,
            render,
            content,
        } => {
            let snippet = lookup(registry, name, line)?;
            require_shown(snippet, Operation::Replace, name, line)?;
            let updated = snippet.replaced(content);
            let (updated, rendered) = if *render {
                let language = updated.language.clone();
                (
                    updated.shown(content.lines()),
                    RenderedElement::code_block(language, content.as_str()),
                )
            } else {
                (updated, RenderedElement::Empty)
            };
            Ok((registry.with(name.as_str(), updated), rendered))
        }

        ElementKind::Diff {
            name,
            render,
            content,
        } => {
            let snippet = lookup(registry, name, line)?;
            require_shown(snippet, Operation::ApplyDiff, name, line)?;
            let patched = context
                .patcher
                .apply(&snippet.content, content)
                .map_err(|source| CompileError::PatchApply {
                    line,
                    name: name.clone(),
                    source,
                })?;
            let updated = snippet.replaced(&patched);
            let (updated, rendered) = if *render {
                (
                    updated.shown(pending::added_lines(content)),
                    RenderedElement::literal_block(content.as_str()),
                )
            } else {
                (updated, RenderedElement::Empty)
            };
            Ok((registry.with(name.as_str(), updated), rendered))
        }

        ElementKind::Render { name, content } => {
            let snippet = lookup(registry, name, line)?;
            if let Some(text) = pending::first_unknown_line(content, &snippet.content) {
                return Err(CompileError::RenderMismatch {
                    line,
                    name: name.clone(),
                    text: text.to_string(),
                });
            }
            let rendered = RenderedElement::code_block(snippet.language.as_str(), content.as_str());
            let updated = snippet.shown(content.lines());
            Ok((registry.with(name.as_str(), updated), rendered))
        }

        ElementKind::Output {
            name,
            render,
            content,
        } => {
            let snippet = lookup(registry, name, line)?;
            require_shown(snippet, Operation::RenderOutput, name, line)?;
            let actual = context
                .executor
                .execute(&snippet.language, &snippet.content)
                .map_err(|source| CompileError::Execution {
                    line,
                    name: name.clone(),
                    source,
                })?;
            if actual.trim() != content.trim() {
                return Err(CompileError::OutputMismatch {
                    line,
                    name: name.clone(),
                    expected: content.trim().to_string(),
                    actual: actual.trim().to_string(),
                });
            }
            let rendered = if *render {
                RenderedElement::literal_block(content.as_str())
            } else {
                RenderedElement::Empty
            };
            Ok((registry.clone(), rendered))
        }
    }
}

fn lookup<'r>(registry: &'r Registry, name: &str, line: usize) -> Result<&'r Snippet, CompileError> {
    registry.get(name).ok_or_else(|| CompileError::UnknownName {
        line,
        name: name.to_string(),
    })
}

fn require_shown(
    snippet: &Snippet,
    operation: Operation,
    name: &str,
    line: usize,
) -> Result<(), CompileError> {
    if snippet.is_fully_shown() {
        return Ok(());
    }
    Err(CompileError::PendingLines {
        operation,
        line,
        name: name.to_string(),
        pending: snippet.pending_lines.clone(),
    })
}
