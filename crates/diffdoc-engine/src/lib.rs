pub mod compiling;
pub mod converting;
pub mod elements;
pub mod error;
pub mod execution;
pub mod parsing;
pub mod patching;
pub mod rendering;

// Re-export key types for easier usage
pub use compiling::{CompileError, Context, Registry, Snippet, compile, execute};
pub use converting::{ConversionError, Representation, convert, rewrite_source};
pub use elements::{Element, ElementKind};
pub use error::Error;
pub use execution::{ExecutionError, Executor, Interpreter, ProcessExecutor};
pub use parsing::{ParseError, parse_str};
pub use patching::{PatchError, Patcher, UnifiedPatcher};
pub use rendering::{RenderedElement, dumps};

/// Parses and reads `source` into typed elements.
pub fn load_elements(source: &str) -> Result<Vec<Element>, ParseError> {
    elements::read_elements(parse_str(source)?.nodes)
}

/// Parse, read, compile and serialize a whole document.
pub fn compile_document(source: &str, context: &Context<'_>) -> Result<String, Error> {
    let elements = load_elements(source)?;
    let rendered = compile(&elements, context)?;
    Ok(dumps(&rendered))
}

/// `source` with the block starting on `line` rewritten as `to`.
pub fn convert_document(
    source: &str,
    line: usize,
    to: Representation,
    context: &Context<'_>,
) -> Result<String, Error> {
    let elements = load_elements(source)?;
    let converted = convert(&elements, line, to, context)?;
    match converted.iter().find(|element| element.line == line) {
        Some(element) => Ok(rewrite_source(source, element)),
        None => Err(ConversionError::NoElement { line }.into()),
    }
}
