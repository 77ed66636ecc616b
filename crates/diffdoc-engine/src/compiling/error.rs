use std::fmt;

use thiserror::Error;

use crate::execution::ExecutionError;
use crate::patching::PatchError;

/// Operation refused while a snippet still has pending lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Replace,
    ApplyDiff,
    RenderOutput,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Replace => "replace",
            Operation::ApplyDiff => "apply diff",
            Operation::RenderOutput => "render output",
        })
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("line {line}: unknown snippet {name:?}")]
    UnknownName { line: usize, name: String },

    #[error("line {line}: snippet {name:?} is already defined")]
    DuplicateName { line: usize, name: String },

    #[error(
        "line {line}: cannot {operation} for snippet {name:?} with pending lines:\n{}",
        list_lines(.pending)
    )]
    PendingLines {
        operation: Operation,
        line: usize,
        name: String,
        pending: Vec<String>,
    },

    #[error("line {line}: diff for snippet {name:?} does not apply: {source}")]
    PatchApply {
        line: usize,
        name: String,
        source: PatchError,
    },

    #[error("line {line}: rendered line {text:?} is not part of snippet {name:?}")]
    RenderMismatch {
        line: usize,
        name: String,
        text: String,
    },

    #[error(
        "line {line}: output of snippet {name:?} does not match\nexpected:\n{expected}\nactual:\n{actual}"
    )]
    OutputMismatch {
        line: usize,
        name: String,
        expected: String,
        actual: String,
    },

    #[error("line {line}: failed to run snippet {name:?}: {source}")]
    Execution {
        line: usize,
        name: String,
        source: ExecutionError,
    },
}

impl CompileError {
    /// 1-based source line of the offending element.
    pub fn line(&self) -> usize {
        match self {
            CompileError::UnknownName { line, .. }
            | CompileError::DuplicateName { line, .. }
            | CompileError::PendingLines { line, .. }
            | CompileError::PatchApply { line, .. }
            | CompileError::RenderMismatch { line, .. }
            | CompileError::OutputMismatch { line, .. }
            | CompileError::Execution { line, .. } => *line,
        }
    }
}

fn list_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
