//! # Snippet Execution
//!
//! The compiler runs snippet code through the [`Executor`] trait and compares
//! the captured text with the documented output. [`ProcessExecutor`] runs a
//! configured interpreter per language; tests use in-memory executors.

pub mod process;

use std::time::Duration;

use thiserror::Error;

pub use process::{Interpreter, ProcessExecutor};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("no interpreter configured for language {0:?}")]
    UnknownLanguage(String),
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

pub trait Executor {
    /// Runs `source` and returns its standard output followed by its standard error.
    fn execute(&self, language: &str, source: &str) -> Result<String, ExecutionError>;
}
