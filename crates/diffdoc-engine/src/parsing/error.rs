use thiserror::Error;

/// Malformed markup, or a directive block that cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
}

impl ParseError {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        ParseError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Format { line, .. } => *line,
        }
    }
}
