use thiserror::Error;

use crate::compiling::CompileError;
use crate::converting::ConversionError;
use crate::parsing::ParseError;

/// Any failure while processing a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl Error {
    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse(err) => Some(err.line()),
            Error::Compile(err) => Some(err.line()),
            Error::Conversion(ConversionError::NoElement { line })
            | Error::Conversion(ConversionError::Unsupported { line, .. })
            | Error::Conversion(ConversionError::Unchanged { line, .. }) => Some(*line),
            Error::Conversion(ConversionError::Compile(err)) => Some(err.line()),
            Error::Conversion(ConversionError::UnknownRepresentation(_)) => None,
        }
    }
}
