//! Exit-code classification for the whole interpreter pipeline.
//!
//! Every failure path in this crate ends up as one variant here. `main`
//! is the only place that turns a variant into a process exit: nothing
//! else calls `std::process::exit`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpError {
    #[error("missing or invalid CLI parameters: {0}")]
    MissingParam(String),

    #[error("cannot open input file {path}: {source}")]
    InputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open output file {path}: {source}")]
    OutputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source document: {0}")]
    WrongXmlInputFormat(String),

    #[error("unexpected document structure: {0}")]
    UnexpectedXmlStruct(String),

    #[error("static semantic error: {0}")]
    Semantic(String),

    #[error("wrong operand type: {0}")]
    InvalidOp(String),

    #[error("access to non-existent variable: {0}")]
    VarNotExist(String),

    #[error("non-existent frame: {0}")]
    InvalidFrame(String),

    #[error("missing value: {0}")]
    MissingValue(String),

    #[error("wrong operand value: {0}")]
    WrongOpValue(String),

    #[error("wrong string operation: {0}")]
    WrongStringOperation(String),
}

impl InterpError {
    /// The exit code this error maps to, per the interpreter's error taxonomy.
    pub fn exit_code(&self) -> i32 {
        match self {
            InterpError::MissingParam(_) => 10,
            InterpError::InputOpen { .. } => 11,
            InterpError::OutputOpen { .. } => 12,
            InterpError::WrongXmlInputFormat(_) => 31,
            InterpError::UnexpectedXmlStruct(_) => 32,
            InterpError::Semantic(_) => 52,
            InterpError::InvalidOp(_) => 53,
            InterpError::VarNotExist(_) => 54,
            InterpError::InvalidFrame(_) => 55,
            InterpError::MissingValue(_) => 56,
            InterpError::WrongOpValue(_) => 57,
            InterpError::WrongStringOperation(_) => 58,
        }
    }
}

pub type Result<T> = std::result::Result<T, InterpError>;
