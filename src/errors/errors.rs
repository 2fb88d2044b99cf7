use std::fmt::Display;

use thiserror::Error as ThisError;

/// An error raised by any phase of the pipeline, tagged with the line
/// of the token that triggered it. `line` is `None` when the failure
/// was detected at end of input.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    line: Option<u32>,
}

impl Error {
    pub fn new(kind: ErrorKind, line: Option<u32>) -> Self {
        Error { kind, line }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.kind),
            None => write!(f, "end of file: {}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

#[derive(ThisError, Debug, Clone)]
pub enum ErrorKind {
    #[error("unrecognised symbol {symbol:?}")]
    UnrecognisedSymbol { symbol: String },
    #[error("error parsing number {token:?}")]
    InvalidNumber { token: String },
    #[error("expression expected")]
    ExpressionExpected,
    #[error("operator expected")]
    OperatorExpected,
    #[error("{message}, found {token:?}")]
    UnexpectedToken { message: String, token: String },
    #[error("name {name:?} is not declared")]
    NotDeclared { name: String },
    #[error("name {name:?} is already declared in this scope")]
    AlreadyDeclared { name: String },
    #[error("reserved word {name:?} cannot be a declared name")]
    ReservedName { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("only booleans can be conditions, received {received}")]
    ConditionNotBoolean { received: String },
    #[error("expression of type {received} cannot be invoked")]
    NotInvocable { received: String },
    #[error("invalid type {token:?}")]
    InvalidType { token: String },
    #[error("the \"main\" function must be declared")]
    MissingMain,
    #[error("the last declaration must bind \"main\" to a function with a Text parameter")]
    InvalidEntryPoint,
    #[error("parameter {name:?} read before it was bound")]
    UnboundParameter { name: String },
}
