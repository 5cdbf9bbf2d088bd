//! Error types shared by the parser, the two back ends and the script splitter.

use thiserror::Error;

use crate::lexer::Position;

/// Malformed token in expression source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },

    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::UnexpectedCharacter { position, .. }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// Grammar violation in expression source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("unexpected end of input at {position}, expected {expected}")]
    UnexpectedEof { expected: String, position: Position },

    #[error("expression nested deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEof { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

/// Failure while evaluating an expression or translating it to SQL.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{function}() takes {expected} arguments, got {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("{function}() argument {index}: {message}")]
    InvalidArgument {
        function: String,
        index: usize,
        message: String,
    },

    #[error("type error: {0}")]
    TypeError(String),

    #[error("cannot translate {construct} to SQL: {reason}")]
    UnsupportedTranslation { construct: String, reason: String },
}

impl EvalError {
    pub(crate) fn invalid_argument(function: &str, index: usize, message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            function: function.to_string(),
            index,
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(construct: impl Into<String>, reason: impl Into<String>) -> Self {
        EvalError::UnsupportedTranslation {
            construct: construct.into(),
            reason: reason.into(),
        }
    }
}

/// Malformed multi-statement script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("unterminated {quote} quoted literal starting at {position}")]
    UnterminatedQuote { quote: char, position: Position },

    #[error("unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },
}

/// Crate-wide error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Parse(ParseError::Lex(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
