use std::fmt;

pub type LexResult<T> = Result<T, LexerError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Error raised while tokenizing, or by the `expect*` helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    pub kind: LexerErrKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexerErrKind {
    UnevenIndent,
    UnterminatedString,
    NumberOverflow,
    UnexpectedToken { expected: String, found: String },
}

impl LexerError {
    pub fn new(kind: LexerErrKind, line: usize) -> Self {
        LexerError { kind, line }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LexerError at line {}: {}", self.line, self.kind)
    }
}

impl fmt::Display for LexerErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerErrKind::UnevenIndent => write!(f, "indents are not even"),
            LexerErrKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexerErrKind::NumberOverflow => write!(f, "number literal is out of range"),
            LexerErrKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for LexerError {}

/// Error raised while operating on runtime values.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeErrKind {
    NoMethod,
    Type,
    Io,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrKind, message: impl Into<String>) -> Self {
        RuntimeError {
            kind,
            message: message.into(),
        }
    }

    pub fn no_method() -> Self {
        RuntimeError::new(RuntimeErrKind::NoMethod, "Method not found")
    }

    pub fn type_err(message: impl Into<String>) -> Self {
        RuntimeError::new(RuntimeErrKind::Type, message)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RuntimeErrKind::NoMethod => "NoMethodError",
            RuntimeErrKind::Type => "TypeError",
            RuntimeErrKind::Io => "IOError",
        };
        write!(f, "{} ({})", kind, self.message)
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::new(RuntimeErrKind::Io, err.to_string())
    }
}
