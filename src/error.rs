use std::fmt::Display;

use nom::error::{ErrorKind, FromExternalError, ParseError};
use nom::Offset;

#[derive(Debug, PartialEq, Clone)]
pub enum SyntaxErrorKind {
    MissingQuote,
    MissingColon,
    MissingArrayBracket,
    MissingObjectBrace,
    MissingParen,
    InvalidKey(String),
    InvalidNumber(String),
    InvalidHex(String),
    InvalidValue(String),
    CharsAfterRoot(String),
    RecursionLimitExceeded,
    NomError(ErrorKind),
}

impl Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingQuote => write!(f, "unterminated string"),
            Self::MissingColon => write!(f, "expected ':' after key"),
            Self::MissingArrayBracket => write!(f, "expected ']'"),
            Self::MissingObjectBrace => write!(f, "expected '}}'"),
            Self::MissingParen => write!(f, "expected ')'"),
            Self::InvalidKey(key) => write!(f, "'{}' is not a valid key", key),
            Self::InvalidNumber(num) => write!(f, "'{}' is not a valid number", num),
            Self::InvalidHex(hex) => write!(f, "'{}' is not a valid hex escape", hex),
            Self::InvalidValue(value) => write!(f, "'{}' is not a valid literal", value),
            Self::CharsAfterRoot(rest) => {
                write!(f, "unexpected characters after the value: {}", rest)
            }
            Self::RecursionLimitExceeded => write!(f, "recursion limit exceeded"),
            Self::NomError(kind) => write!(f, "invalid literal ({:?})", kind),
        }
    }
}

/// Borrow-carrying error used inside the nom grammar. `input` is the
/// remaining input at the failure point, turned into a byte offset once the
/// whole parse gives up.
#[derive(Debug)]
pub struct ParseFailure<'a> {
    pub input: &'a str,
    pub kind: SyntaxErrorKind,
}

impl<'a> ParseFailure<'a> {
    pub fn new(input: &'a str, kind: SyntaxErrorKind) -> Self {
        Self { input, kind }
    }
}

impl<'a> ParseError<&'a str> for ParseFailure<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: SyntaxErrorKind::NomError(kind),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> nom::error::ContextError<&'a str> for ParseFailure<'a> {
    fn add_context(_input: &'a str, _ctx: &'static str, other: Self) -> Self {
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for ParseFailure<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        Self {
            input,
            kind: SyntaxErrorKind::NomError(kind),
        }
    }
}

/// Failure of the literal evaluator. `offset` is a byte offset into the
/// evaluated span, `char_offset` the corresponding character position.
#[derive(Debug, PartialEq, Clone)]
pub struct SyntaxError {
    pub offset: usize,
    pub char_offset: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn from_failure(source: &str, failure: ParseFailure) -> Self {
        let offset = source.offset(failure.input);
        let char_offset = bytecount::num_chars(source[..offset].as_bytes());

        Self {
            offset,
            char_offset,
            kind: failure.kind,
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error at character {}: {}", self.char_offset, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

#[derive(Debug, PartialEq, Clone)]
pub enum ExtractErrorKind {
    Syntax(SyntaxError),
    NoCandidate { attempted: usize },
    UnsupportedKind(String),
    // An explicitly requested collaborator declined or failed
    External {
        extractor: &'static str,
        detail: String,
    },
    Aggregated(Vec<String>),
}

impl From<SyntaxError> for ExtractErrorKind {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

impl Display for ExtractErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "{}", err),
            Self::NoCandidate { attempted } => write!(
                f,
                "no candidate evaluated to a mapping ({} attempted)",
                attempted
            ),
            Self::UnsupportedKind(kind) => write!(f, "unsupported target kind: {}", kind),
            Self::External { extractor, detail } => {
                write!(f, "{} extractor failed: {}", extractor, detail)
            }
            Self::Aggregated(failures) => {
                write!(f, "all extractors failed: {}", failures.join("; "))
            }
        }
    }
}

/// Top-level failure. Always carries the original input so a caller can log
/// exactly what could not be parsed.
#[derive(Debug, PartialEq, Clone)]
pub struct ExtractError {
    pub input: String,
    pub kind: ExtractErrorKind,
}

impl ExtractError {
    pub fn new(input: &str, kind: ExtractErrorKind) -> Self {
        Self {
            input: input.to_owned(),
            kind,
        }
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse input string: {}\nError detail: {}",
            self.input, self.kind
        )
    }
}

impl std::error::Error for ExtractError {}
