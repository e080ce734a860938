//! When parsing S-expressions goes wrong.
//!
//! The parser never aborts: every malformed input still yields a tree. The
//! [`Error`] type describes what was wrong with the input and where, and is
//! reported next to that tree in [`Parsed`](super::Parsed).

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

/// This type represents the conditions the parser recovers from.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `sexptree::parse::Error`.
pub type Result<T> = result::Result<T, Error>;

/// Location of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Location {
    /// One-based line number at which the error was detected.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number at which the error was detected, counted in
    /// bytes.
    ///
    /// The first byte in the input and any byte immediately following a
    /// newline character are in column 1.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Error {
    /// Byte offset into the input at which the condition was detected.
    ///
    /// - unterminated strings are reported at their opening quotation mark,
    /// - unfinished escapes at the trailing backslash,
    /// - unclosed block comments at their opening `#|`,
    /// - missing closing parentheses at the end of the input, and
    /// - a stray closing parenthesis at its own offset.
    pub fn offset(&self) -> usize {
        self.err.offset
    }

    /// Location of the error in the input.
    pub fn location(&self) -> Location {
        self.err.location
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Eof` - the input ended in the middle of a construct; the
    ///   parser closed all open lists and returned the root
    /// - `Category::Syntax` - a closing parenthesis without a matching opening
    ///   one; the parser returned a detached subtree
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::UnterminatedString
            | ErrorCode::UnfinishedEscape
            | ErrorCode::UnclosedBlockComment
            | ErrorCode::TooFewClosingParens => Category::Eof,
            ErrorCode::TooManyClosingParens => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by a closing parenthesis that
    /// has nothing to close.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by prematurely reaching the end
    /// of the input data.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of a `sexptree::parse::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by input that was not a syntactically valid
    /// S-expression.
    Syntax,

    /// The error was caused by prematurely reaching the end of the input data.
    Eof,
}

impl From<Error> for io::Error {
    /// Convert a `sexptree::parse::Error` into an `io::Error`.
    ///
    /// Syntax errors are turned into `InvalidData` IO errors. EOF errors are
    /// turned into `UnexpectedEof` IO errors.
    ///
    /// ```
    /// use std::io;
    ///
    /// let err = sexptree::parse("(a").into_result().unwrap_err();
    /// let io_err = io::Error::from(err);
    /// assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
    /// ```
    fn from(l: Error) -> Self {
        match l.classify() {
            Category::Syntax => io::Error::new(io::ErrorKind::InvalidData, l),
            Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, l),
        }
    }
}

impl Error {
    pub(crate) fn new(code: ErrorCode, offset: usize, (line, column): (usize, usize)) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                offset,
                location: Location { line, column },
            }),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    offset: usize,
    location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    /// A string literal was still open at the end of input.
    UnterminatedString,

    /// The input ended with a backslash inside a string literal.
    UnfinishedEscape,

    /// A block comment was still open at the end of input.
    UnclosedBlockComment,

    /// A closing parenthesis had no open list to close.
    TooManyClosingParens,

    /// Lists were still open at the end of input.
    TooFewClosingParens,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorCode::UnterminatedString => f.write_str("Unterminated string literal"),
            ErrorCode::UnfinishedEscape => {
                f.write_str("Unfinished escape sequence at the end of the string")
            }
            ErrorCode::UnclosedBlockComment => f.write_str("Unclosed block comment"),
            ErrorCode::TooManyClosingParens => f.write_str(
                "too many ')' characters detected, closing sexprs that don't exist, no good.",
            ),
            ErrorCode::TooFewClosingParens => {
                f.write_str("not enough s-expressions were closed by the end of parsing")
            }
        }
    }
}

impl error::Error for Error {}

// The message is the complete diagnostic; callers compare it verbatim, so no
// location is appended here.
impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.err.code, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error({:?}, offset: {}, line: {}, column: {})",
            self.err.code.to_string(),
            self.err.offset,
            self.err.location.line,
            self.err.location.column,
        )
    }
}
