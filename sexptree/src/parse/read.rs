use tracing::trace;

use super::error::ErrorCode;
use crate::{Attribute, AtomKind, ListKind};

/// The kind of token starting at the current input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A quote-family prefix, including `#'`.
    Prefix(Attribute),
    /// `"`
    StringStart,
    /// `;`
    LineComment,
    /// `#|`
    BlockComment,
    /// A `#\`, `#b`, `#o`, `#x` or `#p` marker introducing an atom.
    AtomMarker(AtomKind),
    /// A `#` or `#c` marker directly preceding `(`.
    ListMarker(ListKind),
    /// Anything else starts a symbol.
    Symbol,
}

impl Token {
    /// Number of bytes the token's lead occupies.
    pub fn lead_len(self) -> usize {
        match self {
            Token::Prefix(attribute) => attribute.prefix().len(),
            Token::ListMarker(kind) => kind.marker().len(),
            Token::BlockComment | Token::AtomMarker(_) => 2,
            Token::Open | Token::Close | Token::StringStart | Token::LineComment => 1,
            Token::Symbol => 0,
        }
    }
}

/// A scanning failure, located at a byte offset.
pub(crate) struct ScanError {
    pub code: ErrorCode,
    pub offset: usize,
}

/// S-expression input source reading from a UTF-8 string.
//
// Classification and scanning work on bytes. All delimiters are ASCII, so
// every offset the scanner stops at is a character boundary.
pub(crate) struct SliceRead<'a> {
    source: &'a str,
    slice: &'a [u8],
    /// Index of the *next* byte that will be returned by peek().
    index: usize,
}

impl<'a> SliceRead<'a> {
    pub fn new(source: &'a str) -> Self {
        SliceRead {
            source,
            slice: source.as_bytes(),
            index: 0,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slice.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    #[inline]
    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.slice.get(self.index + ahead).copied()
    }

    #[inline]
    pub fn discard(&mut self, count: usize) {
        self.index = (self.index + count).min(self.slice.len());
    }

    /// Returns the source text between two offsets.
    pub fn text(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// One-based line and column of the byte at offset `i`.
    pub fn position_of_index(&self, i: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for &ch in &self.slice[..i.min(self.slice.len())] {
            if ch == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !WHITESPACE[ch as usize] {
                break;
            }
            self.index += 1;
        }
    }

    /// Classifies the token at the current position, without consuming it.
    pub fn classify(&self) -> Option<Token> {
        let token = match self.peek()? {
            b'(' => Token::Open,
            b')' => Token::Close,
            b'\'' => Token::Prefix(Attribute::Quote),
            b'`' => Token::Prefix(Attribute::Backquote),
            b',' => match self.peek_at(1) {
                Some(b'@') => Token::Prefix(Attribute::AtSplice),
                Some(b'.') => Token::Prefix(Attribute::DotSplice),
                _ => Token::Prefix(Attribute::CommaSplice),
            },
            b'"' => Token::StringStart,
            b';' => Token::LineComment,
            b'#' => self.classify_hash(),
            _ => Token::Symbol,
        };
        Some(token)
    }

    // A bare `#`, or one followed by a marker whose lookahead does not fit,
    // starts an ordinary symbol.
    fn classify_hash(&self) -> Token {
        let body = self.peek_at(2);
        match self.peek_at(1) {
            Some(b'\'') => Token::Prefix(Attribute::FuncQuote),
            Some(b'|') => Token::BlockComment,
            Some(b'(') => Token::ListMarker(ListKind::Vector),
            Some(b'\\') if body.is_some() => Token::AtomMarker(AtomKind::Char),
            Some(b'c') | Some(b'C') if body == Some(b'(') => Token::ListMarker(ListKind::Complex),
            Some(b'p') | Some(b'P') if body == Some(b'"') => Token::AtomMarker(AtomKind::Pathname),
            Some(marker) if radix_body(body) => match marker {
                b'b' | b'B' => Token::AtomMarker(AtomKind::Binary),
                b'o' | b'O' => Token::AtomMarker(AtomKind::Octal),
                b'x' | b'X' => Token::AtomMarker(AtomKind::Hex),
                _ => Token::Symbol,
            },
            _ => Token::Symbol,
        }
    }

    /// Skips to the end of the current line.
    pub fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' || ch == b'\r' {
                break;
            }
            self.index += 1;
        }
    }

    /// Assumes the opening `#|` was consumed. Skips past the matching `|#`,
    /// honoring nested comments.
    pub fn skip_block_comment(&mut self, open: usize) -> Result<(), ScanError> {
        let mut depth = 1usize;
        loop {
            match (self.peek(), self.peek_at(1)) {
                (None, _) => {
                    return Err(ScanError {
                        code: ErrorCode::UnclosedBlockComment,
                        offset: open,
                    })
                }
                (Some(b'#'), Some(b'|')) => {
                    depth += 1;
                    trace!(depth, offset = self.index, "nested block comment");
                    self.index += 2;
                }
                (Some(b'|'), Some(b'#')) => {
                    depth -= 1;
                    trace!(depth, offset = self.index, "block comment closed");
                    self.index += 2;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => self.index += 1,
            }
        }
    }

    /// Scans a symbol token up to the next whitespace or parenthesis and
    /// returns its end offset.
    pub fn scan_symbol(&mut self) -> usize {
        while let Some(ch) = self.peek() {
            if DELIMITER[ch as usize] {
                break;
            }
            self.index += 1;
        }
        self.index
    }

    /// Consumes one full character, whatever it is. Used for the body of
    /// `#\` literals, which may be a delimiter such as `(` or a space.
    pub fn discard_char(&mut self) {
        let width = self.source[self.index..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        self.index += width;
    }

    /// Assumes the opening quotation mark at `open` was consumed. Scans to
    /// the matching unescaped quotation mark, consuming it, and returns its
    /// offset.
    ///
    /// Escape pairs are skipped but not decoded.
    pub fn scan_string(&mut self, open: usize) -> Result<usize, ScanError> {
        loop {
            match self.peek() {
                None => {
                    return Err(ScanError {
                        code: ErrorCode::UnterminatedString,
                        offset: open,
                    })
                }
                Some(b'\\') if self.index + 1 == self.slice.len() => {
                    return Err(ScanError {
                        code: ErrorCode::UnfinishedEscape,
                        offset: self.index,
                    })
                }
                Some(b'\\') => self.index += 2,
                Some(b'"') => {
                    let close = self.index;
                    self.index += 1;
                    return Ok(close);
                }
                Some(_) => self.index += 1,
            }
        }
    }

    /// Moves to the end of the input.
    pub fn discard_rest(&mut self) {
        self.index = self.slice.len();
    }
}

fn radix_body(body: Option<u8>) -> bool {
    match body {
        Some(ch) => !DELIMITER[ch as usize] && ch != b'"',
        None => false,
    }
}

//////////////////////////////////////////////////////////////////////////////

const WS: bool = true;
const PA: bool = true;
const __: bool = false;

// Lookup table of whitespace bytes: space, \t, \n, \v, \f and \r.
static WHITESPACE: [bool; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, __, __, WS, WS, WS, WS, WS, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    WS, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

// Lookup table of bytes ending a symbol: whitespace and parentheses.
static DELIMITER: [bool; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, __, __, WS, WS, WS, WS, WS, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    WS, __, __, __, __, __, __, __, PA, PA, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Whether `byte` ends a symbol token.
#[inline]
pub(crate) fn is_delimiter(byte: u8) -> bool {
    DELIMITER[byte as usize]
}
