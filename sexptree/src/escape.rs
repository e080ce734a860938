//! Mapping between control characters and single-letter escape codes.
//!
//! The codec works on the C-style escape set: the characters `'`, `"`, `?`
//! and `\` escape to themselves, and the control characters alert,
//! backspace, form feed, line feed, carriage return, tab and vertical tab
//! escape to `\a`, `\b`, `\f`, `\n`, `\r`, `\t` and `\v` respectively.
//!
//! The parser does not decode string literals; their text is kept exactly as
//! written. The codec is used when constructing atoms from raw text (see
//! [`Sexp::symbol`]) and when printing.
//!
//! [`Sexp::symbol`]: crate::Sexp::symbol

/// Escapes every character of `text` that has an escape code.
///
/// ```
/// assert_eq!(sexptree::escape("\n \t \u{8}"), "\\n \\t \\b");
/// assert_eq!(sexptree::escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> String {
    let count = text.bytes().filter(|&b| ESCAPE[b as usize] != 0).count();
    if count == 0 {
        return text.to_owned();
    }
    // All escapable characters are ASCII, so they never occur inside a
    // multi-byte UTF-8 sequence and byte-wise processing is safe.
    let mut escaped = String::with_capacity(text.len() + count);
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        let code = ESCAPE[byte as usize];
        if code == 0 {
            continue;
        }
        escaped.push_str(&text[start..i]);
        escaped.push('\\');
        escaped.push(char::from(code));
        start = i + 1;
    }
    escaped.push_str(&text[start..]);
    escaped
}

/// Replaces every escape sequence in `text` by the character it denotes.
///
/// Backslashes followed by a character without an escape meaning, as well as
/// a trailing lone backslash, are kept verbatim.
///
/// ```
/// assert_eq!(sexptree::unescape("a\\tb\\\"c\\\""), "a\tb\"c\"");
/// assert_eq!(sexptree::unescape("\\q"), "\\q");
/// ```
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some(code) => match decode(code) {
                Some(value) => unescaped.push(value),
                None => {
                    unescaped.push('\\');
                    unescaped.push(code);
                }
            },
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Returns the escape letter for `byte`, if it has one.
#[inline]
pub(crate) fn escape_code(byte: u8) -> Option<u8> {
    match ESCAPE[byte as usize] {
        0 => None,
        code => Some(code),
    }
}

fn decode(code: char) -> Option<char> {
    Some(match code {
        '\'' => '\'',
        '"' => '"',
        '?' => '?',
        '\\' => '\\',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        _ => return None,
    })
}

const AA: u8 = b'a'; // \x07
const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const VV: u8 = b'v'; // \x0B
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const AP: u8 = b'\''; // \x27
const QM: u8 = b'?'; // \x3F
const BS: u8 = b'\\'; // \x5C
const __: u8 = 0;

// Lookup table of escape codes. A value of b'x' at index i means that byte i
// is escaped as "\x". A value of 0 means that byte i is not escaped.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, AA, BB, TT, NN, VV, FF, RR, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    __, __, QU, __, __, __, __, AP, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, QM, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
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
