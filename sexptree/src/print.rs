//! Converting S-expression trees into text.
//!
//! # Terminology
//!
//! The process of serializing S-expressions to their textual
//! representation is referred to "writing" in Lisp. To avoid
//! confusion with Rust's `Write` trait, `sexptree` uses "printing"
//! instead.
//!
//! # Print modes
//!
//! A parsed document is a List holding the top-level forms. Printing it
//! in the default [`PrintMode::NoTopLevelParens`] reproduces the document
//! as a sequence of forms, while [`PrintMode::TopLevelParens`] prints the
//! root like any other list.
//!
//! ```
//! use sexptree::print::{self, Options, PrintMode};
//!
//! let tree = sexptree::parse("(a b) c").tree;
//! assert_eq!(print::to_string(&tree).unwrap(), "(a b) c");
//! let options = Options::new().with_mode(PrintMode::TopLevelParens);
//! assert_eq!(print::to_string_custom(&tree, options).unwrap(), "((a b) c)");
//! ```

use std::io;

use crate::escape;
use crate::parse::is_delimiter;
use crate::{Attribute, AtomKind, ListKind, Node, Sexp};

/// How the node passed to the printer is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// A List is printed as its space-separated children, without the
    /// enclosing parentheses. This is the natural rendering of a parsed
    /// document root.
    NoTopLevelParens,
    /// A List is printed with its enclosing parentheses.
    TopLevelParens,
}

/// Options for printing S-expressions.
#[derive(Clone, Debug)]
pub struct Options {
    mode: PrintMode,
}

impl Options {
    /// Construct the default set of options.
    pub fn new() -> Self {
        Options {
            mode: PrintMode::NoTopLevelParens,
        }
    }

    /// Set how the top-level node is rendered.
    pub fn with_mode(mut self, mode: PrintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the print mode.
    pub fn mode(&self) -> PrintMode {
        self.mode
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

/// This trait abstracts away serializing the S-expression pieces, which
/// allows the implementer to adjust the textual details of the output.
///
/// The default implementation produces the notation the parser reads.
pub trait Formatter {
    /// Writes a prefix marker.
    #[inline]
    fn write_attribute<W: ?Sized>(&mut self, writer: &mut W, attribute: Attribute) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(attribute.prefix().as_bytes())
    }

    /// Writes the marker announcing a literal of the given kind (e.g. `#x`).
    #[inline]
    fn write_atom_marker<W: ?Sized>(&mut self, writer: &mut W, kind: AtomKind) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(kind.marker().as_bytes())
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`. Writes a `"` to the specified writer.
    #[inline]
    fn begin_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`. Writes a `"` to the specified writer.
    #[inline]
    fn end_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes a string fragment that doesn't need any escaping to the
    /// specified writer.
    #[inline]
    fn write_string_fragment<W: ?Sized>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes an escape sequence, given its letter code (e.g. `b'n'`).
    #[inline]
    fn write_char_escape<W: ?Sized>(&mut self, writer: &mut W, code: u8) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(&[b'\\', code])
    }

    /// Writes a symbol that needs no quoting.
    #[inline]
    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(name.as_bytes())
    }

    /// Called before any list elements. Writes the list's marker followed
    /// by `(` to the specified writer.
    #[inline]
    fn begin_list<W: ?Sized>(&mut self, writer: &mut W, kind: ListKind) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(kind.marker().as_bytes())?;
        writer.write_all(b"(")
    }

    /// Called after all list elements have been written. Writes a `)` to the
    /// specified writer.
    #[inline]
    fn end_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before starting to write a list element. Writes a space to the
    /// specified writer, if needed.
    #[inline]
    fn begin_seq_element<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b" ")
        }
    }

    /// Called after every list element.
    #[inline]
    fn end_seq_element<W: ?Sized>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        Ok(())
    }
}

/// This structure compacts an S-expression tree on a single line.
#[derive(Clone, Debug)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A printer for S-expression trees.
#[derive(Debug)]
pub struct Printer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
    options: Options,
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a new S-expression printer.
    #[inline]
    pub fn new(writer: W) -> Self {
        Printer::with_options(writer, Options::default())
    }

    /// Construct an S-expression printer using the specified options.
    pub fn with_options(writer: W, options: Options) -> Self {
        Printer {
            writer,
            formatter: DefaultFormatter,
            options,
        }
    }
}

impl<W, F> Printer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new S-expression printer whose output will be written to
    /// the writer specified, using the given formatter.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F, options: Options) -> Self {
        Printer {
            writer,
            formatter,
            options,
        }
    }

    /// Unwrap the `Writer` from the `Printer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of the specified tree to the underlying
    /// writer.
    pub fn print(&mut self, sexp: &Sexp) -> io::Result<()> {
        match (sexp.node(), self.options.mode) {
            (Node::List { children, .. }, PrintMode::NoTopLevelParens) => {
                self.write_attributes(sexp)?;
                self.write_elements(children)
            }
            _ => self.print_node(sexp),
        }
    }

    fn print_node(&mut self, sexp: &Sexp) -> io::Result<()> {
        self.write_attributes(sexp)?;
        match sexp.node() {
            Node::Atom { text, kind } => self.write_atom(text, *kind),
            Node::List { children, kind } => {
                self.formatter.begin_list(&mut self.writer, *kind)?;
                self.write_elements(children)?;
                self.formatter.end_list(&mut self.writer)
            }
        }
    }

    fn write_attributes(&mut self, sexp: &Sexp) -> io::Result<()> {
        for &attribute in sexp.attributes() {
            self.formatter.write_attribute(&mut self.writer, attribute)?;
        }
        Ok(())
    }

    fn write_elements(&mut self, elements: &[Sexp]) -> io::Result<()> {
        for (i, element) in elements.iter().enumerate() {
            self.formatter.begin_seq_element(&mut self.writer, i == 0)?;
            self.print_node(element)?;
            self.formatter.end_seq_element(&mut self.writer)?;
        }
        Ok(())
    }

    fn write_atom(&mut self, text: &str, kind: AtomKind) -> io::Result<()> {
        match kind {
            AtomKind::String | AtomKind::Pathname => {
                self.formatter.write_atom_marker(&mut self.writer, kind)?;
                self.formatter.begin_string(&mut self.writer)?;
                format_literal_str_contents(&mut self.writer, &mut self.formatter, text)?;
                self.formatter.end_string(&mut self.writer)
            }
            AtomKind::Char | AtomKind::Binary | AtomKind::Octal | AtomKind::Hex => {
                self.formatter.write_atom_marker(&mut self.writer, kind)?;
                self.formatter.write_symbol(&mut self.writer, text)
            }
            AtomKind::Symbol | AtomKind::None => {
                if needs_quotes(text) {
                    self.formatter.begin_string(&mut self.writer)?;
                    format_escaped_str_contents(&mut self.writer, &mut self.formatter, text)?;
                    self.formatter.end_string(&mut self.writer)
                } else {
                    self.formatter.write_symbol(&mut self.writer, text)
                }
            }
        }
    }
}

impl<W, F> io::Write for Printer<W, F>
where
    W: io::Write,
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

// A symbol is printed as a string when it could not be read back as a
// single symbol token. Other control bytes are part of a symbol token and
// are written raw.
fn needs_quotes(text: &str) -> bool {
    match text.as_bytes().first() {
        None | Some(b'"' | b'\'' | b'`' | b',' | b';') => true,
        Some(_) => text.bytes().any(is_delimiter),
    }
}

// String literal text is kept undecoded, so existing escape pairs are
// written verbatim. Only a bare quotation mark, or a lone backslash at the
// very end, would break the literal.
fn format_literal_str_contents<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    let bytes = value.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            byte @ (b'\\' | b'"') => {
                if start < i {
                    formatter.write_string_fragment(writer, &value[start..i])?;
                }
                formatter.write_char_escape(writer, byte)?;
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }

    Ok(())
}

fn format_escaped_str_contents<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    let bytes = value.as_bytes();

    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let code = match escape::escape_code(byte) {
            Some(code) => code,
            None => continue,
        };

        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }

        formatter.write_char_escape(writer, code)?;

        start = i + 1;
    }

    if start != bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }

    Ok(())
}

/// Serialize the given tree as S-expression text into the IO stream,
/// using the default printer options.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, sexp: &Sexp) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print(sexp)?;
    Ok(())
}

/// Serialize the given tree as S-expression text into the IO stream.
#[inline]
pub fn to_writer_custom<W: io::Write>(writer: W, sexp: &Sexp, options: Options) -> io::Result<()> {
    let mut printer = Printer::with_options(writer, options);
    printer.print(sexp)?;
    Ok(())
}

/// Serialize the given tree as byte vector containing S-expression text,
/// using the default printer options.
#[inline]
pub fn to_vec(sexp: &Sexp) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, sexp)?;
    Ok(writer)
}

/// Serialize the given tree as byte vector containing S-expression text.
#[inline]
pub fn to_vec_custom(sexp: &Sexp, options: Options) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer_custom(&mut writer, sexp, options)?;
    Ok(writer)
}

/// Serialize the given tree as an S-expression string, using the default
/// printer options.
#[inline]
pub fn to_string(sexp: &Sexp) -> io::Result<String> {
    from_utf8(to_vec(sexp)?)
}

/// Serialize the given tree as an S-expression string.
#[inline]
pub fn to_string_custom(sexp: &Sexp, options: Options) -> io::Result<String> {
    from_utf8(to_vec_custom(sexp, options)?)
}

fn from_utf8(vec: Vec<u8>) -> io::Result<String> {
    String::from_utf8(vec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
