//! S-expression parser and options.
//!
//! The parser turns text into a [`Sexp`] tree. It never fails outright: on
//! malformed input it returns a best-effort tree together with an
//! [`Error`] describing the problem, bundled as [`Parsed`].
//!
//! # Recovery
//!
//! When the input ends in the middle of a construct (an unterminated string,
//! a trailing backslash inside a string, an unclosed block comment, or lists
//! that are still open), the parser
//!
//! 1. keeps the partially scanned string literal, if any, as an atom,
//! 2. appends a sentinel atom (`:sexpresso-error` by default) to the
//!    innermost open list,
//! 3. closes all open lists, and
//! 4. returns the root together with the error.
//!
//! ```
//! let parsed = sexptree::parse("(defun foo (x) (print");
//! assert_eq!(
//!     parsed.diagnostic(),
//!     "not enough s-expressions were closed by the end of parsing"
//! );
//! assert_eq!(parsed.tree.to_string(), "(defun foo (x) (print :sexpresso-error))");
//! ```
//!
//! A closing parenthesis that has nothing to close abandons the parse. In
//! that case no sentinel is added; the tree returned is the list whose
//! closing parenthesis started the unbalanced run, detached from the root.
//! If the stray parenthesis directly follows an atom or an opening, the
//! root itself is returned with everything parsed so far.
//!
//! ```
//! let parsed = sexptree::parse("(defun foo (x) (print)))");
//! assert!(parsed.error.unwrap().is_syntax());
//! assert_eq!(format!("{:#}", parsed.tree), "(print)");
//! ```

use std::ops::ControlFlow;

use tracing::debug;

use read::{ScanError, SliceRead, Token};

use crate::{Attribute, AtomKind, ListKind, Sexp, Span};

pub use error::{Category, Error, Location, Result};

pub mod error;
mod read;

pub(crate) use read::is_delimiter;

#[cfg(test)]
mod tests;

/// The sentinel atom text used unless configured otherwise.
pub const DEFAULT_SENTINEL: &str = ":sexpresso-error";

/// Various options to influence parser behavior.
#[derive(Debug, Clone)]
pub struct Options {
    sentinel: String,
    recovery: bool,
}

impl Options {
    /// Construct the default set of options.
    ///
    /// The sentinel is `:sexpresso-error` and recovery is enabled.
    pub fn new() -> Self {
        Options {
            sentinel: DEFAULT_SENTINEL.to_owned(),
            recovery: true,
        }
    }

    /// Set the text of the sentinel atom appended during recovery.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Enable or disable the sentinel atom.
    ///
    /// With recovery disabled, the parser still keeps partial string
    /// literals and closes all open lists, but does not mark the point of
    /// failure with a sentinel atom.
    pub fn with_recovery(mut self, recovery: bool) -> Self {
        self.recovery = recovery;
        self
    }

    /// The text of the sentinel atom.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Whether a sentinel atom is appended during recovery.
    pub fn recovery(&self) -> bool {
        self.recovery
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

/// The outcome of a parse: a tree, and the error recovered from, if any.
#[derive(Debug)]
pub struct Parsed {
    /// The parsed tree.
    ///
    /// This is the root List holding the top-level forms, except after a
    /// stray closing parenthesis, where it is a detached subtree.
    pub tree: Sexp,
    /// The condition the parser recovered from. `None` for well-formed
    /// input.
    pub error: Option<Error>,
}

impl Parsed {
    /// Whether the input was well-formed.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The diagnostic message, or the empty string for well-formed input.
    pub fn diagnostic(&self) -> String {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Discards the recovered tree if there was an error.
    pub fn into_result(self) -> Result<Sexp> {
        match self.error {
            None => Ok(self.tree),
            Some(err) => Err(err),
        }
    }

    /// Splits into the tree and the diagnostic message.
    pub fn into_parts(self) -> (Sexp, String) {
        let diagnostic = self.diagnostic();
        (self.tree, diagnostic)
    }
}

/// Parser for the S-expression text representation.
///
/// The parser keeps the open lists on an explicit stack, so nesting depth is
/// bounded by memory rather than by the call stack.
pub struct Parser<'a> {
    read: SliceRead<'a>,
    options: Options,
    state: State,
}

// Mutable state threaded through the scan loop.
struct State {
    /// Open lists; the root is at the bottom and never popped.
    stack: Vec<Sexp>,
    /// Prefix markers waiting for the next node.
    attributes: Vec<Attribute>,
    /// Atom kind announced by a `#` marker.
    atom_kind: Option<AtomKind>,
    /// List kind announced by a `#` marker.
    list_kind: Option<ListKind>,
    /// Offset of the first pending prefix or marker.
    pending_start: Option<usize>,
    /// Number of lists closed by the current run of `)` characters.
    closing_run: usize,
}

impl State {
    fn new() -> Self {
        State {
            stack: vec![Sexp::new()],
            attributes: Vec::new(),
            atom_kind: None,
            list_kind: None,
            pending_start: None,
            closing_run: 0,
        }
    }

    fn mark_pending(&mut self, offset: usize) {
        self.pending_start.get_or_insert(offset);
    }

    fn clear_pending(&mut self) {
        self.attributes.clear();
        self.atom_kind = None;
        self.list_kind = None;
        self.pending_start = None;
    }

    // Moves the pending prefixes onto `node` and returns its start offset.
    fn attach_pending(&mut self, node: &mut Sexp, start: usize) -> usize {
        let start = self.pending_start.take().unwrap_or(start);
        node.attributes_mut().append(&mut self.attributes);
        start
    }

    fn top(&mut self) -> &mut Sexp {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_atom(&mut self, text: &str, default: AtomKind, start: usize, end: usize) {
        let kind = self.atom_kind.take().unwrap_or(default);
        let mut atom = Sexp::atom(text, kind);
        let start = self.attach_pending(&mut atom, start);
        atom.set_span(Span::new(start, end));
        self.top().add_child(atom);
    }

    // Seals every open list into its parent. A list's end is taken from its
    // last child, or `end` if it has none.
    fn close_stack(&mut self, end: usize) {
        while self.stack.len() > 1 {
            if let Some(mut node) = self.stack.pop() {
                let start = node.span().start();
                let stop = node.children().last().map_or(end, |child| child.span().end());
                node.set_span(Span::new(start, stop));
                self.top().add_child(node);
            }
        }
    }
}

impl<'a> Parser<'a> {
    /// Create a parser for `source` using the default options.
    pub fn new(source: &'a str) -> Self {
        Parser::with_options(source, Options::default())
    }

    /// Create a parser for `source` using the given options.
    pub fn with_options(source: &'a str, options: Options) -> Self {
        Parser {
            read: SliceRead::new(source),
            options,
            state: State::new(),
        }
    }

    /// Parse the whole input.
    pub fn parse(mut self) -> Parsed {
        loop {
            self.read.skip_whitespace();
            let start = self.read.index();
            let token = match self.read.classify() {
                Some(token) => token,
                None => return self.finish(),
            };
            if let ControlFlow::Break(parsed) = self.step(token, start) {
                return parsed;
            }
        }
    }

    fn step(&mut self, token: Token, start: usize) -> ControlFlow<Parsed> {
        match token {
            Token::Close => {}
            Token::LineComment | Token::BlockComment => {}
            _ => self.state.closing_run = 0,
        }
        self.read.discard(token.lead_len());
        match token {
            Token::Open => {
                let kind = self.state.list_kind.take().unwrap_or(ListKind::None);
                let mut list = Sexp::list_of_kind(Vec::new(), kind);
                let start = self.state.attach_pending(&mut list, start);
                list.set_span(Span::new(start, start));
                self.state.stack.push(list);
            }
            Token::Close => {
                // A prefix has nothing to attach to inside a closing list.
                self.state.clear_pending();
                return self.close(start);
            }
            Token::Prefix(attribute) => {
                self.state.mark_pending(start);
                self.state.attributes.push(attribute);
            }
            Token::StringStart => return self.string(start),
            Token::LineComment => self.read.skip_line_comment(),
            Token::BlockComment => {
                if let Err(err) = self.read.skip_block_comment(start) {
                    return ControlFlow::Break(self.recover(err, None));
                }
            }
            Token::ListMarker(kind) => {
                self.state.mark_pending(start);
                self.state.list_kind = Some(kind);
            }
            Token::AtomMarker(kind) => {
                self.state.mark_pending(start);
                self.state.atom_kind = Some(kind);
                match kind {
                    AtomKind::Pathname => {
                        let quote = self.read.index();
                        self.read.discard(1);
                        return self.string(quote);
                    }
                    AtomKind::Char => {
                        let body = self.read.index();
                        self.read.discard_char();
                        self.symbol(body, start);
                    }
                    _ => {
                        let body = self.read.index();
                        self.symbol(body, start);
                    }
                }
            }
            Token::Symbol => self.symbol(start, start),
        }
        ControlFlow::Continue(())
    }

    // Scans the rest of a symbol-like token whose text starts at `body`.
    fn symbol(&mut self, body: usize, start: usize) {
        let end = self.read.scan_symbol();
        let text = self.read.text(body, end);
        self.state.push_atom(text, AtomKind::Symbol, start, end);
    }

    // Assumes the opening quotation mark at `quote` was consumed.
    fn string(&mut self, quote: usize) -> ControlFlow<Parsed> {
        match self.read.scan_string(quote) {
            Ok(close) => {
                let text = self.read.text(quote + 1, close);
                self.state
                    .push_atom(text, AtomKind::String, quote, self.read.index());
                ControlFlow::Continue(())
            }
            Err(err) => ControlFlow::Break(self.recover(err, Some(quote))),
        }
    }

    fn close(&mut self, offset: usize) -> ControlFlow<Parsed> {
        if self.state.stack.len() == 1 {
            return ControlFlow::Break(self.too_many(offset));
        }
        if let Some(mut list) = self.state.stack.pop() {
            let start = list.span().start();
            list.set_span(Span::new(start, self.read.index()));
            self.state.top().add_child(list);
            self.state.closing_run += 1;
        }
        ControlFlow::Continue(())
    }

    fn too_many(&mut self, offset: usize) -> Parsed {
        let code = error::ErrorCode::TooManyClosingParens;
        debug!(condition = %code, offset, run = self.state.closing_run, "stray closing parenthesis");
        let error = self.error(code, offset);
        let root = &mut self.state.stack[0];
        let tree = match detach_closed(root, self.state.closing_run) {
            Some(tree) => tree,
            None => std::mem::take(root).with_span(Span::new(0, offset)),
        };
        Parsed {
            tree,
            error: Some(error),
        }
    }

    fn finish(mut self) -> Parsed {
        if self.state.stack.len() > 1 {
            let err = ScanError {
                code: error::ErrorCode::TooFewClosingParens,
                offset: self.read.len(),
            };
            return self.recover(err, None);
        }
        self.take_root(None)
    }

    // Runs the recovery protocol. `quote` is the offset of the opening
    // quotation mark when a string literal was being scanned.
    fn recover(&mut self, err: ScanError, quote: Option<usize>) -> Parsed {
        debug!(condition = %err.code, offset = err.offset, "recovering from malformed input");
        let len = self.read.len();
        if let Some(quote) = quote {
            let end = if err.code == error::ErrorCode::UnfinishedEscape {
                err.offset
            } else {
                len
            };
            let text = self.read.text(quote + 1, end);
            self.state.push_atom(text, AtomKind::String, quote, len);
        }
        if self.options.recovery {
            let sentinel = &self.options.sentinel;
            let atom = Sexp::atom(sentinel.as_str(), AtomKind::Symbol)
                .with_span(Span::new(len, len + sentinel.len()));
            self.state.top().add_child(atom);
        }
        self.state.clear_pending();
        self.state.close_stack(len);
        self.read.discard_rest();
        let error = self.error(err.code, err.offset);
        self.take_root(Some(error))
    }

    fn take_root(&mut self, error: Option<Error>) -> Parsed {
        let mut tree = std::mem::take(&mut self.state.stack[0]);
        tree.set_span(Span::new(0, self.read.len()));
        Parsed { tree, error }
    }

    fn error(&self, code: error::ErrorCode, offset: usize) -> Error {
        Error::new(code, offset, self.read.position_of_index(offset))
    }
}

// Removes the list that was closed `depth` closings ago, following the last
// child of each list from the root.
fn detach_closed(root: &mut Sexp, depth: usize) -> Option<Sexp> {
    if depth == 0 {
        return None;
    }
    let mut parent = root;
    for _ in 1..depth {
        parent = parent.child_vec_mut()?.last_mut()?;
    }
    parent.child_vec_mut()?.pop()
}

/// Parse the text of S-expressions using the default options.
pub fn from_str(source: &str) -> Parsed {
    Parser::new(source).parse()
}

/// Parse the text of S-expressions using the given options.
pub fn from_str_custom(source: &str, options: Options) -> Parsed {
    Parser::with_options(source, options).parse()
}
