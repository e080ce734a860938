#![deny(missing_docs)]

//! This crate provides facilities for parsing, printing and
//! manipulating S-expression trees in the notation of the Lisp
//! language family:
//!
//! ```lisp
//! (defun greet (name)
//!   ;; Say hello
//!   (format t "Hello, ~a!~%" name))
//! #(1 2 3) #c(1 2) #xff #\a #p"/tmp/" '(quoted) `(,splice ,@rest)
//! ```
//!
//! The tree keeps the text of atoms exactly as written, together with the
//! lexical kind of each literal, the quote-family prefixes in front of it,
//! and the byte span it was read from. Printing a parsed tree produces text
//! that parses back into an equal tree.
//!
//! # Parsing
//!
//! Parsing never fails. Malformed input produces a best-effort tree and a
//! diagnostic; see [`parse`](mod@parse) for the recovery rules.
//!
//! ```
//! let parsed = sexptree::parse("(config (window (width 800) (height 600)))");
//! assert!(parsed.is_ok());
//! let width = parsed.tree.get_child_by_path("config/window/width").unwrap();
//! assert_eq!(width.child(1).and_then(|w| w.text()), Some("800"));
//! ```
//!
//! # Building and printing trees
//!
//! ```
//! use sexptree::Sexp;
//!
//! let mut root = Sexp::new();
//! root.create_path("wow/this/is/cool");
//! root.add_expression("(answer 42)");
//! assert_eq!(root.to_string(), "(wow (this (is (cool)))) (answer 42)");
//! ```

/// Construct a [`Sexp`] using syntax similar to regular S-expressions.
///
/// Identifiers and punctuation become symbols, string literals become
/// String atoms, and parenthesized groups become lists.
///
/// ```
/// # use sexptree::sexp;
/// let tree = sexp!((point (x 1) (y -2) "label"));
/// assert_eq!(format!("{:#}", tree), r#"(point (x 1) (y -2) "label")"#);
/// ```
///
/// Vectors, complex and radix literals use their usual markers. Symbols
/// that are not Rust identifiers can be written as `#"..."`:
///
/// ```
/// # use sexptree::sexp;
/// let tree = sexp!((#"kebab-case" #(1 2) #c(0 1) #xff));
/// assert_eq!(format!("{:#}", tree), "(kebab-case #(1 2) #c(0 1) #xff)");
/// ```
///
/// A comma inserts the value of a Rust expression, converted with
/// `Sexp::from`:
///
/// ```
/// # use sexptree::sexp;
/// let name = "width";
/// assert_eq!(format!("{:#}", sexp!((,name 800))), "(width 800)");
/// ```
#[cfg(feature = "sexp-macro")]
pub use sexptree_macros::sexp;

mod escape;
pub mod parse;
pub mod print;
mod sexp;

#[doc(inline)]
pub use self::escape::{escape, unescape};

#[doc(inline)]
pub use self::parse::{Error, Options, Parsed, Parser};

#[doc(inline)]
pub use self::print::{
    to_string, to_string_custom, to_vec, to_vec_custom, to_writer, to_writer_custom, Printer,
};

#[doc(inline)]
pub use self::sexp::{AtomKind, Attribute, ListKind, Node, Sexp, Span};

/// Parse `source` with the default options.
///
/// The diagnostic is empty exactly when the input was well-formed.
///
/// ```
/// let (tree, diagnostic) = sexptree::parse("(a b) c").into_parts();
/// assert!(diagnostic.is_empty());
/// assert_eq!(tree.child_count(), 2);
/// ```
pub fn parse(source: &str) -> Parsed {
    parse::from_str(source)
}

/// Parse `source`, using `sentinel` as the text of the atom marking the
/// point of failure in a recovered tree.
///
/// ```
/// let parsed = sexptree::parse_with_sentinel("(a", "<eof>");
/// assert_eq!(parsed.tree.to_string(), "(a <eof>)");
/// ```
pub fn parse_with_sentinel(source: &str, sentinel: &str) -> Parsed {
    parse::from_str_custom(source, Options::new().with_sentinel(sentinel))
}

/// Parse `source` using the given options.
pub fn parse_custom(source: &str, options: Options) -> Parsed {
    parse::from_str_custom(source, options)
}
