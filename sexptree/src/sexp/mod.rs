//! The S-expression tree type.
//!
//! A parsed document is a tree of [`Sexp`] nodes. Each node is either an
//! atom, holding the raw text of a symbol, string, character, radix or
//! pathname literal, or a list of child nodes. Independent of its kind, a
//! node carries the prefix markers (quote, backquote, ...) that were written
//! in front of it, and the byte span it was parsed from.
//!
//! # Constructing trees
//!
//! ```
//! use sexptree::Sexp;
//!
//! let mut root = Sexp::new();
//! root.add_child_text("hi");
//! root.add_child(Sexp::list(vec![Sexp::symbol("little"), Sexp::symbol("list")]));
//! assert_eq!(root.to_string(), "hi (little list)");
//! ```
//!
//! # Equality
//!
//! Two nodes are equal when they have the same shape and the same atom text.
//! Prefix markers, literal kinds and spans do not take part in the
//! comparison, so a tree built by hand compares equal to the same tree
//! parsed from text.

use std::fmt;
use std::slice;

use tracing::debug;

use crate::escape;

mod from;
mod path;

#[cfg(test)]
mod tests;

/// The lexical kind of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// An atom constructed without a specific kind, e.g. via
    /// [`Sexp::unescaped`].
    None,
    /// A bare symbol token.
    Symbol,
    /// A double-quoted string literal.
    String,
    /// A `#\` character literal.
    Char,
    /// A `#b` binary literal.
    Binary,
    /// A `#o` octal literal.
    Octal,
    /// A `#x` hexadecimal literal.
    Hex,
    /// A `#p"..."` pathname literal.
    Pathname,
}

impl AtomKind {
    /// The marker written in front of an atom of this kind, if any.
    ///
    /// Strings and pathnames additionally get quoted; see [`crate::print`].
    pub fn marker(self) -> &'static str {
        match self {
            AtomKind::Char => "#\\",
            AtomKind::Binary => "#b",
            AtomKind::Octal => "#o",
            AtomKind::Hex => "#x",
            AtomKind::Pathname => "#p",
            AtomKind::None | AtomKind::Symbol | AtomKind::String => "",
        }
    }
}

/// The lexical kind of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// A plain parenthesized list.
    None,
    /// A list introduced by `#(`.
    Vector,
    /// A list introduced by `#c(`.
    Complex,
}

impl ListKind {
    /// The marker written in front of the opening parenthesis.
    pub fn marker(self) -> &'static str {
        match self {
            ListKind::None => "",
            ListKind::Vector => "#",
            ListKind::Complex => "#c",
        }
    }
}

/// A prefix marker attached to the node following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `'`
    Quote,
    /// `` ` ``
    Backquote,
    /// `#'`
    FuncQuote,
    /// `,`
    CommaSplice,
    /// `,@`
    AtSplice,
    /// `,.`
    DotSplice,
}

impl Attribute {
    /// The textual prefix of this marker.
    pub fn prefix(self) -> &'static str {
        match self {
            Attribute::Quote => "'",
            Attribute::Backquote => "`",
            Attribute::FuncQuote => "#'",
            Attribute::CommaSplice => ",",
            Attribute::AtSplice => ",@",
            Attribute::DotSplice => ",.",
        }
    }
}

/// A half-open range of byte offsets into the parsed source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Offset of the first byte covered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last byte covered.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the part of `source` covered by this span.
    ///
    /// Returns `None` if the span is out of bounds or does not fall on
    /// character boundaries, which is the case for the synthetic nodes
    /// inserted during error recovery.
    ///
    /// ```
    /// let source = "(a 'b)";
    /// let tree = sexptree::parse(source).tree;
    /// let quoted = tree.child(0).unwrap().child(1).unwrap();
    /// assert_eq!(quoted.span().slice(source), Some("'b"));
    /// ```
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// The payload of a node: either atom text or a list of children.
#[derive(Debug, Clone)]
pub enum Node {
    /// A leaf holding raw text.
    Atom {
        /// The text as written in the source, without markers or quotes.
        text: String,
        /// The lexical kind of the literal.
        kind: AtomKind,
    },
    /// A sequence of child nodes.
    List {
        /// The children, in source order.
        children: Vec<Sexp>,
        /// Whether the list was written as a vector or complex literal.
        kind: ListKind,
    },
}

/// A node of an S-expression tree.
#[derive(Debug, Clone)]
pub struct Sexp {
    node: Node,
    attributes: Vec<Attribute>,
    span: Span,
}

impl Sexp {
    /// Creates an empty list, i.e. the nil value.
    pub fn new() -> Self {
        Sexp::with_node(Node::List {
            children: Vec::new(),
            kind: ListKind::None,
        })
    }

    /// Creates a plain list holding `children`.
    pub fn list(children: Vec<Sexp>) -> Self {
        Sexp::list_of_kind(children, ListKind::None)
    }

    /// Creates a `#(...)` vector list holding `elements`.
    pub fn vector(elements: Vec<Sexp>) -> Self {
        Sexp::list_of_kind(elements, ListKind::Vector)
    }

    /// Creates a `#c(...)` complex list holding `parts`.
    pub fn complex(parts: Vec<Sexp>) -> Self {
        Sexp::list_of_kind(parts, ListKind::Complex)
    }

    /// Creates a list of the given kind.
    pub fn list_of_kind(children: Vec<Sexp>, kind: ListKind) -> Self {
        Sexp::with_node(Node::List { children, kind })
    }

    /// Creates a symbol atom from raw text, escaping control characters.
    ///
    /// ```
    /// let sym = sexptree::Sexp::symbol("a\tb");
    /// assert_eq!(sym.text(), Some("a\\tb"));
    /// ```
    pub fn symbol(text: &str) -> Self {
        Sexp::atom(escape::escape(text), AtomKind::Symbol)
    }

    /// Creates an atom from text that is stored verbatim.
    pub fn unescaped(text: impl Into<String>) -> Self {
        Sexp::atom(text, AtomKind::None)
    }

    /// Creates a string atom. The text is stored verbatim, as the parser
    /// would store the interior of a string literal.
    pub fn string(text: impl Into<String>) -> Self {
        Sexp::atom(text, AtomKind::String)
    }

    /// Creates an atom of the given kind, storing `text` verbatim.
    pub fn atom(text: impl Into<String>, kind: AtomKind) -> Self {
        Sexp::with_node(Node::Atom {
            text: text.into(),
            kind,
        })
    }

    fn with_node(node: Node) -> Self {
        Sexp {
            node,
            attributes: Vec::new(),
            span: Span::default(),
        }
    }

    /// Sets the span, builder-style.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends a prefix marker, builder-style.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the node payload.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Returns the byte span this node was parsed from.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Replaces the span of this node.
    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// Returns the prefix markers, in the order they were written.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the prefix markers for modification.
    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    /// Whether this node is an atom.
    pub fn is_atom(&self) -> bool {
        matches!(self.node, Node::Atom { .. })
    }

    /// Whether this node is a list.
    pub fn is_list(&self) -> bool {
        matches!(self.node, Node::List { .. })
    }

    /// Whether this node is an atom of kind [`AtomKind::String`].
    pub fn is_string(&self) -> bool {
        self.atom_kind() == Some(AtomKind::String)
    }

    /// Whether this node is the empty list.
    pub fn is_nil(&self) -> bool {
        match &self.node {
            Node::List { children, .. } => children.is_empty(),
            Node::Atom { .. } => false,
        }
    }

    /// Returns the atom kind, or `None` for lists.
    pub fn atom_kind(&self) -> Option<AtomKind> {
        match self.node {
            Node::Atom { kind, .. } => Some(kind),
            Node::List { .. } => None,
        }
    }

    /// Returns the list kind, or `None` for atoms.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self.node {
            Node::List { kind, .. } => Some(kind),
            Node::Atom { .. } => None,
        }
    }

    /// Returns the text of an atom, or `None` for lists.
    pub fn text(&self) -> Option<&str> {
        match &self.node {
            Node::Atom { text, .. } => Some(text),
            Node::List { .. } => None,
        }
    }

    /// Alias of [`text`](Sexp::text).
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.text()
    }

    /// Returns the text of an atom for modification.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.node {
            Node::Atom { text, .. } => Some(text),
            Node::List { .. } => None,
        }
    }

    /// Returns the children of a list; atoms have none.
    pub fn children(&self) -> &[Sexp] {
        match &self.node {
            Node::List { children, .. } => children,
            Node::Atom { .. } => &[],
        }
    }

    /// Returns the children of a list for modification; atoms have none.
    pub fn children_mut(&mut self) -> &mut [Sexp] {
        match &mut self.node {
            Node::List { children, .. } => children,
            Node::Atom { .. } => &mut [],
        }
    }

    pub(crate) fn child_vec_mut(&mut self) -> Option<&mut Vec<Sexp>> {
        match &mut self.node {
            Node::List { children, .. } => Some(children),
            Node::Atom { .. } => None,
        }
    }

    /// Returns the child at `index`.
    pub fn child(&self, index: usize) -> Option<&Sexp> {
        self.children().get(index)
    }

    /// Returns the child at `index` for modification.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Sexp> {
        self.children_mut().get_mut(index)
    }

    /// Number of children. An atom counts as a single implicit child.
    pub fn child_count(&self) -> usize {
        match &self.node {
            Node::List { children, .. } => children.len(),
            Node::Atom { .. } => 1,
        }
    }

    /// Returns the children following the head of a list.
    ///
    /// ```
    /// let tree = sexptree::parse("(add 1 2)").tree;
    /// let args: Vec<_> = tree.children()[0].arguments().filter_map(|a| a.text()).collect();
    /// assert_eq!(args, ["1", "2"]);
    /// ```
    pub fn arguments(&self) -> slice::Iter<'_, Sexp> {
        self.children().get(1..).unwrap_or(&[]).iter()
    }

    /// Returns the children following the head of a list for modification.
    pub fn arguments_mut(&mut self) -> slice::IterMut<'_, Sexp> {
        match self.children_mut() {
            [] => [].iter_mut(),
            [_, rest @ ..] => rest.iter_mut(),
        }
    }

    /// Appends `child`.
    ///
    /// If this node is an atom, it is first turned into a list whose first
    /// child is the former atom.
    pub fn add_child(&mut self, child: Sexp) {
        if let Node::Atom { text, kind } = &mut self.node {
            let former = Sexp::atom(std::mem::take(text), *kind)
                .with_span(Span::new(self.span.start, self.span.start));
            self.node = Node::List {
                children: vec![former],
                kind: ListKind::None,
            };
        }
        if let Node::List { children, .. } = &mut self.node {
            children.push(child);
        }
    }

    /// Appends a symbol atom built from `text`, escaping control characters.
    pub fn add_child_text(&mut self, text: &str) {
        self.add_child(Sexp::symbol(text).with_span(Span::new(self.span.start, self.span.start)));
    }

    /// Appends an atom whose text is stored verbatim.
    pub fn add_child_unescaped(&mut self, text: impl Into<String>) {
        self.add_child(Sexp::unescaped(text));
    }

    /// Appends an atom of the given kind and span whose text is stored
    /// verbatim.
    pub fn add_child_unescaped_at(&mut self, text: impl Into<String>, kind: AtomKind, span: Span) {
        self.add_child(Sexp::atom(text, kind).with_span(span));
    }

    /// Parses `source` and appends each of its top-level forms.
    ///
    /// This is a best-effort convenience: if parsing `source` reports a
    /// diagnostic, nothing is appended. The spans of the appended forms are
    /// relative to `source`.
    ///
    /// ```
    /// let mut tree = sexptree::Sexp::new();
    /// tree.add_expression("(r 0) (g 0)");
    /// assert_eq!(tree.to_string(), "(r 0) (g 0)");
    /// tree.add_expression("(b");
    /// assert_eq!(tree.child_count(), 2);
    /// ```
    pub fn add_expression(&mut self, source: &str) {
        let parsed = crate::parse(source);
        if let Some(err) = parsed.error {
            debug!(error = %err, "discarding expression that failed to parse");
            return;
        }
        let mut tree = parsed.tree;
        if let Some(children) = tree.child_vec_mut() {
            for child in std::mem::take(children) {
                self.add_child(child);
            }
        }
    }

    /// Structural equality.
    ///
    /// Atoms are equal when their text is equal; lists are equal when they
    /// have pairwise equal children. Kinds of literals, prefix markers and
    /// spans are ignored.
    pub fn equal(&self, other: &Sexp) -> bool {
        match (&self.node, &other.node) {
            (Node::Atom { text: a, .. }, Node::Atom { text: b, .. }) => a == b,
            (Node::List { children: a, .. }, Node::List { children: b, .. }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.equal(b))
            }
            _ => false,
        }
    }
}

// Dropping nested lists recursively would use one stack frame per level, so
// descendants are moved onto a heap stack first.
impl Drop for Sexp {
    fn drop(&mut self) {
        let mut pending = match &mut self.node {
            Node::List { children, .. } if !children.is_empty() => std::mem::take(children),
            _ => return,
        };
        while let Some(mut node) = pending.pop() {
            if let Node::List { children, .. } = &mut node.node {
                pending.append(children);
            }
        }
    }
}

impl Default for Sexp {
    fn default() -> Self {
        Sexp::new()
    }
}

impl PartialEq for Sexp {
    fn eq(&self, other: &Sexp) -> bool {
        self.equal(other)
    }
}

impl Eq for Sexp {}

impl fmt::Display for Sexp {
    /// Prints the node using the default printer options.
    ///
    /// The alternate flag (`{:#}`) selects
    /// [`PrintMode::TopLevelParens`](crate::print::PrintMode::TopLevelParens),
    /// which keeps the parentheses of a list printed at the top level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if f.alternate() {
            crate::print::PrintMode::TopLevelParens
        } else {
            crate::print::PrintMode::NoTopLevelParens
        };
        let options = crate::print::Options::default().with_mode(mode);
        let printed = crate::print::to_string_custom(self, options).map_err(|_| fmt::Error)?;
        f.write_str(&printed)
    }
}
