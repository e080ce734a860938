//! Slash-delimited path queries.
//!
//! A path like `"config/window/width"` addresses a descendant by matching
//! each segment against the children of the current node. A List child
//! matches when its head (first child) is an atom whose text equals the
//! segment; the query then descends into that List. An Atom child matches
//! only for the final segment, and only when its text equals the segment.

use crate::Sexp;

enum Step {
    Leaf(usize),
    Descend(usize),
}

fn split(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

fn head_text(node: &Sexp) -> Option<&str> {
    node.child(0).and_then(Sexp::text)
}

// Locates the child of `node` matching `segment`. Children are tried in
// order; the first match of either kind wins.
fn find_step(node: &Sexp, segment: &str, last: bool) -> Option<Step> {
    node.children()
        .iter()
        .enumerate()
        .find_map(|(i, child)| match child.text() {
            Some(text) if last && text == segment => Some(Step::Leaf(i)),
            Some(_) => None,
            None if head_text(child) == Some(segment) => Some(Step::Descend(i)),
            None => None,
        })
}

// Used when creating paths: matches an atom or a List headed by `name`,
// irrespective of the position in the path.
fn names(node: &Sexp, name: &str) -> bool {
    match node.text() {
        Some(text) => text == name,
        None => head_text(node) == Some(name),
    }
}

impl Sexp {
    /// Looks up a descendant by a slash-delimited path.
    ///
    /// Returns `None` if this node is an atom, if the path is empty, or if
    /// any segment fails to resolve.
    ///
    /// ```
    /// let tree = sexptree::parse("(player (a (name me) (age 2)))").tree;
    /// let name = tree.get_child_by_path("player/a/name").unwrap();
    /// assert_eq!(name.to_string(), "name me");
    /// assert!(tree.get_child_by_path("player/b").is_none());
    /// ```
    pub fn get_child_by_path(&self, path: &str) -> Option<&Sexp> {
        if self.is_atom() {
            return None;
        }
        let segments = split(path);
        let (last, init) = segments.split_last()?;
        let mut node = self;
        for segment in init {
            match find_step(node, segment, false)? {
                Step::Descend(i) => node = &node.children()[i],
                Step::Leaf(_) => return None,
            }
        }
        match find_step(node, last, true)? {
            Step::Leaf(i) | Step::Descend(i) => node.child(i),
        }
    }

    /// Mutable variant of [`get_child_by_path`](Sexp::get_child_by_path).
    pub fn get_child_by_path_mut(&mut self, path: &str) -> Option<&mut Sexp> {
        if self.is_atom() {
            return None;
        }
        let segments = split(path);
        let (last, init) = segments.split_last()?;
        let mut node = self;
        for segment in init {
            match find_step(node, segment, false)? {
                Step::Descend(i) => node = &mut node.children_mut()[i],
                Step::Leaf(_) => return None,
            }
        }
        match find_step(node, last, true)? {
            Step::Leaf(i) | Step::Descend(i) => node.child_mut(i),
        }
    }

    /// Walks a slash-delimited path, creating missing Lists on the way.
    ///
    /// Each created List is tagged with its path segment as the first child.
    /// Returns the node the path resolves to, which may have existed before.
    ///
    /// ```
    /// let mut root = sexptree::Sexp::new();
    /// root.create_path("wow/this/is/cool");
    /// assert_eq!(root.to_string(), "(wow (this (is (cool))))");
    /// ```
    pub fn create_path(&mut self, path: &str) -> &mut Sexp {
        self.create_path_segments(&split(path))
    }

    /// Like [`create_path`](Sexp::create_path), taking the path as a
    /// sequence of segments.
    pub fn create_path_segments<S: AsRef<str>>(&mut self, segments: &[S]) -> &mut Sexp {
        let mut node = self;
        let mut rest = segments;
        while let [segment, tail @ ..] = rest {
            match node
                .children()
                .iter()
                .position(|child| names(child, segment.as_ref()))
            {
                Some(i) => {
                    node = &mut node.children_mut()[i];
                    rest = tail;
                }
                None => break,
            }
        }
        for segment in rest {
            node.add_child(Sexp::list(vec![Sexp::symbol(segment.as_ref())]));
            let last = node.child_count() - 1;
            node = &mut node.children_mut()[last];
        }
        node
    }
}
