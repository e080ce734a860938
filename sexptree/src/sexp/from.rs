use std::borrow::Cow;
use std::iter::FromIterator;

use crate::{AtomKind, Sexp};

/// Builds a symbol atom, escaping control characters.
impl From<&str> for Sexp {
    #[inline]
    fn from(s: &str) -> Self {
        Sexp::symbol(s)
    }
}

impl<'a> From<Cow<'a, str>> for Sexp {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        Sexp::from(s.as_ref())
    }
}

impl From<String> for Sexp {
    #[inline]
    fn from(s: String) -> Self {
        Sexp::from(s.as_str())
    }
}

impl From<char> for Sexp {
    fn from(c: char) -> Self {
        Sexp::atom(c.to_string(), AtomKind::Char)
    }
}

impl From<Vec<Sexp>> for Sexp {
    #[inline]
    fn from(children: Vec<Sexp>) -> Self {
        Sexp::list(children)
    }
}

impl<T> FromIterator<T> for Sexp
where
    T: Into<Sexp>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sexp::list(iter.into_iter().map(Into::into).collect())
    }
}

impl<T> Extend<T> for Sexp
where
    T: Into<Sexp>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for child in iter {
            self.add_child(child.into());
        }
    }
}
