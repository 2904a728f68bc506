//! Message selectors

use std::fmt;
use std::sync::Arc;

/// Canonical name of a message.
///
/// A selector is an identifier (`size`), an operator (`+`), or the ordered
/// concatenation of keyword parts (`plus:And:`). Equality is structural on
/// that concatenated form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector(Arc<str>);

impl Selector {
    /// Create a selector from its canonical text.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Concatenate keyword parts, each already ending in `:`.
    pub fn keyword<S: AsRef<str>>(parts: impl IntoIterator<Item = S>) -> Self {
        let name: String = parts.into_iter().map(|part| part.as_ref().to_owned()).collect();
        Self::new(name)
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a keyword selector.
    pub fn is_keyword(&self) -> bool {
        self.0.ends_with(':')
    }

    /// Whether this is an operator selector.
    pub fn is_operator(&self) -> bool {
        self.0
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric() && c != '_' && c != ':')
    }

    /// Keyword parts of a keyword selector, each including its `:`.
    pub fn parts(&self) -> Vec<&str> {
        if !self.is_keyword() {
            return vec![self.as_str()];
        }
        self.0
            .split_inclusive(':')
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// Number of arguments a send of this selector carries.
    pub fn arity(&self) -> usize {
        if self.is_keyword() {
            self.0.matches(':').count()
        } else if self.is_operator() {
            1
        } else {
            0
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for Selector {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
