//! Rooted symbol trees.
//!
//! Terms are the input shape of tree automata: a root symbol with an
//! ordered list of child terms. A word `abc` is the unary term `a(b(c))`.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term<T> {
    root: Symbol<T>,
    children: Vec<Term<T>>,
}

impl<T> Term<T> {
    /// A leaf term.
    pub fn new(root: Symbol<T>) -> Self {
        Self {
            root,
            children: Vec::new(),
        }
    }

    pub fn append_child(&mut self, child: Term<T>) {
        self.children.push(child);
    }

    pub fn root(&self) -> &Symbol<T> {
        &self.root
    }

    pub fn children(&self) -> &[Term<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Term::size).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Term::depth).max().unwrap_or(0)
    }
}

impl Term<char> {
    /// Unary chain for a word; `None` for the empty word.
    pub fn from_word(word: &str) -> Option<Self> {
        word.chars().rev().fold(None, |child, c| {
            let mut term = Term::new(Symbol::new(c));
            if let Some(child) = child {
                term.append_child(child);
            }
            Some(term)
        })
    }
}

impl<T: Display> Display for Term<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if self.children.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
