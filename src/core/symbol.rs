//! Alphabet symbols.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use thiserror::Error;

/// Bound for types usable as an alphabet.
///
/// Symbols must be totally ordered so rule lookup is deterministic, and
/// serializable so automata can be snapshotted.
pub trait Letter:
    Clone + Ord + Debug + Display + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

impl<T> Letter for T where
    T: Clone + Ord + Debug + Display + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

/// An element of an automaton's alphabet.
///
/// Equality is value-based. Word automata use `Symbol<char>`, which makes
/// the single-character constraint a property of the type.
///
/// # Example
///
/// ```rust
/// use seedling::core::Symbol;
///
/// let a = Symbol::new('a');
/// assert_eq!(a, "a".parse().unwrap());
/// assert!("ab".parse::<Symbol<char>>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol<T>(T);

impl<T> Symbol<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped alphabet element.
    pub fn value(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Symbol<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Display> Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Errors raised when a payload cannot become a word symbol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol payload must be exactly one character, got an empty string")]
    Empty,

    #[error("Symbol payload must be exactly one character, got {count}: {payload:?}")]
    TooLong { payload: String, count: usize },
}

impl FromStr for Symbol<char> {
    type Err = SymbolError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let mut chars = payload.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(SymbolError::Empty),
            (Some(c), None) => Ok(Self(c)),
            (Some(_), Some(_)) => Err(SymbolError::TooLong {
                payload: payload.to_string(),
                count: payload.chars().count(),
            }),
        }
    }
}

impl TryFrom<&str> for Symbol<char> {
    type Error = SymbolError;

    fn try_from(payload: &str) -> Result<Self, Self::Error> {
        payload.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_character_parses() {
        let symbol: Symbol<char> = "x".parse().unwrap();
        assert_eq!(symbol.value(), &'x');
    }

    #[test]
    fn multibyte_character_counts_as_one() {
        let symbol = Symbol::<char>::try_from("é").unwrap();
        assert_eq!(symbol.into_inner(), 'é');
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!("".parse::<Symbol<char>>(), Err(SymbolError::Empty));
    }

    #[test]
    fn long_payload_is_rejected() {
        let err = "abc".parse::<Symbol<char>>().unwrap_err();
        assert_eq!(
            err,
            SymbolError::TooLong {
                payload: "abc".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn equality_is_value_based() {
        assert_eq!(Symbol::new("token"), Symbol::from("token"));
        assert_ne!(Symbol::new(1u8), Symbol::new(2u8));
    }

    #[test]
    fn display_shows_payload() {
        assert_eq!(Symbol::new('b').to_string(), "b");
        assert_eq!(Symbol::new(42).to_string(), "42");
    }
}
