//! Newtype IDs for type-safe identifiers.
//!
//! Product ids are plain integers on the wire (the wishlist is stored as a
//! JSON array of numbers), but a newtype keeps them from being confused with
//! prices, quantities or coin amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create an ID from its numeric value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let ids = vec![ProductId::new(1), ProductId::new(10042)];
        assert_eq!(serde_json::to_string(&ids).unwrap(), "[1,10042]");
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 17 ".parse::<ProductId>().unwrap(), ProductId::new(17));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
