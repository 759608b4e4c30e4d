//! Registry keys: `"type:name"`, `"type"`, and the `"*"` wildcard.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The literal wildcard key.
pub const WILDCARD: &str = "*";

/// A registry key.
///
/// Every constructor goes through [`BlockKey::parse`], so two keys are equal
/// exactly when their string forms are: `exact("a:b", "c")` and
/// `of_type("a:b:c")` are both `Exact("a", "b:c")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKey {
    /// `"type:name"`: a specific variant of a block type.
    Exact {
        /// Block category (e.g. "hero").
        block_type: String,
        /// Variant within the category (e.g. "01", "accordion").
        block_name: String,
    },
    /// `"type"`: any variant of a block type.
    Type(String),
    /// `"*"`: universal fallback.
    Fallback,
}

/// Which tier a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTier {
    /// `"type:name"`
    Exact,
    /// `"type"`
    Type,
    /// `"*"`
    Fallback,
}

impl BlockKey {
    /// Creates the key spelled `"{block_type}:{block_name}"`.
    pub fn exact(block_type: &str, block_name: &str) -> Self {
        BlockKey::parse(&format!("{}:{}", block_type, block_name))
    }

    /// Creates the key spelled `block_type`.
    ///
    /// A type containing `:` yields an exact key.
    pub fn of_type(block_type: &str) -> Self {
        BlockKey::parse(block_type)
    }

    /// Parses a key string.
    ///
    /// `"*"` is the wildcard, anything containing `:` splits at the first `:`,
    /// everything else is a type key. Parsing never fails.
    pub fn parse(s: &str) -> Self {
        if s == WILDCARD {
            return BlockKey::Fallback;
        }
        match s.split_once(':') {
            Some((block_type, block_name)) => BlockKey::Exact {
                block_type: block_type.to_string(),
                block_name: block_name.to_string(),
            },
            None => BlockKey::Type(s.to_string()),
        }
    }

    /// Returns the tier of this key.
    pub fn tier(&self) -> KeyTier {
        match self {
            BlockKey::Exact { .. } => KeyTier::Exact,
            BlockKey::Type(_) => KeyTier::Type,
            BlockKey::Fallback => KeyTier::Fallback,
        }
    }

    /// Block type named by this key, if any.
    pub fn block_type(&self) -> Option<&str> {
        match self {
            BlockKey::Exact { block_type, .. } | BlockKey::Type(block_type) => Some(block_type),
            BlockKey::Fallback => None,
        }
    }

    /// Block name named by this key, if any.
    pub fn block_name(&self) -> Option<&str> {
        match self {
            BlockKey::Exact { block_name, .. } => Some(block_name),
            _ => None,
        }
    }

    /// Returns true for the wildcard key.
    pub fn is_fallback(&self) -> bool {
        matches!(self, BlockKey::Fallback)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKey::Exact {
                block_type,
                block_name,
            } => write!(f, "{}:{}", block_type, block_name),
            BlockKey::Type(block_type) => f.write_str(block_type),
            BlockKey::Fallback => f.write_str(WILDCARD),
        }
    }
}

impl fmt::Display for KeyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyTier::Exact => "exact",
            KeyTier::Type => "type",
            KeyTier::Fallback => "fallback",
        })
    }
}

impl FromStr for BlockKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BlockKey::parse(s))
    }
}

impl From<&str> for BlockKey {
    fn from(s: &str) -> Self {
        BlockKey::parse(s)
    }
}

impl From<String> for BlockKey {
    fn from(s: String) -> Self {
        BlockKey::parse(&s)
    }
}

impl From<&BlockKey> for BlockKey {
    fn from(key: &BlockKey) -> Self {
        key.clone()
    }
}

impl Serialize for BlockKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BlockKey::parse(&raw))
    }
}
