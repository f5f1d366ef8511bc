//! Identity and seed string types.
//!
//! An identity is a 60-character uppercase A–Z account reference. Its first
//! 55 characters, lowercased, form the seed that derives the *next* identity
//! in the chain — the self-reference that makes layer traversal possible.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A 60-character uppercase A–Z ledger identity.
///
/// Opaque to the traversal engine: the only structure it relies on is the
/// fixed length, the character class, and [`Identity::seed`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

/// Why a string was rejected as an identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityParseError {
    #[error("identity must be {expected} characters, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("identity must be uppercase A-Z only")]
    InvalidCharacters,
}

impl Identity {
    /// Length of every identity string.
    pub const LEN: usize = 60;

    /// Parse and validate an identity string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentityParseError> {
        let s = raw.into();
        if s.len() != Self::LEN {
            return Err(IdentityParseError::WrongLength {
                expected: Self::LEN,
                got: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(IdentityParseError::InvalidCharacters);
        }
        Ok(Self(s))
    }

    /// The raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the seed for the next derivation step: the first
    /// [`Seed::LEN`] characters, lowercased.
    ///
    /// Always succeeds for a valid identity — 55 uppercase letters lowercase
    /// to 55 lowercase letters.
    pub fn seed(&self) -> Seed {
        Seed(self.0[..Seed::LEN].to_ascii_lowercase())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full 60 characters are noisy in logs; the first 12 identify a node.
        write!(f, "Identity({}..)", &self.0[..12])
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}

/// A 55-character lowercase a–z derivation key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

/// Why a string was rejected as a seed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedParseError {
    #[error("seed must be {expected} characters, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("seed must be lowercase a-z only")]
    InvalidCharacters,
}

impl Seed {
    /// Length of every seed string.
    pub const LEN: usize = 55;

    /// Parse and validate a seed string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SeedParseError> {
        let s = raw.into();
        if s.len() != Self::LEN {
            return Err(SeedParseError::WrongLength {
                expected: Self::LEN,
                got: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(SeedParseError::InvalidCharacters);
        }
        Ok(Self(s))
    }

    /// The raw seed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}..)", &self.0[..12])
    }
}

impl TryFrom<String> for Seed {
    type Error = SeedParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}
