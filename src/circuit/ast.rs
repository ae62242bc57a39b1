//! Parsed construct types.

use serde::Serialize;

use super::parse::ParseError;

/// One promoter–gene–terminator unit, the repeating element of a construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cassette {
    pub promoter: String,
    pub gene: String,
    pub terminator: String,
}

impl Cassette {
    #[must_use]
    pub fn new(promoter: impl Into<String>, gene: impl Into<String>, terminator: impl Into<String>) -> Self {
        Self { promoter: promoter.into(), gene: gene.into(), terminator: terminator.into() }
    }
}

/// A named, ordered, non-empty sequence of cassettes.
///
/// Fields are private so every `Construct` in circulation upholds the
/// non-empty name and non-empty cassette list invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Construct {
    name: String,
    cassettes: Vec<Cassette>,
}

impl Construct {
    /// Build a construct, rejecting an empty name or an empty cassette list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyName`] or [`ParseError::EmptyConstruct`].
    pub fn new(name: impl Into<String>, cassettes: Vec<Cassette>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        if cassettes.is_empty() {
            return Err(ParseError::EmptyConstruct { name });
        }
        Ok(Self { name, cassettes })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cassettes(&self) -> &[Cassette] {
        &self.cassettes
    }

    /// Download filename for the rendered image.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}.png", self.name)
    }
}
