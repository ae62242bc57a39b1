//! Split-based parser for the construct line notation.
//!
//! ```text
//! pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1
//! ```
//!
//! The name ends at the first `:`. Cassettes are separated by `,` and each
//! cassette has exactly three `-` separated fields. Only the name and the
//! cassette list are trimmed; part names are kept verbatim.

use super::ast::{Cassette, Construct};

const NAME_DELIMITER: char = ':';
const CASSETTE_DELIMITER: char = ',';
const PART_DELIMITER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed line (expected `name: promoter-gene-terminator,...`): {line}")]
    MalformedLine { line: String },
    #[error("malformed cassette `{spec}`: expected 3 dash-separated fields, found {fields}")]
    MalformedCassette { spec: String, fields: usize },
    #[error("construct name is empty")]
    EmptyName,
    #[error("construct `{name}` has no cassettes")]
    EmptyConstruct { name: String },
}

/// Parse one construct line.
///
/// # Errors
///
/// Returns [`ParseError::MalformedLine`] when the line has no colon,
/// [`ParseError::MalformedCassette`] when a cassette does not split into three
/// fields, and [`ParseError::EmptyName`] when the name is blank.
pub fn parse(line: &str) -> Result<Construct, ParseError> {
    let (name, spec) = line
        .split_once(NAME_DELIMITER)
        .ok_or_else(|| ParseError::MalformedLine { line: line.to_owned() })?;

    let cassettes = spec
        .trim()
        .split(CASSETTE_DELIMITER)
        .map(parse_cassette)
        .collect::<Result<Vec<_>, _>>()?;

    Construct::new(name.trim(), cassettes)
}

/// Parse a single `promoter-gene-terminator` spec.
fn parse_cassette(spec: &str) -> Result<Cassette, ParseError> {
    let fields: Vec<&str> = spec.split(PART_DELIMITER).collect();
    match fields.as_slice() {
        [promoter, gene, terminator] => Ok(Cassette::new(*promoter, *gene, *terminator)),
        _ => Err(ParseError::MalformedCassette { spec: spec.to_owned(), fields: fields.len() }),
    }
}
