//! Gene circuit construct parser and layout engine.
//!
//! Parses the one-line construct notation (`name: promoter-gene-terminator,...`)
//! into a [`Construct`] and lays its cassettes out left to right along a single
//! baseline as positioned [`LayoutElement`]s ready for the renderer.

pub mod ast;
pub mod layout;
pub mod palette;
pub mod parse;

pub use ast::{Cassette, Construct};
pub use layout::{CanvasBounds, ElementKind, Layout, LayoutElement, layout};
pub use parse::{ParseError, parse};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
