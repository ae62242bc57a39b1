//! Multi-line batch rendering.
//!
//! DESIGN
//! ======
//! Input holds one construct per line; blank lines are skipped. Each line is
//! parsed, laid out and rasterized independently, and the outcome is recorded
//! in input order.
//!
//! ERROR HANDLING
//! ==============
//! By default a failing line is reported (with its 1-based line number) and the
//! remaining lines are still rendered. [`BatchMode::FailFast`] instead stops at
//! the first failure and returns it as [`BatchError::Line`], with nothing from
//! the batch kept.

use tracing::{debug, warn};

use crate::circuit::{self, Construct, Layout, ParseError};
use crate::render::{Rasterizer, RenderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    #[default]
    ContinueOnError,
    FailFast,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub mode: BatchMode,
    /// Upper bound on non-blank lines; `None` means unbounded.
    pub max_constructs: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum LineFailure {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A construct line that could not be rendered.
#[derive(Debug, thiserror::Error)]
#[error("line {line_number}: {failure}")]
pub struct LineError {
    pub line_number: usize,
    pub line: String,
    pub failure: LineFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("no construct lines provided")]
    EmptyInput,
    #[error("too many constructs: {count} (max {max})")]
    TooManyConstructs { count: usize, max: usize },
    #[error(transparent)]
    Line(LineError),
}

#[derive(Debug)]
pub struct RenderedConstruct {
    pub line_number: usize,
    pub construct: Construct,
    pub layout: Layout,
    pub png: Vec<u8>,
}

#[derive(Debug)]
pub enum Outcome {
    Rendered(RenderedConstruct),
    Failed(LineError),
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn rendered(&self) -> impl Iterator<Item = &RenderedConstruct> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Rendered(r) => Some(r),
            Outcome::Failed(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &LineError> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Failed(e) => Some(e),
            Outcome::Rendered(_) => None,
        })
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Non-blank lines with their 1-based line numbers.
#[must_use]
pub fn construct_lines(input: &str) -> Vec<(usize, &str)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
        .collect()
}

/// Parse, lay out and rasterize one line.
///
/// # Errors
///
/// Returns [`LineFailure`] when parsing or rasterizing fails.
pub fn render_line(line: &str, rasterizer: &Rasterizer) -> Result<(Construct, Layout, Vec<u8>), LineFailure> {
    let construct = circuit::parse(line)?;
    let layout = circuit::layout(&construct);
    let png = rasterizer.render(&layout)?;
    Ok((construct, layout, png))
}

/// Render every construct line of `input`.
///
/// # Errors
///
/// Returns [`BatchError::EmptyInput`] when there are no non-blank lines,
/// [`BatchError::TooManyConstructs`] when `max_constructs` is exceeded, and in
/// [`BatchMode::FailFast`] the first [`BatchError::Line`] failure.
pub fn run(input: &str, rasterizer: &Rasterizer, options: BatchOptions) -> Result<BatchReport, BatchError> {
    let lines = construct_lines(input);
    if lines.is_empty() {
        return Err(BatchError::EmptyInput);
    }
    if let Some(max) = options.max_constructs {
        if lines.len() > max {
            return Err(BatchError::TooManyConstructs { count: lines.len(), max });
        }
    }

    let mut report = BatchReport { outcomes: Vec::with_capacity(lines.len()) };
    for (line_number, line) in lines {
        match render_line(line, rasterizer) {
            Ok((construct, layout, png)) => {
                debug!(line = line_number, construct = %construct.name(), cassettes = construct.cassettes().len(), bytes = png.len(), "construct rendered");
                report.outcomes.push(Outcome::Rendered(RenderedConstruct { line_number, construct, layout, png }));
            }
            Err(failure) => {
                warn!(line = line_number, error = %failure, "construct line failed");
                let error = LineError { line_number, line: line.to_owned(), failure };
                if options.mode == BatchMode::FailFast {
                    return Err(BatchError::Line(error));
                }
                report.outcomes.push(Outcome::Failed(error));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
