use std::sync::Arc;

use resvg::usvg::fontdb;

use super::*;
use crate::config::RenderConfig;

const EXAMPLE: &str = "pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1\npSynBio3000: pHXT7-RFP-tADH1,pTEF1-GFP-tCYC1";

fn rasterizer() -> Rasterizer {
    let config = RenderConfig { dpi: 20, ..RenderConfig::default() };
    Rasterizer::with_fonts(&config, Arc::new(fontdb::Database::new()))
}

#[test]
fn construct_lines_skips_blank_lines_and_numbers_from_one() {
    let lines = construct_lines("\na: p-g-t\n   \nb: p-g-t\n");
    assert_eq!(lines, vec![(2, "a: p-g-t"), (4, "b: p-g-t")]);
}

#[test]
fn run_renders_every_line_in_order() {
    let report = run(EXAMPLE, &rasterizer(), BatchOptions::default()).unwrap();
    let names: Vec<&str> = report.rendered().map(|r| r.construct.name()).collect();
    assert_eq!(names, ["pSynBio5000", "pSynBio3000"]);
    assert!(!report.has_errors());
    for rendered in report.rendered() {
        assert_eq!(rendered.layout.elements.len(), 6);
        assert!(rendered.png.starts_with(b"\x89PNG"));
    }
}

#[test]
fn run_empty_input_is_rejected() {
    assert!(matches!(run("", &rasterizer(), BatchOptions::default()), Err(BatchError::EmptyInput)));
    assert!(matches!(run(" \n\t\n", &rasterizer(), BatchOptions::default()), Err(BatchError::EmptyInput)));
}

#[test]
fn run_continues_past_bad_lines() {
    let input = "badline\ngood: p-g-t\nshort: pTEF1-GFP\nalso: a-b-c";
    let report = run(input, &rasterizer(), BatchOptions::default()).unwrap();

    let names: Vec<&str> = report.rendered().map(|r| r.construct.name()).collect();
    assert_eq!(names, ["good", "also"]);

    let errors: Vec<&LineError> = report.errors().collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].line_number, 1);
    assert_eq!(errors[0].line, "badline");
    assert!(matches!(errors[0].failure, LineFailure::Parse(ParseError::MalformedLine { .. })));
    assert_eq!(errors[1].line_number, 3);
    assert!(matches!(errors[1].failure, LineFailure::Parse(ParseError::MalformedCassette { fields: 2, .. })));
}

#[test]
fn run_keeps_outcomes_in_input_order() {
    let report = run("a: p-g-t\nbroken\nc: p-g-t", &rasterizer(), BatchOptions::default()).unwrap();
    let kinds: Vec<bool> = report.outcomes.iter().map(|o| matches!(o, Outcome::Rendered(_))).collect();
    assert_eq!(kinds, [true, false, true]);
}

#[test]
fn run_fail_fast_stops_at_first_error() {
    let options = BatchOptions { mode: BatchMode::FailFast, ..BatchOptions::default() };
    let err = run("good: p-g-t\nbadline\nlater: p-g-t", &rasterizer(), options).unwrap_err();
    let BatchError::Line(line_error) = err else {
        panic!("expected line error");
    };
    assert_eq!(line_error.line_number, 2);
    assert_eq!(line_error.to_string(), "line 2: malformed line (expected `name: promoter-gene-terminator,...`): badline");
}

#[test]
fn run_enforces_construct_limit() {
    let options = BatchOptions { max_constructs: Some(1), ..BatchOptions::default() };
    let err = run(EXAMPLE, &rasterizer(), options).unwrap_err();
    assert!(matches!(err, BatchError::TooManyConstructs { count: 2, max: 1 }));
}

#[test]
fn render_line_returns_layout_and_png() {
    let (construct, layout, png) = render_line("x: p-g-t", &rasterizer()).unwrap();
    assert_eq!(construct.name(), "x");
    assert_eq!(layout.title, "Gene Circuit: x");
    assert!(!png.is_empty());
}
