//! Server-rendered HTML for the visualizer page.
//!
//! One page serves both states: the bare form (`GET /`) and the form followed
//! by the generated results (`POST /generate`). Images are embedded as data
//! URIs so a result page is self-contained and each download link carries its
//! own PNG.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::batch::{BatchReport, Outcome};
use crate::render::svg::escape_xml;

pub const PAGE_TITLE: &str = "Genetic Circuit Visualizer";
pub const EXAMPLE_INPUT: &str =
    "pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1\npSynBio3000: pHXT7-RFP-tADH1,pTEF1-GFP-tCYC1";
pub const EMPTY_INPUT_WARNING: &str = "Please enter at least one construct.";
pub const RENDER_FAILED_WARNING: &str = "Rendering failed. Please try again.";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#1f1a17}\
textarea{width:100%;font-family:monospace}\
img{max-width:100%;display:block;margin:1rem 0}\
.warning{background:#fff4e5;border-left:4px solid #f0a020;padding:.5rem 1rem}\
.error{background:#fdecea;border-left:4px solid #d93025;padding:.5rem 1rem}";

/// Full page with the form pre-filled with `input` and `content` below it.
#[must_use]
pub fn render_page(input: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
<h1>{PAGE_TITLE}</h1>\n\
<p>This app visualizes genetic circuits. Enter the construct names and construct strings below.</p>\n\
<p>Format for each construct: <code>circuit_name: promoter-gene-terminator,promoter-gene-terminator,...</code></p>\n\
<p>Example:</p>\n<pre>{example}</pre>\n\
<form method=\"post\" action=\"/generate\">\n\
<label for=\"constructs\">Enter Constructs (one per line)</label>\n\
<textarea id=\"constructs\" name=\"constructs\" rows=\"6\">{input}</textarea>\n\
<button type=\"submit\">Generate Visualizations</button>\n\
</form>\n{content}</body>\n</html>\n",
        example = escape_xml(EXAMPLE_INPUT),
        input = escape_xml(input),
    )
}

/// Warning banner, used for empty input and oversized batches.
#[must_use]
pub fn warning(message: &str) -> String {
    format!("<p class=\"warning\">{}</p>\n", escape_xml(message))
}

/// Results section: per construct an image, a download link and a separator;
/// failing lines are listed in place.
#[must_use]
pub fn results(report: &BatchReport) -> String {
    let mut html = String::from("<section id=\"results\">\n");
    for outcome in &report.outcomes {
        match outcome {
            Outcome::Rendered(rendered) => {
                let name = escape_xml(rendered.construct.name());
                let filename = escape_xml(&rendered.construct.filename());
                let data_uri = png_data_uri(&rendered.png);
                html.push_str(&format!(
                    "<figure>\n<img src=\"{data_uri}\" alt=\"{title}\">\n\
<a href=\"{data_uri}\" download=\"{filename}\">Download {name} construct</a>\n</figure>\n<hr>\n",
                    title = escape_xml(&rendered.layout.title),
                ));
            }
            Outcome::Failed(error) => {
                html.push_str(&format!(
                    "<p class=\"error\">Line {}: <code>{}</code>: {}</p>\n<hr>\n",
                    error.line_number,
                    escape_xml(&error.line),
                    escape_xml(&error.failure.to_string()),
                ));
            }
        }
    }
    html.push_str("</section>\n");
    html
}

/// Base64 PNG for JSON responses.
#[must_use]
pub fn png_base64(png: &[u8]) -> String {
    BASE64_STANDARD.encode(png)
}

#[must_use]
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", png_base64(png))
}
