use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::state::test_helpers;

const EXAMPLE_LINE: &str = "pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1";

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// =============================================================================
// PAGE
// =============================================================================

#[tokio::test]
async fn index_prefills_example() {
    let Html(html) = index().await;
    assert!(html.contains("<title>Genetic Circuit Visualizer</title>"));
    assert!(html.contains("name=\"constructs\""));
    assert!(html.contains("pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1\npSynBio3000: pHXT7-RFP-tADH1,pTEF1-GFP-tCYC1</textarea>"));
    assert!(html.contains("Generate Visualizations"));
    assert!(!html.contains("id=\"results\""));
}

#[tokio::test]
async fn generate_shows_image_and_download_link_per_construct() {
    let state = test_helpers::test_app_state();
    let form = GenerateForm { constructs: page::EXAMPLE_INPUT.to_owned() };
    let Html(html) = generate(State(state), Form(form)).await.unwrap();

    assert_eq!(html.matches("<img src=\"data:image/png;base64,").count(), 2);
    assert!(html.contains("download=\"pSynBio5000.png\">Download pSynBio5000 construct</a>"));
    assert!(html.contains("download=\"pSynBio3000.png\">Download pSynBio3000 construct</a>"));
    assert!(html.contains("alt=\"Gene Circuit: pSynBio3000\""));
    assert_eq!(html.matches("<hr>").count(), 2);
}

#[tokio::test]
async fn generate_empty_input_warns() {
    let state = test_helpers::test_app_state();
    let Html(html) = generate(State(state), Form(GenerateForm { constructs: "  \n".into() })).await.unwrap();
    assert!(html.contains("Please enter at least one construct."));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn generate_lists_bad_lines_and_renders_the_rest() {
    let state = test_helpers::test_app_state();
    let input = format!("badline\n{EXAMPLE_LINE}");
    let Html(html) = generate(State(state), Form(GenerateForm { constructs: input })).await.unwrap();
    assert!(html.contains("Line 1: <code>badline</code>"));
    assert_eq!(html.matches("<img ").count(), 1);
}

#[tokio::test]
async fn generate_escapes_user_input() {
    let state = test_helpers::test_app_state();
    let input = "<script>: p-g-t".to_owned();
    let Html(html) = generate(State(state), Form(GenerateForm { constructs: input })).await.unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn generate_too_many_constructs_warns() {
    let state = test_helpers::test_app_state();
    let input = "a: p-g-t\nb: p-g-t\nc: p-g-t\nd: p-g-t\ne: p-g-t".to_owned();
    let Html(html) = generate(State(state), Form(GenerateForm { constructs: input })).await.unwrap();
    assert!(html.contains("too many constructs: 5 (max 4)"));
}

// =============================================================================
// JSON API
// =============================================================================

#[tokio::test]
async fn render_api_returns_layouts_and_pngs() {
    let state = test_helpers::test_app_state();
    let body = RenderRequest { constructs: format!("{EXAMPLE_LINE}\nbroken: a-b") };
    let Json(response) = render_api(State(state), Json(body)).await.unwrap();

    assert_eq!(response.constructs.len(), 1);
    let rendered = &response.constructs[0];
    assert_eq!(rendered.name, "pSynBio5000");
    assert_eq!(rendered.filename, "pSynBio5000.png");
    assert_eq!(rendered.title, "Gene Circuit: pSynBio5000");
    assert_eq!(rendered.cassettes.len(), 2);
    assert_eq!(rendered.layout.elements.len(), 6);
    assert!(rendered.png_base64.starts_with("iVBORw0KGgo"));

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].line_number, 2);
    assert!(response.errors[0].message.contains("a-b"));
}

#[tokio::test]
async fn render_api_serializes_element_kinds() {
    let state = test_helpers::test_app_state();
    let body = RenderRequest { constructs: "x: p-g-t".into() };
    let Json(response) = render_api(State(state), Json(body)).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    let kinds: Vec<&str> = json["constructs"][0]["layout"]["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["promoter", "gene", "terminator"]);
}

#[tokio::test]
async fn render_api_empty_input_is_bad_request() {
    let state = test_helpers::test_app_state();
    let (status, Json(body)) = render_api(State(state), Json(RenderRequest { constructs: String::new() }))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no construct lines provided");
}

// =============================================================================
// PNG DOWNLOAD
// =============================================================================

#[tokio::test]
async fn construct_png_sets_attachment_filename() {
    let state = test_helpers::test_app_state();
    let response = construct_png(State(state), Query(PngQuery { line: EXAMPLE_LINE.into() }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[CONTENT_DISPOSITION], "attachment; filename=\"pSynBio5000.png\"");
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn construct_png_malformed_line_is_bad_request() {
    let state = test_helpers::test_app_state();
    let (status, Json(body)) = construct_png(State(state), Query(PngQuery { line: "badline".into() }))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("badline"));
}

// =============================================================================
// BLOCKING POOL
// =============================================================================

#[tokio::test]
async fn generate_yields_to_other_tasks_while_rendering() {
    let state = test_helpers::test_app_state();
    let ticked = Arc::new(AtomicBool::new(false));
    let ticker = {
        let ticked = Arc::clone(&ticked);
        tokio::spawn(async move { ticked.store(true, Ordering::SeqCst) })
    };

    // Single-threaded runtime: the ticker can only run if the handler awaits.
    let form = GenerateForm { constructs: page::EXAMPLE_INPUT.to_owned() };
    let Html(html) = generate(State(state), Form(form)).await.unwrap();

    assert!(ticked.load(Ordering::SeqCst), "handler rendered without yielding");
    assert_eq!(html.matches("<img ").count(), 2);
    ticker.await.unwrap();
}

#[tokio::test]
async fn run_blocking_returns_work_result() {
    assert_eq!(run_blocking(|| 21 * 2).await, Ok(42));
}

#[tokio::test]
async fn run_blocking_maps_panic_to_internal_error() {
    let result: Result<(), StatusCode> = run_blocking(|| panic!("rasterizer blew up")).await;
    assert_eq!(result, Err(StatusCode::INTERNAL_SERVER_ERROR));
}

// =============================================================================
// HELPERS
// =============================================================================

#[test]
fn attachment_filename_replaces_unsafe_characters() {
    assert_eq!(attachment_filename("plain name.png"), "plain name.png");
    assert_eq!(attachment_filename("a\"b\\c\u{e9}\n.png"), "a_b_c__.png");
}

#[test]
fn batch_errors_map_to_status() {
    assert_eq!(batch_error_to_status(&BatchError::EmptyInput), StatusCode::BAD_REQUEST);
    assert_eq!(
        batch_error_to_status(&BatchError::TooManyConstructs { count: 9, max: 4 }),
        StatusCode::BAD_REQUEST
    );
}
