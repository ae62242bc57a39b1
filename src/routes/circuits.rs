//! Visualizer page, render API and PNG download routes.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::page;
use crate::batch::{self, BatchError, LineFailure, Outcome};
use crate::circuit::{Cassette, Layout};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub constructs: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub constructs: String,
}

#[derive(Debug, Deserialize)]
pub struct PngQuery {
    pub line: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub constructs: Vec<RenderedConstructResponse>,
    pub errors: Vec<LineErrorResponse>,
}

#[derive(Debug, Serialize)]
pub struct RenderedConstructResponse {
    pub line_number: usize,
    pub name: String,
    pub title: String,
    pub filename: String,
    pub cassettes: Vec<Cassette>,
    pub layout: Layout,
    pub png_base64: String,
}

#[derive(Debug, Serialize)]
pub struct LineErrorResponse {
    pub line_number: usize,
    pub line: String,
    pub message: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

const RENDER_TASK_FAILED: &str = "render task failed";

fn api_error(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.to_string() })))
}

/// `GET /`: the visualizer form, pre-filled with the two-line example.
pub async fn index() -> Html<String> {
    Html(page::render_page(page::EXAMPLE_INPUT, ""))
}

/// `POST /generate`: render every submitted line and show the results.
pub async fn generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let input = form.constructs.clone();
    let result = run_blocking(move || batch::run(&input, &state.rasterizer, state.batch_options()))
        .await
        .map_err(|status| {
            let content = page::warning(page::RENDER_FAILED_WARNING);
            (status, Html(page::render_page(&form.constructs, &content)))
        })?;

    let content = match result {
        Ok(report) => {
            info!(
                rendered = report.rendered().count(),
                failed = report.errors().count(),
                "visualizations generated"
            );
            page::results(&report)
        }
        Err(BatchError::EmptyInput) => page::warning(page::EMPTY_INPUT_WARNING),
        Err(e) => {
            warn!(error = %e, "generate rejected");
            page::warning(&e.to_string())
        }
    };
    Ok(Html(page::render_page(&form.constructs, &content)))
}

/// `POST /api/render`: render constructs and return layouts plus base64 PNGs.
pub async fn render_api(
    State(state): State<AppState>,
    Json(body): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let report = run_blocking(move || batch::run(&body.constructs, &state.rasterizer, state.batch_options()))
        .await
        .map_err(|status| api_error(status, RENDER_TASK_FAILED))?
        .map_err(|e| api_error(batch_error_to_status(&e), e))?;

    let mut response = RenderResponse { constructs: Vec::new(), errors: Vec::new() };
    for outcome in report.outcomes {
        match outcome {
            Outcome::Rendered(rendered) => response.constructs.push(RenderedConstructResponse {
                line_number: rendered.line_number,
                name: rendered.construct.name().to_owned(),
                title: rendered.layout.title.clone(),
                filename: rendered.construct.filename(),
                cassettes: rendered.construct.cassettes().to_vec(),
                png_base64: page::png_base64(&rendered.png),
                layout: rendered.layout,
            }),
            Outcome::Failed(e) => response.errors.push(LineErrorResponse {
                line_number: e.line_number,
                line: e.line,
                message: e.failure.to_string(),
            }),
        }
    }

    Ok(Json(response))
}

/// `GET /api/construct.png?line=...`: download one construct as a PNG file.
pub async fn construct_png(State(state): State<AppState>, Query(query): Query<PngQuery>) -> Result<Response, ApiError> {
    let (construct, _layout, png) = run_blocking(move || batch::render_line(query.line.trim(), &state.rasterizer))
        .await
        .map_err(|status| api_error(status, RENDER_TASK_FAILED))?
        .map_err(|failure| {
            let status = line_failure_to_status(&failure);
            if status.is_server_error() {
                error!(error = %failure, "construct render failed");
            }
            api_error(status, failure)
        })?;

    let disposition = format!("attachment; filename=\"{}\"", attachment_filename(&construct.filename()));
    Ok(([(CONTENT_TYPE, "image/png".to_owned()), (CONTENT_DISPOSITION, disposition)], png).into_response())
}

/// Run CPU-bound rendering on the blocking pool so async workers stay free.
///
/// A task that panics or is cancelled maps to 500.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!(error = %e, "render task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub(crate) fn batch_error_to_status(err: &BatchError) -> StatusCode {
    match err {
        BatchError::EmptyInput | BatchError::TooManyConstructs { .. } => StatusCode::BAD_REQUEST,
        BatchError::Line(line) => line_failure_to_status(&line.failure),
    }
}

pub(crate) fn line_failure_to_status(failure: &LineFailure) -> StatusCode {
    match failure {
        LineFailure::Parse(_) => StatusCode::BAD_REQUEST,
        LineFailure::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Header-safe filename: quotes, backslashes, control and non-ASCII characters
/// become `_`.
pub(crate) fn attachment_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "circuits_test.rs"]
mod tests;
