//! Utilization summary routes.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Html;
use summary::{HtmlDocument, LowUtilizationReport};

use crate::state::AppState;

/// Error body for a rejected payload: status plus the extractor's message.
pub type PayloadRejection = (StatusCode, String);

/// `GET /util-summary`: the page before any data arrives.
pub async fn initial_page(State(state): State<AppState>) -> Html<String> {
    Html(HtmlDocument::new().render_page(&state.config.title, None))
}

/// `POST /util-summary`: render the posted report into a full page.
pub async fn rendered_page(
    State(state): State<AppState>,
    payload: Result<Json<LowUtilizationReport>, JsonRejection>,
) -> Result<Html<String>, PayloadRejection> {
    let Json(report) = payload.map_err(rejection_response)?;
    let doc = render(&report);
    Ok(Html(doc.render_page(&state.config.title, report.total_resources)))
}

/// `POST /api/util-summary/view`: render and return the element state.
pub async fn view_snapshot(
    payload: Result<Json<LowUtilizationReport>, JsonRejection>,
) -> Result<Json<HtmlDocument>, PayloadRejection> {
    let Json(report) = payload.map_err(rejection_response)?;
    Ok(Json(render(&report)))
}

fn render(report: &LowUtilizationReport) -> HtmlDocument {
    let doc = HtmlDocument::rendered(report);
    tracing::info!(
        month_end_date = report.month_end_date.as_deref().unwrap_or_default(),
        below_35 = doc.below_35.rows.len(),
        below_50 = doc.below_50.rows.len(),
        "utilization summary rendered"
    );
    doc
}

fn rejection_response(rejection: JsonRejection) -> PayloadRejection {
    let status = rejection.status();
    let message = rejection.body_text();
    tracing::warn!(status = status.as_u16(), error = %message, "rejected utilization payload");
    (status, message)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
