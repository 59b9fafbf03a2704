use serde_json::json;

use super::*;
use crate::config::ServerConfig;

fn test_state() -> AppState {
    AppState::new(ServerConfig { title: "Bench Report".into(), ..ServerConfig::default() })
}

fn sample_report() -> LowUtilizationReport {
    serde_json::from_value(json!({
        "month_end_date": "2024-06-01",
        "below_35": [
            { "name": "srv1", "avg_utilization": 0.321, "billing_type": "on-demand", "rdm": "team-a" }
        ],
        "below_50": [],
        "total_resources": 7
    }))
    .unwrap()
}

#[tokio::test]
async fn initial_page_shows_loading_state() {
    let Html(page) = initial_page(State(test_state())).await;

    assert!(page.contains("<title>Bench Report</title>"));
    assert!(page.contains("<div id=\"below-35-loading\" class=\"util-loading\">Loading...</div>"));
    assert!(!page.contains("resources reviewed"));
}

#[tokio::test]
async fn rendered_page_contains_rows_and_label() {
    let Html(page) = rendered_page(State(test_state()), Ok(Json(sample_report()))).await.unwrap();

    assert!(page.contains("Data as of: June 1, 2024 (4-week average)"));
    assert!(page.contains("<tr><td>srv1</td><td>32.1%</td><td>on-demand</td><td>team-a</td></tr>"));
    assert!(page.contains("<p class=\"util-total\">7 resources reviewed</p>"));
    assert!(page.contains("<div id=\"below-50-no-data\" class=\"util-no-data\">"));
}

#[tokio::test]
async fn view_snapshot_reports_visibility() {
    let Json(doc) = view_snapshot(Ok(Json(sample_report()))).await.unwrap();

    assert!(doc.below_35.container.visible);
    assert!(!doc.below_35.no_data.visible);
    assert_eq!(doc.below_35.rows[0].utilization, "32.1%");
    assert!(doc.below_50.no_data.visible);
    assert!(!doc.below_50.loading.visible);
}

#[tokio::test]
async fn empty_report_renders_no_data_for_both_buckets() {
    let Json(doc) = view_snapshot(Ok(Json(LowUtilizationReport::default()))).await.unwrap();

    assert_eq!(doc.date_label.text, "Data as of: Invalid Date (4-week average)");
    assert!(doc.below_35.no_data.visible);
    assert!(doc.below_50.no_data.visible);
    assert!(doc.below_35.rows.is_empty());
}
