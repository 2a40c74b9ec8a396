use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use sales_intel::error::AppError;
use sales_intel::reporting::import::LeadCsvImporter;
use sales_intel::reporting::sales::domain::{PeriodWindow, RawLead};
use sales_intel::reporting::sales::views::SalesReportView;
use sales_intel::reporting::sales::{build_report, ReportScope, SalesRoster, StatusVocabulary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct SalesReportRequest {
    pub(crate) month: u32,
    pub(crate) year: i32,
    #[serde(default)]
    pub(crate) project: Option<String>,
    #[serde(default)]
    pub(crate) setter: Option<String>,
    /// Lead rows supplied inline, already shaped.
    #[serde(default)]
    pub(crate) leads: Option<Vec<RawLead>>,
    /// Raw CSV text of a lead tracker export; takes precedence over
    /// inline rows.
    #[serde(default)]
    pub(crate) leads_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SalesReportResponse {
    pub(crate) data_source: LeadDataSource,
    pub(crate) report: SalesReportView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LeadDataSource {
    Csv,
    Inline,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/sales/report",
            axum::routing::post(sales_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn sales_report_endpoint(
    Json(payload): Json<SalesReportRequest>,
) -> Result<Json<SalesReportResponse>, AppError> {
    let SalesReportRequest {
        month,
        year,
        project,
        setter,
        leads,
        leads_csv,
    } = payload;

    let window = PeriodWindow::new(month, year)?;
    let scope = ReportScope { project, setter };

    let (leads, data_source) = if let Some(csv) = leads_csv {
        let rows = LeadCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
        (rows, LeadDataSource::Csv)
    } else {
        (leads.unwrap_or_default(), LeadDataSource::Inline)
    };

    let report = build_report(
        &leads,
        window,
        &scope,
        &SalesRoster::standard(),
        &StatusVocabulary::standard(),
    );

    Ok(Json(SalesReportResponse {
        data_source,
        report,
    }))
}
