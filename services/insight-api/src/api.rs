use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use accesstrial_shared::{
    classify::{PriorityTier, SaturationTier},
    errors::{InsightError, Result},
    metrics,
    reference::ReferenceData,
    types::{DateRange, FilterState, Period, Selection},
};

use crate::service::InsightService;

pub fn router(service: Arc<InsightService>) -> Router {
    let mut app = Router::new()
        .route("/overview", get(handle_overview))
        .route("/reference", get(handle_reference))
        .route("/territories", get(handle_territories))
        .route("/indications", get(handle_indications))
        .route("/centres", get(handle_centres))
        .route("/recruitment", get(handle_recruitment))
        .route("/signals", get(handle_signals))
        .route("/reports", get(handle_reports))
        .route("/classify/saturation/:value", get(handle_classify_saturation))
        .route("/classify/priority/:interest", get(handle_classify_priority))
        .route("/health", get(handle_health))
        .route("/status", get(handle_status));

    if service.metrics_enabled() {
        app = app.route("/metrics", get(handle_metrics));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

pub async fn start_server(service: Arc<InsightService>, addr: &str) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Insight API server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Query string of `/overview`. Every field is optional; dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    pub indication: Option<String>,
    pub region: Option<String>,
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl OverviewQuery {
    pub fn into_filters(self) -> Result<FilterState> {
        let mut filters = FilterState::default();
        if let Some(indication) = self.indication {
            filters.set_indication(Selection::from(indication));
        }
        if let Some(region) = self.region {
            filters.set_region(Selection::from(region));
        }
        let period = self.period.as_deref().map(str::parse::<Period>).transpose()?;
        if let Some(period) = period {
            filters.set_period(period);
        }

        let range = DateRange::new(parse_date(self.from)?, parse_date(self.to)?);
        if range.is_empty() {
            return Ok(filters);
        }
        if matches!(period, Some(p) if p != Period::Custom) {
            return Err(InsightError::ValidationError(
                "from/to require period=custom".to_string(),
            ));
        }
        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                return Err(InsightError::ValidationError(format!(
                    "date range starts after it ends ({} > {})",
                    from, to
                )));
            }
        }
        filters.set_custom_range(range);
        Ok(filters)
    }
}

fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => NaiveDate::parse_from_str(&v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| InsightError::InvalidDate { value: v }),
    }
}

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CentreQuery {
    centre: Option<String>,
}

fn error_response(service: &InsightService, route: &str, err: InsightError) -> Response {
    warn!("Rejected {} request: {}", route, err);
    service.record_request(route, false);
    (StatusCode::BAD_REQUEST, Json(json!({
        "success": false,
        "error": err.to_string(),
    }))).into_response()
}

async fn handle_overview(
    State(service): State<Arc<InsightService>>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    match query.into_filters() {
        Ok(filters) => {
            let overview = service.overview(filters);
            service.record_request("/overview", true);
            (StatusCode::OK, Json(overview)).into_response()
        }
        Err(e) => error_response(&service, "/overview", e),
    }
}

async fn handle_reference(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    let reference = service.reference();
    service.record_request("/reference", true);
    Json(json!({
        "pathologies": reference.pathologies,
        "regions": reference.regions,
        "periods": ReferenceData::period_options(),
    }))
}

async fn handle_territories(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    service.record_request("/territories", true);
    Json(service.territories())
}

async fn handle_indications(
    State(service): State<Arc<InsightService>>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = match query.period.as_deref().map(str::parse::<Period>).transpose() {
        Ok(period) => period.unwrap_or_default(),
        Err(e) => return error_response(&service, "/indications", e),
    };
    service.record_request("/indications", true);
    (StatusCode::OK, Json(service.indications(period))).into_response()
}

async fn handle_centres(
    State(service): State<Arc<InsightService>>,
    Query(query): Query<CentreQuery>,
) -> Response {
    match service.centres(query.centre.as_deref()) {
        Ok(activity) => {
            service.record_request("/centres", true);
            (StatusCode::OK, Json(activity)).into_response()
        }
        Err(e) => error_response(&service, "/centres", e),
    }
}

async fn handle_recruitment(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    service.record_request("/recruitment", true);
    Json(service.recruitment())
}

async fn handle_signals(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    service.record_request("/signals", true);
    Json(service.signals())
}

async fn handle_reports(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    service.record_request("/reports", true);
    Json(service.reports())
}

async fn handle_classify_saturation(
    State(service): State<Arc<InsightService>>,
    Path(raw): Path<String>,
) -> Response {
    let value = match parse_saturation(&raw) {
        Ok(value) => value,
        Err(e) => return error_response(&service, "/classify/saturation", e),
    };

    let tier = SaturationTier::classify(value);
    service.record_request("/classify/saturation", true);
    Json(json!({
        "value": value,
        "tier": tier,
        "label": tier.label(),
        "tone": tier.tone(),
    })).into_response()
}

async fn handle_classify_priority(
    State(service): State<Arc<InsightService>>,
    Path(raw): Path<String>,
) -> Response {
    let interest = match parse_interest(&raw) {
        Ok(interest) => interest,
        Err(e) => return error_response(&service, "/classify/priority", e),
    };

    let tier = PriorityTier::from_interest(interest);
    service.record_request("/classify/priority", true);
    Json(json!({
        "interest": interest,
        "tier": tier,
        "label": tier.label(),
        "tone": tier.tone(),
    })).into_response()
}

fn parse_saturation(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InsightError::ValidationError(format!(
            "saturation must be a number, got '{}'",
            raw
        ))),
    }
}

fn parse_interest(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        InsightError::ValidationError(format!("interest must be an integer, got '{}'", raw))
    })
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "insight-api",
        "timestamp": chrono::Utc::now(),
    }))
}

async fn handle_status(State(service): State<Arc<InsightService>>) -> impl IntoResponse {
    let stats = service.get_stats();
    let reference = service.reference();
    Json(json!({
        "service": "insight-api",
        "status": "running",
        "started_at": service.started_at(),
        "pathologies": reference.pathologies.len(),
        "regions": reference.regions.len(),
        "stats": stats,
        "timestamp": chrono::Utc::now(),
    }))
}

async fn handle_metrics() -> impl IntoResponse {
    metrics::gather_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(InsightService::new(ReferenceData::builtin(), true)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_overview_defaults() {
        let (status, body) = get_json("/overview").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["kpi"]["interest"], 73);
        assert_eq!(body["metrics"]["kpi"]["potential"], 336);
        assert_eq!(body["metrics"]["evolution"].as_array().unwrap().len(), 12);
        assert_eq!(body["active_filters"], false);
    }

    #[tokio::test]
    async fn test_overview_with_indication() {
        let (status, body) = get_json("/overview?indication=cancer-sein&region=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["kpi"]["interest"], 95);
        assert_eq!(body["metrics"]["ranked_indications"][0]["indication"], "Cancer du sein");
        assert_eq!(body["metrics"]["ranked_indications"][0]["priority"], "Très haute");
        assert_eq!(body["kpi_cards"][1]["value"], "1 400");
    }

    #[tokio::test]
    async fn test_overview_alert_for_unknown_indication() {
        let (status, body) = get_json("/overview?indication=foo").await;
        assert_eq!(status, StatusCode::OK);
        let alert = body["alert"].as_str().unwrap();
        assert!(alert.contains("\"pathologie sélectionnée\" en Île-de-France"));
    }

    #[tokio::test]
    async fn test_overview_custom_range() {
        let (status, body) = get_json("/overview?from=2024-01-01&to=2024-03-31").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filters"]["period"], "custom");
        assert_eq!(body["date_range"], "01/01/2024 - 31/03/2024");
        assert_eq!(body["active_filters"], true);
    }

    #[tokio::test]
    async fn test_overview_rejects_bad_input() {
        let (status, body) = get_json("/overview?period=last-2-weeks").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = get_json("/overview?from=2024-13-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json("/overview?period=last-30-days&from=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_classifiers() {
        let (_, body) = get_json("/classify/saturation/30").await;
        assert_eq!(body["label"], "Faible");
        assert_eq!(body["tone"], "yellow");

        let (_, body) = get_json("/classify/saturation/50.5").await;
        assert_eq!(body["label"], "Élevée");

        let (_, body) = get_json("/classify/priority/85").await;
        assert_eq!(body["label"], "Très haute");

        let (status, body) = get_json("/classify/priority/high").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("high"));
    }

    #[tokio::test]
    async fn test_malformed_classifier_input_is_recorded() {
        let service = Arc::new(InsightService::new(ReferenceData::builtin(), true));
        let app = router(service.clone());

        for uri in ["/classify/saturation/abc", "/classify/saturation/NaN", "/classify/priority/12.5"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
        }

        let stats = service.get_stats();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.failed_requests, 3);
    }

    #[test]
    fn test_parse_classifier_input() {
        assert_eq!(parse_saturation(" 42.5 ").unwrap(), 42.5);
        assert!(parse_saturation("inf").is_err());
        assert_eq!(parse_interest("85").unwrap(), 85);
        assert!(parse_interest("high").is_err());
    }

    #[tokio::test]
    async fn test_page_datasets() {
        let (status, body) = get_json("/territories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().unwrap().len(), 13);

        let (status, body) = get_json("/indications?period=last-6-months").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["consultations"].as_array().unwrap().len(), 14);

        let (status, body) = get_json("/centres?centre=chu-nantes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"]["name"], "CHU Nantes");

        let (status, _) = get_json("/centres?centre=nowhere").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get_json("/reference").await;
        assert_eq!(body["periods"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = app();
        let _ = app
            .clone()
            .oneshot(Request::builder().uri("/overview").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("insight_requests_total"));
    }

    #[test]
    fn test_query_to_filters() {
        let filters = OverviewQuery {
            indication: Some("lymphome".into()),
            region: Some("all".into()),
            period: Some("last-12-months".into()),
            ..Default::default()
        }
        .into_filters()
        .unwrap();
        assert_eq!(filters.indication, Selection::from("lymphome"));
        assert!(filters.region.is_all());
        assert_eq!(filters.period, Period::Last12Months);

        let err = OverviewQuery {
            from: Some("2024-04-01".into()),
            to: Some("2024-03-01".into()),
            ..Default::default()
        }
        .into_filters();
        assert!(matches!(err, Err(InsightError::ValidationError(_))));
    }
}
