use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use axum_prometheus::PrometheusMetricLayer;
use eligibility::{screen, ScreeningFailure, ScreeningOutcome};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
}

/// The global metrics recorder can only be installed once per process, so
/// the layer/handle pair is built lazily and shared by every caller.
fn shared_metrics() -> &'static (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    METRICS.get_or_init(PrometheusMetricLayer::pair)
}

/// Builds a fresh, not-yet-ready [`AppState`] alongside the Prometheus layer
/// that must be attached to the same router. Callers flip `readiness` once
/// the listener is bound.
pub fn new_app_state() -> (AppState, PrometheusMetricLayer<'static>) {
    let (prometheus_layer, prometheus_handle) = shared_metrics().clone();
    let app_state = AppState {
        readiness: Arc::new(AtomicBool::new(false)),
        metrics: Arc::new(prometheus_handle),
    };
    (app_state, prometheus_layer)
}

pub fn build_router(app_state: AppState, prometheus_layer: PrometheusMetricLayer<'static>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/eligibility/screen", post(screen_endpoint))
        .layer(Extension(app_state))
        .layer(prometheus_layer)
}

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

pub async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub async fn screen_endpoint(Json(body): Json<Value>) -> Result<Json<ScreeningOutcome>, ScreeningRejection> {
    screen(&body).map(Json).map_err(ScreeningRejection)
}

#[derive(Debug)]
pub struct ScreeningRejection(pub ScreeningFailure);

impl IntoResponse for ScreeningRejection {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn screen_endpoint_reports_eligible_programs() {
        let body = json!({
            "household": [{ "livingRenting": false }],
            "person": [{ "age": 30, "householdMemberType": "HeadOfHousehold" }]
        });

        let Json(outcome) = screen_endpoint(Json(body)).await.expect("screening succeeds");
        assert!(outcome.success);
        assert!(outcome.eligible_programs.contains(&"S2R011".to_string()));
    }

    #[tokio::test]
    async fn screen_endpoint_rejects_invalid_requests() {
        let body = json!({ "household": [{}], "person": [] });

        let err = screen_endpoint(Json(body)).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
