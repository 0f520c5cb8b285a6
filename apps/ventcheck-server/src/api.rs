//! API handlers for the ventcheck server
//!
//! Provides REST endpoints for:
//! - Vent catalog listing
//! - Compliance calculation
//! - Scorecard PDF download

use std::any::Any;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use compliance_engine::{Assessment, ComplianceCalculator, ComplianceError};
use scorecard_pdf::{Scorecard, SystemReport, DEFAULT_FILE_NAME};
use shared_types::{
    ComplianceResult, ComplianceStatus, SystemKind, VentCategory, VentEntry, VentilationSystem,
};

use crate::error::{ServerError, INVALID_INPUT_MESSAGE};
use crate::extract::ApiJson;
use crate::AppState;

/// Routes without middleware; `main` adds rate limiting, CORS and tracing
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/catalog", get(handle_catalog))
        .route(
            "/api/calculate",
            post(handle_calculate).fallback(handle_method_not_allowed),
        )
        .route(
            "/api/report",
            post(handle_report).fallback(handle_method_not_allowed),
        )
        .with_state(state)
}

/// Panic catching, request tracing and CORS around a router.
/// Rate limiting is added by `main`, since it needs peer addresses.
pub fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "ventcheck-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// A vent the form can offer
#[derive(Serialize)]
pub struct VentOption {
    pub name: String,
    pub nfa: f64,
}

/// Catalog response, grouped the way the form lists vents
#[derive(Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub intake: Vec<VentOption>,
    pub exhaust: Vec<VentOption>,
    pub count: usize,
}

/// Handler: GET /api/catalog
pub async fn handle_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.calculator.catalog();
    let options = |category| {
        catalog
            .options(category)
            .map(|v| VentOption {
                name: v.name.clone(),
                nfa: v.nfa,
            })
            .collect::<Vec<_>>()
    };

    Json(CatalogResponse {
        success: true,
        intake: options(VentCategory::Intake),
        exhaust: options(VentCategory::Exhaust),
        count: catalog.len(),
    })
}

/// One vent line as sent by the form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentilationItem {
    #[serde(rename = "type")]
    pub category: VentCategory,
    pub vent_type: String,
    pub quantity: u32,
}

impl From<VentilationItem> for VentEntry {
    fn from(item: VentilationItem) -> Self {
        VentEntry::new(item.category, item.vent_type, item.quantity)
    }
}

/// Calculation request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub square_footage: Option<f64>,
    pub ventilation: Option<Vec<VentilationItem>>,
}

/// Calculation response. Percentages are unrounded numbers.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(rename = "requiredNFA")]
    pub required_nfa: f64,
    #[serde(rename = "intakeNFA")]
    pub intake_nfa: f64,
    #[serde(rename = "exhaustNFA")]
    pub exhaust_nfa: f64,
    #[serde(rename = "intakeCompliance")]
    pub intake_compliance: f64,
    #[serde(rename = "exhaustCompliance")]
    pub exhaust_compliance: f64,
    #[serde(rename = "intakeStatus")]
    pub intake_status: ComplianceStatus,
    #[serde(rename = "exhaustStatus")]
    pub exhaust_status: ComplianceStatus,
}

impl From<ComplianceResult> for CalculateResponse {
    fn from(result: ComplianceResult) -> Self {
        Self {
            required_nfa: result.required_nfa,
            intake_nfa: result.intake_nfa,
            exhaust_nfa: result.exhaust_nfa,
            intake_compliance: result.intake_compliance_pct,
            exhaust_compliance: result.exhaust_compliance_pct,
            intake_status: result.intake_status(),
            exhaust_status: result.exhaust_status(),
        }
    }
}

/// Handler: POST /api/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ServerError> {
    let square_footage = req
        .square_footage
        .ok_or_else(|| ServerError::InvalidRequest(INVALID_INPUT_MESSAGE.to_string()))?;
    let ventilation = match req.ventilation {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ServerError::InvalidRequest(INVALID_INPUT_MESSAGE.to_string())),
    };

    info!(
        "Calculate request: square_footage={}, entries={}",
        square_footage,
        ventilation.len()
    );
    debug!("Ventilation: {:?}", ventilation);

    let system = to_system(SystemKind::Current, ventilation);
    let result = state
        .calculator
        .compute_system(square_footage, &system)
        .map_err(reject_input)?;

    debug!("Result: {:?}", result);
    Ok(Json(result.into()))
}

/// Report request body: both plans for one attic
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub square_footage: Option<f64>,
    #[serde(default)]
    pub current: Vec<VentilationItem>,
    #[serde(default)]
    pub proposed: Vec<VentilationItem>,
}

/// Handler: POST /api/report
pub async fn handle_report(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReportRequest>,
) -> Result<Response, ServerError> {
    info!(
        "Report request: current={}, proposed={}",
        req.current.len(),
        req.proposed.len()
    );

    let today = chrono::Local::now().date_naive();
    let scorecard = build_scorecard(&state.calculator, req, Some(today))?;
    let pdf = scorecard_pdf::render(&scorecard)?;

    info!("Rendered scorecard ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DEFAULT_FILE_NAME),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Handler: any method other than POST on a POST-only endpoint
pub async fn handle_method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Panic hook for `CatchPanicLayer`: log the payload, answer a generic 500
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ServerError::Internal(detail).into_response()
}

/// Load a report request into an assessment and assemble its scorecard
pub fn build_scorecard(
    calculator: &ComplianceCalculator,
    req: ReportRequest,
    generated_on: Option<NaiveDate>,
) -> Result<Scorecard, ServerError> {
    let square_footage = req
        .square_footage
        .ok_or_else(|| ServerError::InvalidRequest(INVALID_INPUT_MESSAGE.to_string()))?;

    let mut assessment = Assessment::new();
    assessment
        .set_square_footage(square_footage)
        .map_err(reject_input)?;
    for (kind, items) in [
        (SystemKind::Current, req.current),
        (SystemKind::Proposed, req.proposed),
    ] {
        for item in items {
            assessment.set_quantity(kind, item.category, item.vent_type, item.quantity);
        }
    }

    scorecard(&assessment, calculator, generated_on)?
        .ok_or_else(|| ServerError::InvalidRequest(INVALID_INPUT_MESSAGE.to_string()))
}

/// Both plans of an assessment with their results; `None` until the
/// square footage is known
pub fn scorecard(
    assessment: &Assessment,
    calculator: &ComplianceCalculator,
    generated_on: Option<NaiveDate>,
) -> Result<Option<Scorecard>, ServerError> {
    let Some(square_footage) = assessment.square_footage() else {
        return Ok(None);
    };

    Ok(Some(Scorecard {
        square_footage,
        current: system_report(assessment, calculator, SystemKind::Current)?,
        proposed: system_report(assessment, calculator, SystemKind::Proposed)?,
        generated_on,
    }))
}

fn system_report(
    assessment: &Assessment,
    calculator: &ComplianceCalculator,
    kind: SystemKind,
) -> Result<SystemReport, ServerError> {
    let result = assessment
        .result(kind, calculator)
        .map_err(reject_input)?
        .ok_or_else(|| ServerError::InvalidRequest(INVALID_INPUT_MESSAGE.to_string()))?;

    Ok(SystemReport {
        system: assessment.system(kind).clone(),
        result,
    })
}

fn to_system(kind: SystemKind, items: Vec<VentilationItem>) -> VentilationSystem {
    VentilationSystem::from_entries(kind, items.into_iter().map(VentEntry::from))
}

fn reject_input(err: ComplianceError) -> ServerError {
    ServerError::InvalidRequest(format!("{} {}", INVALID_INPUT_MESSAGE, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = handle_health().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "ventcheck-server");
    }

    #[test]
    fn test_response_uses_wire_names() {
        let result = ComplianceResult {
            required_nfa: 960.0,
            intake_nfa: 0.0,
            exhaust_nfa: 720.0,
            intake_compliance_pct: 0.0,
            exhaust_compliance_pct: 75.0,
        };
        let json = serde_json::to_value(CalculateResponse::from(result)).unwrap();

        assert_eq!(json["requiredNFA"], 960.0);
        assert_eq!(json["exhaustNFA"], 720.0);
        assert_eq!(json["exhaustCompliance"], 75.0);
        assert_eq!(json["exhaustStatus"], "Fail");
        assert_eq!(json["intakeStatus"], "Fail");
    }

    #[test]
    fn test_item_deserializes_form_shape() {
        let item: VentilationItem = serde_json::from_str(
            r#"{"type":"exhaust","ventType":"Ridge Vent","quantity":40}"#,
        )
        .unwrap();

        assert_eq!(item.category, VentCategory::Exhaust);
        assert_eq!(item.vent_type, "Ridge Vent");
        assert_eq!(item.quantity, 40);
    }

    #[test]
    fn test_build_scorecard_computes_both_plans() {
        let calculator = ComplianceCalculator::default();
        let req: ReportRequest = serde_json::from_str(
            r#"{
                "squareFootage": 1000,
                "current": [{"type":"exhaust","ventType":"Ridge Vent","quantity":40}],
                "proposed": [{"type":"exhaust","ventType":"Ridge Vent","quantity":60}]
            }"#,
        )
        .unwrap();

        let scorecard = build_scorecard(&calculator, req, None).unwrap();

        assert_eq!(scorecard.current.result.exhaust_nfa, 720.0);
        assert_eq!(scorecard.proposed.result.exhaust_nfa, 1080.0);
        assert_eq!(scorecard.proposed.system.kind(), SystemKind::Proposed);
    }

    #[test]
    fn test_build_scorecard_requires_square_footage() {
        let calculator = ComplianceCalculator::default();
        let req: ReportRequest = serde_json::from_str(r#"{"current":[]}"#).unwrap();

        assert!(matches!(
            build_scorecard(&calculator, req, None),
            Err(ServerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_scorecard_waits_for_square_footage() {
        let calculator = ComplianceCalculator::default();
        let mut assessment = Assessment::new();
        assessment.set_quantity(SystemKind::Current, VentCategory::Exhaust, "Ridge Vent", 40);

        assert!(scorecard(&assessment, &calculator, None).unwrap().is_none());

        assessment.set_square_footage(1000.0).unwrap();
        let card = scorecard(&assessment, &calculator, None).unwrap().unwrap();
        assert_eq!(card.current.result.exhaust_nfa, 720.0);
        assert!(card.proposed.system.is_empty());
    }

    #[test]
    fn test_build_scorecard_duplicate_lines_last_wins() {
        let calculator = ComplianceCalculator::default();
        let req: ReportRequest = serde_json::from_str(
            r#"{
                "squareFootage": 1000,
                "current": [
                    {"type":"exhaust","ventType":"Ridge Vent","quantity":10},
                    {"type":"exhaust","ventType":"Ridge Vent","quantity":40}
                ]
            }"#,
        )
        .unwrap();

        let card = build_scorecard(&calculator, req, None).unwrap();
        assert_eq!(card.current.system.len(), 1);
        assert_eq!(card.current.result.exhaust_nfa, 720.0);
    }

    #[test]
    fn test_panic_payload_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
