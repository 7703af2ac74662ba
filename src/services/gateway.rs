// ============================================================================
// GATEWAY - Frontera tipada con el backend (OCR, prediccion, historial, auth)
// ============================================================================
// Cada operacion es un unico request/response, sin reintentos.
// ============================================================================

use serde_json::Value;
use crate::errors::AdvisorResult;
use crate::models::{LoginResponse, PredictionRequest, ScanResult, SelectedFile, SignupRequest, SignupResponse, Verdict};

/// Operaciones remotas que consume el flujo
///
/// Errores por operacion:
/// - `authenticate` -> `AdvisorError::Credential`
/// - `register` -> `AdvisorError::Registration`
/// - `submit_scan` -> `AdvisorError::Scan`
/// - `request_prediction` -> `AdvisorError::PredictionUnavailable`
/// - `list_history` -> `AdvisorError::History`
///
/// `list_history` devuelve el JSON crudo: el agregador decide que hacer con
/// una respuesta que no es lista.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn authenticate(&self, identifier: &str, secret: &str) -> AdvisorResult<LoginResponse>;

    async fn register(&self, request: &SignupRequest) -> AdvisorResult<SignupResponse>;

    async fn submit_scan(&self, file: &SelectedFile) -> AdvisorResult<ScanResult>;

    async fn request_prediction(&self, request: &PredictionRequest) -> AdvisorResult<Verdict>;

    async fn list_history(&self) -> AdvisorResult<Value>;
}
