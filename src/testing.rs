// ============================================================================
// TESTING - Dobles de prueba del backend
// ============================================================================

use std::cell::{Cell, RefCell};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use crate::errors::{AdvisorError, AdvisorResult};
use crate::models::{
    LoginResponse, PredictionRequest, ScanResult, SelectedFile, SignupRequest, SignupResponse, Verdict,
};
use crate::services::Gateway;

/// Gateway falso con respuestas configurables y registro de llamadas
pub struct FakeGateway {
    pub login: RefCell<AdvisorResult<LoginResponse>>,
    pub signup: RefCell<AdvisorResult<SignupResponse>>,
    pub scan: RefCell<AdvisorResult<ScanResult>>,
    pub prediction: RefCell<AdvisorResult<Verdict>>,
    pub history: RefCell<AdvisorResult<Value>>,
    /// Cede el turno antes de responder, para simular un request en vuelo
    pub yield_before_reply: Cell<bool>,
    pub calls: RefCell<Vec<&'static str>>,
    pub scanned_files: RefCell<Vec<String>>,
    pub predictions: RefCell<Vec<PredictionRequest>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            login: RefCell::new(Ok(LoginResponse {
                access_token: "jwt-token".to_string(),
                token_type: Some("bearer".to_string()),
            })),
            signup: RefCell::new(Ok(SignupResponse {
                message: Some("User created successfully".to_string()),
                id: Some("u1".to_string()),
            })),
            scan: RefCell::new(Ok(scan_result(82.5))),
            prediction: RefCell::new(Ok(Verdict {
                prediction: "Safe to Bunk 😎".to_string(),
                confidence: "B.Tech Logic Applied".to_string(),
                message: "Clear skies. Enjoy your freedom.".to_string(),
            })),
            history: RefCell::new(Ok(json!([]))),
            yield_before_reply: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            scanned_files: RefCell::new(Vec::new()),
            predictions: RefCell::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == operation).count()
    }

    pub fn call_log(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    async fn reply<T: Clone>(&self, operation: &'static str, slot: &RefCell<AdvisorResult<T>>) -> AdvisorResult<T> {
        self.calls.borrow_mut().push(operation);
        if self.yield_before_reply.get() {
            tokio::task::yield_now().await;
        }
        slot.borrow().clone()
    }
}

impl Gateway for FakeGateway {
    async fn authenticate(&self, _identifier: &str, _secret: &str) -> AdvisorResult<LoginResponse> {
        self.reply("authenticate", &self.login).await
    }

    async fn register(&self, _request: &SignupRequest) -> AdvisorResult<SignupResponse> {
        self.reply("register", &self.signup).await
    }

    async fn submit_scan(&self, file: &SelectedFile) -> AdvisorResult<ScanResult> {
        self.scanned_files.borrow_mut().push(file.name.clone());
        self.reply("submit_scan", &self.scan).await
    }

    async fn request_prediction(&self, request: &PredictionRequest) -> AdvisorResult<Verdict> {
        self.predictions.borrow_mut().push(request.clone());
        self.reply("request_prediction", &self.prediction).await
    }

    async fn list_history(&self) -> AdvisorResult<Value> {
        self.reply("list_history", &self.history).await
    }
}

pub fn scan_result(attendance: f64) -> ScanResult {
    serde_json::from_value(json!({
        "extracted_data": {
            "overall_attendance": attendance,
            "subject_attendances": []
        },
        "raw_text": "Overall Attendance"
    }))
    .expect("valid scan fixture")
}

pub fn screenshot(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

pub fn prediction_unavailable() -> AdvisorError {
    AdvisorError::PredictionUnavailable("HTTP 503: model disabled".to_string())
}

pub fn t(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 13, hour, 0, 0).unwrap()
}

/// Logs en el orden del backend (mas reciente primero)
pub fn history_json(entries: &[(DateTime<Utc>, f64)]) -> Value {
    Value::Array(
        entries
            .iter()
            .enumerate()
            .map(|(i, (timestamp, attendance))| {
                json!({
                    "_id": format!("log-{}", i),
                    "username": "student@college.edu",
                    "filename": format!("shot-{}.png", i),
                    "overall_attendance": attendance,
                    "prediction": "Safe to Bunk 😎",
                    "timestamp": timestamp.to_rfc3339(),
                })
            })
            .collect(),
    )
}
