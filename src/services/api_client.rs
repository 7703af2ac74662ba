// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (gloo-net)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Cada request tiene un timeout (AbortController + gloo_timers) y no se
// reintenta.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData, UrlSearchParams};
use crate::config::CONFIG;
use crate::errors::{AdvisorError, AdvisorResult};
use crate::models::{
    signup_error_message, LoginResponse, PredictionRequest, ScanResult, SelectedFile, SignupRequest,
    SignupResponse, Verdict,
};
use crate::services::gateway::Gateway;
use crate::state::Session;

/// Cliente API - SOLO comunicación HTTP
#[derive(Clone)]
pub struct ApiClient {
    token: Option<String>,
    timeout_ms: u32,
}

impl ApiClient {
    /// Cliente anónimo (login / signup)
    pub fn new() -> Self {
        Self {
            token: None,
            timeout_ms: CONFIG.request_timeout_seconds.saturating_mul(1000),
        }
    }

    /// Cliente con el bearer token de la sesión
    pub fn with_session(session: &Session) -> Self {
        Self {
            token: Some(session.token().to_string()),
            ..Self::new()
        }
    }

    fn url(path: &str) -> String {
        CONFIG.api_url(path)
    }

    /// Agrega Authorization y arma el timeout del request
    fn prepare(&self, builder: RequestBuilder) -> (RequestBuilder, Option<Timeout>) {
        let builder = match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        };
        match AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                let timeout = Timeout::new(self.timeout_ms, move || {
                    log::warn!("⏱️ [API] Request abortado por timeout");
                    controller.abort();
                });
                (builder.abort_signal(Some(&signal)), Some(timeout))
            }
            Err(e) => {
                log::warn!("⚠️ [API] AbortController no disponible: {:?}", e);
                (builder, None)
            }
        }
    }

    fn require_token(&self) -> Result<(), String> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err("missing bearer token".to_string())
        }
    }

    async fn error_text(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        format!("HTTP {}: {}", status, body)
    }

    fn scan_form(file: &SelectedFile) -> Result<FormData, JsValue> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(file.mime());
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let form = FormData::new()?;
        form.append_with_blob_and_filename("file", &blob, &file.name)?;
        Ok(form)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for ApiClient {
    async fn authenticate(&self, identifier: &str, secret: &str) -> AdvisorResult<LoginResponse> {
        log::info!("🔐 [AUTH] Login para: {}", identifier);
        let result: Result<LoginResponse, String> = async {
            let params = UrlSearchParams::new().map_err(|e| format!("Form error: {:?}", e))?;
            params.append("username", identifier);
            params.append("password", secret);

            let (builder, _timeout) = self.prepare(Request::post(&Self::url("/auth/login")));
            let response = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(params)
                .map_err(|e| format!("Request build error: {}", e))?
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;
            if !response.ok() {
                return Err(Self::error_text(response).await);
            }
            response
                .json::<LoginResponse>()
                .await
                .map_err(|e| format!("Parse error: {}", e))
        }
        .await;

        result.map_err(|e| {
            log::error!("❌ [AUTH] Login fallido: {}", e);
            AdvisorError::Credential
        })
    }

    async fn register(&self, request: &SignupRequest) -> AdvisorResult<SignupResponse> {
        log::info!("📝 [AUTH] Registro para: {}", request.username);
        let (builder, _timeout) = self.prepare(Request::post(&Self::url("/auth/signup")));
        let response = builder
            .json(request)
            .map_err(|e| AdvisorError::Registration(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ [AUTH] Error de red en signup: {}", e);
                AdvisorError::Registration(crate::models::SIGNUP_FALLBACK_ERROR.to_string())
            })?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ [AUTH] Signup rechazado: {}", body);
            return Err(AdvisorError::Registration(signup_error_message(&body)));
        }

        response
            .json::<SignupResponse>()
            .await
            .map_err(|e| AdvisorError::Registration(format!("Parse error: {}", e)))
    }

    async fn submit_scan(&self, file: &SelectedFile) -> AdvisorResult<ScanResult> {
        log::info!("📤 [SCAN] Subiendo {} ({} bytes)", file.name, file.bytes.len());
        let form = Self::scan_form(file).map_err(|e| AdvisorError::Scan(format!("Form error: {:?}", e)))?;

        let (builder, _timeout) = self.prepare(Request::post(&Self::url("/ocr/scan")));
        let response = builder
            .body(form)
            .map_err(|e| AdvisorError::Scan(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| AdvisorError::Scan(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(AdvisorError::Scan(Self::error_text(response).await));
        }

        response
            .json::<ScanResult>()
            .await
            .map_err(|e| AdvisorError::Scan(format!("Parse error: {}", e)))
    }

    async fn request_prediction(&self, request: &PredictionRequest) -> AdvisorResult<Verdict> {
        self.require_token().map_err(AdvisorError::PredictionUnavailable)?;

        let (builder, _timeout) = self.prepare(Request::post(&Self::url("/predict/")));
        let response = builder
            .json(request)
            .map_err(|e| AdvisorError::PredictionUnavailable(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| AdvisorError::PredictionUnavailable(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(AdvisorError::PredictionUnavailable(Self::error_text(response).await));
        }

        response
            .json::<Verdict>()
            .await
            .map_err(|e| AdvisorError::PredictionUnavailable(format!("Parse error: {}", e)))
    }

    async fn list_history(&self) -> AdvisorResult<Value> {
        self.require_token().map_err(AdvisorError::History)?;

        let (builder, _timeout) = self.prepare(Request::get(&Self::url("/history/my-logs")));
        let response = builder
            .send()
            .await
            .map_err(|e| AdvisorError::History(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(AdvisorError::History(Self::error_text(response).await));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AdvisorError::History(format!("Parse error: {}", e)))
    }
}
