use serde::{Deserialize, Serialize};

/// Texto mostrado mientras no hay veredicto
pub const PENDING_LABEL: &str = "Pending...";
/// Mensaje por defecto si el veredicto viene sin mensaje
pub const DEFAULT_MESSAGE: &str = "Data extracted successfully.";

pub const LITE_MODE_PREDICTION: &str = "Attendance Logged";
pub const LITE_MODE_CONFIDENCE: &str = "100%";
pub const LITE_MODE_MESSAGE: &str = "Prediction engine is offline in Lite Mode. Only OCR is active.";

/// Veredicto devuelto por `POST /predict/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Verdict {
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub message: String,
}

impl Verdict {
    /// Veredicto sintetizado cuando el motor de prediccion no responde
    pub fn degraded() -> Self {
        Self {
            prediction: LITE_MODE_PREDICTION.to_string(),
            confidence: LITE_MODE_CONFIDENCE.to_string(),
            message: LITE_MODE_MESSAGE.to_string(),
        }
    }

    pub fn tone(&self) -> VerdictTone {
        VerdictTone::classify(&self.prediction)
    }

    /// Titulo de la tarjeta de veredicto
    pub fn headline(&self) -> &str {
        if self.prediction.is_empty() {
            PENDING_LABEL
        } else {
            &self.prediction
        }
    }

    pub fn display_message(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_MESSAGE
        } else {
            &self.message
        }
    }
}

/// Tono visual del veredicto (verde / rojo)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VerdictTone {
    Safe,
    Risk,
}

impl VerdictTone {
    /// Regla de compatibilidad: cualquier texto con "Safe" o "Logged" es positivo
    pub fn classify(prediction: &str) -> Self {
        if prediction.contains("Safe") || prediction.contains("Logged") {
            VerdictTone::Safe
        } else {
            VerdictTone::Risk
        }
    }

    pub fn is_safe(self) -> bool {
        self == VerdictTone::Safe
    }

    pub fn css_class(self) -> &'static str {
        match self {
            VerdictTone::Safe => "tone-safe",
            VerdictTone::Risk => "tone-risk",
        }
    }
}

/// Resultado de resolver una prediccion: completo o modo Lite
#[derive(Clone, PartialEq, Debug)]
pub enum PredictionOutcome {
    Full(Verdict),
    Degraded(Verdict),
}

impl PredictionOutcome {
    pub fn verdict(&self) -> &Verdict {
        match self {
            PredictionOutcome::Full(verdict) | PredictionOutcome::Degraded(verdict) => verdict,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, PredictionOutcome::Degraded(_))
    }

    /// Mensaje del toast de exito
    pub fn feedback_message(&self) -> &'static str {
        match self {
            PredictionOutcome::Full(_) => "Fate Calculated",
            PredictionOutcome::Degraded(_) => "Data Recorded (Lite Mode)",
        }
    }
}
