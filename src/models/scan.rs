use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::errors::{AdvisorError, AdvisorResult};
use crate::models::verdict::Verdict;

/// Captura seleccionada por el usuario (nombre + bytes de la imagen)
#[derive(Clone, PartialEq, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Tipo MIME a enviar; el backend solo acepta JPEG y PNG
    pub fn mime(&self) -> &str {
        if self.content_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.content_type
        }
    }
}

/// Datos extraidos de la captura
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ExtractedData {
    pub overall_attendance: f64,
    #[serde(default)]
    pub subject_attendances: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resultado de `POST /ocr/scan`, con el veredicto mezclado despues
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ScanResult {
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<Verdict>,
}

impl ScanResult {
    pub fn overall_attendance(&self) -> f64 {
        self.extracted_data.overall_attendance
    }

    /// Rechaza lecturas fuera de [0, 100]; no se recortan aqui
    pub fn validate(self) -> AdvisorResult<Self> {
        let value = self.extracted_data.overall_attendance;
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(self)
        } else {
            Err(AdvisorError::InvalidAttendance(value))
        }
    }

    /// Mezcla aditiva: solo toca `ai_analysis`
    pub fn attach_verdict(&mut self, verdict: Verdict) {
        self.ai_analysis = Some(verdict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_scan_payload_and_keeps_unknown_fields() {
        let json = r#"{
            "extracted_data": {
                "overall_attendance": 82.5,
                "subject_attendances": [{"name": "DBMS", "percentage": 71.0, "held": 30}],
                "semester": "V"
            },
            "raw_text": "Overall 82.5%"
        }"#;
        let scan: ScanResult = serde_json::from_str(json).unwrap();
        assert_eq!(scan.overall_attendance(), 82.5);
        assert_eq!(scan.extracted_data.subject_attendances[0]["name"], "DBMS");
        assert_eq!(scan.extracted_data.subject_attendances[0]["held"], 30);
        assert_eq!(scan.extracted_data.extra["semester"], "V");
        assert!(scan.ai_analysis.is_none());
    }

    #[test]
    fn out_of_range_attendance_is_rejected_not_clamped() {
        let scan: ScanResult =
            serde_json::from_str(r#"{"extracted_data": {"overall_attendance": 104.0}}"#).unwrap();
        assert_eq!(scan.validate(), Err(AdvisorError::InvalidAttendance(104.0)));

        let scan: ScanResult =
            serde_json::from_str(r#"{"extracted_data": {"overall_attendance": 100.0}}"#).unwrap();
        assert!(scan.validate().is_ok());
    }

    #[test]
    fn attaching_a_verdict_leaves_extracted_data_untouched() {
        let mut scan: ScanResult =
            serde_json::from_str(r#"{"extracted_data": {"overall_attendance": 67.25}}"#).unwrap();
        let before = scan.extracted_data.clone();
        scan.attach_verdict(Verdict::degraded());
        assert_eq!(scan.extracted_data, before);
        assert_eq!(scan.ai_analysis, Some(Verdict::degraded()));
    }
}
