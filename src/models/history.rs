use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Etiqueta cuando un log no trae prediccion
pub const UNLABELLED_PREDICTION: &str = "Logged";

/// Un registro de `GET /history/my-logs`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct HistoryLog {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub overall_attendance: f64,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub filename: String,
}

impl HistoryLog {
    pub fn prediction_label(&self) -> &str {
        match self.prediction.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => UNLABELLED_PREDICTION,
        }
    }
}

/// Punto del grafico de asistencia
#[derive(Clone, PartialEq, Debug)]
pub struct ChartPoint {
    pub label: String,
    pub attendance: f64,
}

/// Tarjeta de la grilla de historial
#[derive(Clone, PartialEq, Debug)]
pub struct HistoryCard {
    pub key: String,
    pub date_label: String,
    pub prediction: String,
    pub safe: bool,
    pub attendance: f64,
    pub filename: String,
}

/// El backend guarda `datetime.utcnow()` sin zona: se acepta RFC 3339 o ISO naive (UTC)
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_mongo_log_with_naive_timestamp() {
        let json = r#"{
            "_id": "65f1c2",
            "username": "student@college.edu",
            "filename": "portal.png",
            "overall_attendance": 74.5,
            "prediction": "Risky... 🎲",
            "timestamp": "2024-03-13T09:15:42.120000"
        }"#;
        let log: HistoryLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id.as_deref(), Some("65f1c2"));
        assert_eq!(log.timestamp, Utc.with_ymd_and_hms(2024, 3, 13, 9, 15, 42).unwrap() + chrono::Duration::milliseconds(120));
        assert_eq!(log.prediction_label(), "Risky... 🎲");
    }

    #[test]
    fn accepts_rfc3339_and_plain_id() {
        let json = r#"{"id": "a1", "filename": "x.jpg", "overall_attendance": 60,
                       "timestamp": "2024-03-13T09:15:00+05:30"}"#;
        let log: HistoryLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id.as_deref(), Some("a1"));
        assert_eq!(log.timestamp, Utc.with_ymd_and_hms(2024, 3, 13, 3, 45, 0).unwrap());
        assert_eq!(log.prediction_label(), UNLABELLED_PREDICTION);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let json = r#"{"filename": "x", "overall_attendance": 60, "timestamp": "yesterday"}"#;
        assert!(serde_json::from_str::<HistoryLog>(json).is_err());
    }
}
