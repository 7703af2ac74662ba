// ============================================================================
// HISTORY VIEWMODEL - Historial de scans y proyeccion al grafico
// ============================================================================
// Un fallo del historial nunca bloquea el flujo: se registra y se muestra
// una lista vacia.
// ============================================================================

use chrono::FixedOffset;
use serde_json::Value;
use crate::models::{ChartPoint, HistoryCard, HistoryLog, VerdictTone};
use crate::services::Gateway;
use crate::state::{DashboardState, ReactiveState, WorkflowPhase};

/// Minimo de puntos para dibujar el grafico
pub const MIN_CHART_POINTS: usize = 2;

/// Dominio fijo del eje Y (porcentaje)
pub const CHART_Y_DOMAIN: (f64, f64) = (0.0, 100.0);

const CHART_LABEL_FORMAT: &str = "%b %-d, %-I:%M %p";
const CARD_DATE_FORMAT: &str = "%-m/%-d/%Y";

pub struct HistoryViewModel<'a, G: Gateway> {
    gateway: &'a G,
    state: &'a ReactiveState<DashboardState>,
}

impl<'a, G: Gateway> HistoryViewModel<'a, G> {
    pub fn new(gateway: &'a G, state: &'a ReactiveState<DashboardState>) -> Self {
        Self { gateway, state }
    }

    /// Reemplaza el historial completo con la respuesta del backend
    ///
    /// Sin sesion no hay request: `list_history` necesita el token.
    pub async fn refresh(&self) -> usize {
        if self.is_terminated() {
            log::info!("🔒 [HISTORY] Sesion terminada, no se refresca");
            return 0;
        }
        let logs = match self.gateway.list_history().await {
            Ok(payload) => parse_history(payload),
            Err(e) => {
                log::warn!("⚠️ [HISTORY] No se pudo cargar el historial: {}", e);
                Vec::new()
            }
        };
        if self.is_terminated() {
            log::warn!("🔒 [HISTORY] Respuesta descartada, sesion terminada");
            return 0;
        }
        let count = logs.len();
        log::info!("📋 [HISTORY] {} registros", count);
        self.state.update(|state| state.history = logs);
        count
    }

    fn is_terminated(&self) -> bool {
        self.state.with(|state| state.phase == WorkflowPhase::Unauthenticated)
    }
}

/// Respuesta cruda -> logs
///
/// Algo que no sea una lista da vacio; dentro de la lista solo se descartan
/// los registros que no se pueden leer.
pub fn parse_history(payload: Value) -> Vec<HistoryLog> {
    let Value::Array(entries) = payload else {
        log::warn!("⚠️ [HISTORY] Respuesta no es una lista, se ignora");
        return Vec::new();
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<HistoryLog>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("⚠️ [HISTORY] Registro {} descartado: {}", index, e);
                None
            }
        })
        .collect()
}

/// Logs (mas reciente primero) -> puntos en orden cronologico
pub fn project(logs: &[HistoryLog], offset: FixedOffset) -> Vec<ChartPoint> {
    logs.iter()
        .rev()
        .map(|log| ChartPoint {
            label: log.timestamp.with_timezone(&offset).format(CHART_LABEL_FORMAT).to_string(),
            attendance: log.overall_attendance,
        })
        .collect()
}

/// Puntos del grafico, o `None` si no hay suficientes para dibujarlo
pub fn chart(logs: &[HistoryLog], offset: FixedOffset) -> Option<Vec<ChartPoint>> {
    if logs.len() < MIN_CHART_POINTS {
        return None;
    }
    Some(project(logs, offset))
}

/// Coordenadas en pixeles para un area de `width` x `height` con margen `pad`
///
/// El eje Y va de 0 a 100 con el 100 arriba; valores fuera se recortan.
pub fn plot(points: &[ChartPoint], width: f64, height: f64, pad: f64) -> Vec<(f64, f64)> {
    let (low, high) = CHART_Y_DOMAIN;
    let inner_w = (width - 2.0 * pad).max(0.0);
    let inner_h = (height - 2.0 * pad).max(0.0);
    let step = if points.len() > 1 { inner_w / (points.len() - 1) as f64 } else { 0.0 };
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let ratio = (point.attendance.clamp(low, high) - low) / (high - low);
            (pad + step * i as f64, pad + inner_h * (1.0 - ratio))
        })
        .collect()
}

/// Tarjetas de la grilla, en el orden del backend
pub fn cards(logs: &[HistoryLog], offset: FixedOffset) -> Vec<HistoryCard> {
    logs.iter()
        .enumerate()
        .map(|(index, log)| {
            let prediction = log.prediction_label().to_string();
            HistoryCard {
                key: log.id.clone().unwrap_or_else(|| format!("log-{}", index)),
                date_label: log.timestamp.with_timezone(&offset).format(CARD_DATE_FORMAT).to_string(),
                safe: VerdictTone::classify(&prediction).is_safe(),
                prediction,
                attendance: log.overall_attendance,
                filename: log.filename.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::errors::AdvisorError;
    use crate::testing::{history_json, t, FakeGateway};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn logs(entries: &[(chrono::DateTime<chrono::Utc>, f64)]) -> Vec<HistoryLog> {
        parse_history(history_json(entries))
    }

    #[test]
    fn projection_reverses_into_chronological_order() {
        let history = logs(&[(t(15), 80.0), (t(12), 70.0), (t(9), 60.0)]);
        let points = project(&history, utc());
        let values: Vec<f64> = points.iter().map(|p| p.attendance).collect();
        assert_eq!(values, vec![60.0, 70.0, 80.0]);
        assert_eq!(points[0].label, "Mar 13, 9:00 AM");
        assert_eq!(points[2].label, "Mar 13, 3:00 PM");
    }

    #[test]
    fn labels_use_the_viewer_offset() {
        let history = logs(&[(t(9), 60.0)]);
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(project(&history, ist)[0].label, "Mar 13, 2:30 PM");
    }

    #[test]
    fn chart_needs_at_least_two_points() {
        assert!(chart(&logs(&[]), utc()).is_none());
        assert!(chart(&logs(&[(t(9), 60.0)]), utc()).is_none());
        assert_eq!(chart(&logs(&[(t(10), 65.0), (t(9), 60.0)]), utc()).map(|c| c.len()), Some(2));
    }

    #[test]
    fn plot_maps_percentages_onto_the_fixed_domain() {
        let points = project(&logs(&[(t(11), 100.0), (t(10), 50.0), (t(9), 0.0)]), utc());
        let coords = plot(&points, 220.0, 120.0, 10.0);
        assert_eq!(coords, vec![(10.0, 110.0), (110.0, 60.0), (210.0, 10.0)]);
    }

    #[test]
    fn malformed_payloads_become_empty() {
        assert!(parse_history(json!({"detail": "Not authenticated"})).is_empty());
        assert!(parse_history(json!(null)).is_empty());
        assert!(parse_history(json!([{"overall_attendance": "n/a"}])).is_empty());
    }

    #[test]
    fn unreadable_entries_are_dropped_individually() {
        let history = parse_history(json!([
            {"_id": "a", "filename": "x.png", "overall_attendance": 81.0, "timestamp": "2024-03-13T11:00:00"},
            {"_id": "b", "filename": "y.png", "overall_attendance": 77.0, "timestamp": "yesterday-ish"},
            {"_id": "c", "filename": "z.png", "overall_attendance": 70.0, "timestamp": "2024-03-12T09:00:00Z"}
        ]));
        let ids: Vec<_> = history.iter().filter_map(|log| log.id.as_deref()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(chart(&history, utc()).map(|points| points.len()), Some(2));
    }

    #[test]
    fn cards_default_missing_prediction_to_logged() {
        let history = parse_history(json!([
            {"_id": "a", "filename": "x.png", "overall_attendance": 58.0,
             "prediction": "DO NOT BUNK ☠️", "timestamp": "2024-03-13T09:00:00"},
            {"filename": "y.png", "overall_attendance": 90.0, "timestamp": "2024-03-12T09:00:00"}
        ]));
        let grid = cards(&history, utc());
        assert_eq!(grid[0].key, "a");
        assert!(!grid[0].safe);
        assert_eq!(grid[0].date_label, "3/13/2024");
        assert_eq!(grid[1].key, "log-1");
        assert_eq!(grid[1].prediction, "Logged");
        assert!(grid[1].safe);
    }

    #[tokio::test]
    async fn refresh_failure_substitutes_empty_history() {
        let gateway = FakeGateway::default();
        let state = ReactiveState::new(DashboardState::new());
        *gateway.history.borrow_mut() = Ok(history_json(&[(t(10), 65.0), (t(9), 60.0)]));
        let aggregator = HistoryViewModel::new(&gateway, &state);
        assert_eq!(aggregator.refresh().await, 2);

        *gateway.history.borrow_mut() = Err(AdvisorError::History("HTTP 500".into()));
        assert_eq!(aggregator.refresh().await, 0);
        assert!(state.snapshot().history.is_empty());
    }

    #[tokio::test]
    async fn non_list_response_renders_empty_history() {
        let gateway = FakeGateway::default();
        *gateway.history.borrow_mut() = Ok(json!({"logs": "oops"}));
        let state = ReactiveState::new(DashboardState::new());
        assert_eq!(HistoryViewModel::new(&gateway, &state).refresh().await, 0);
        assert!(chart(&state.snapshot().history, utc()).is_none());
    }

    #[tokio::test]
    async fn no_history_request_after_logout() {
        let gateway = FakeGateway::default();
        *gateway.history.borrow_mut() = Ok(history_json(&[(t(10), 65.0), (t(9), 60.0)]));
        let state = ReactiveState::new(DashboardState::new());
        state.update(|s| s.phase = WorkflowPhase::Unauthenticated);

        assert_eq!(HistoryViewModel::new(&gateway, &state).refresh().await, 0);
        assert_eq!(gateway.count("list_history"), 0);
        assert!(state.snapshot().history.is_empty());
    }
}
