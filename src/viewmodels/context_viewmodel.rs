// ============================================================================
// CONTEXT VIEWMODEL - Popup "Context Check" (factores para la prediccion)
// ============================================================================
// El contexto vive solo mientras el popup esta abierto. Cada setter es una
// asignacion independiente; sin popup abierto no hacen nada.
// ============================================================================

use crate::models::{Context, FacultyStrictness, PredictionRequest, SemesterPhase, SubjectType};
use crate::state::{DashboardState, ReactiveState, WorkflowPhase};

pub struct ContextViewModel<'a> {
    state: &'a ReactiveState<DashboardState>,
}

impl<'a> ContextViewModel<'a> {
    pub fn new(state: &'a ReactiveState<DashboardState>) -> Self {
        Self { state }
    }

    /// Abre el popup con los valores por defecto; sin sesion no hace nada
    pub fn open(&self) {
        self.state.update(|state| {
            if state.phase == WorkflowPhase::Unauthenticated {
                return;
            }
            state.context = Some(Context::default());
            state.phase = WorkflowPhase::ContextCollecting;
        });
    }

    /// Cierra sin enviar: el ScanResult queda visible, sin veredicto nuevo
    pub fn cancel(&self) -> bool {
        self.state.update(|state| {
            if state.phase != WorkflowPhase::ContextCollecting {
                return false;
            }
            log::info!("✖️ [CONTEXT] Popup cerrado sin enviar");
            state.context = None;
            state.phase = state.resting_phase();
            true
        })
    }

    fn edit(&self, editor: impl FnOnce(&mut Context)) {
        self.state.update(|state| {
            if state.phase != WorkflowPhase::ContextCollecting {
                return;
            }
            if let Some(context) = state.context.as_mut() {
                editor(context);
            }
        });
    }

    pub fn set_days_to_exam(&self, raw: impl Into<String>) {
        let raw = raw.into();
        self.edit(|context| context.days_to_exam = raw);
    }

    pub fn set_subject_type(&self, subject_type: SubjectType) {
        self.edit(|context| context.subject_type = subject_type);
    }

    pub fn set_semester_phase(&self, phase: SemesterPhase) {
        self.edit(|context| context.semester_phase = phase);
    }

    pub fn set_faculty_strictness(&self, strictness: FacultyStrictness) {
        self.edit(|context| context.faculty_strictness = strictness);
    }

    pub fn set_is_lab(&self, value: bool) {
        self.edit(|context| context.is_lab = value);
    }

    pub fn set_has_proxy(&self, value: bool) {
        self.edit(|context| context.has_proxy = value);
    }

    pub fn set_bunked_last_class(&self, value: bool) {
        self.edit(|context| context.bunked_last_class = value);
    }

    pub fn set_is_first_period(&self, value: bool) {
        self.edit(|context| context.is_first_period = value);
    }

    /// Payload de prediccion a partir del contexto, el scan y el archivo
    pub fn build_request(state: &DashboardState) -> Option<PredictionRequest> {
        let context = state.context.as_ref()?;
        let scan = state.scan_result.as_ref()?;
        let file = state.selected_file.as_ref()?;
        Some(PredictionRequest {
            overall_attendance: scan.overall_attendance(),
            is_core_subject: context.subject_type.as_flag(),
            days_to_exam: context.parsed_days_to_exam(),
            semester_phase: context.semester_phase.as_code(),
            faculty_strictness: context.faculty_strictness.level(),
            is_lab: context.is_lab,
            has_proxy: context.has_proxy,
            bunked_last_class: context.bunked_last_class,
            is_first_period: context.is_first_period,
            filename: file.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scan_result, screenshot};

    fn collecting_state() -> ReactiveState<DashboardState> {
        let state = ReactiveState::new(DashboardState::new());
        state.update(|s| {
            s.selected_file = Some(screenshot("erp.png"));
            s.scan_result = Some(scan_result(72.5));
        });
        ContextViewModel::new(&state).open();
        state
    }

    #[test]
    fn setters_touch_only_their_field() {
        let state = collecting_state();
        let collector = ContextViewModel::new(&state);
        collector.set_is_lab(true);
        collector.set_is_lab(true);

        let context = state.snapshot().context.unwrap();
        assert!(context.is_lab);
        assert_eq!(context, Context { is_lab: true, ..Context::default() });
    }

    #[test]
    fn request_maps_context_fields() {
        let state = collecting_state();
        let collector = ContextViewModel::new(&state);
        collector.set_days_to_exam("4");
        collector.set_subject_type(SubjectType::Elective);
        collector.set_semester_phase(SemesterPhase::End);
        collector.set_faculty_strictness(FacultyStrictness::Strict);
        collector.set_has_proxy(true);
        collector.set_is_first_period(true);

        let request = ContextViewModel::build_request(&state.snapshot()).unwrap();
        assert_eq!(
            request,
            PredictionRequest {
                overall_attendance: 72.5,
                is_core_subject: 0,
                days_to_exam: 4,
                semester_phase: 2,
                faculty_strictness: 3,
                is_lab: false,
                has_proxy: true,
                bunked_last_class: false,
                is_first_period: true,
                filename: "erp.png".to_string(),
            }
        );
    }

    #[test]
    fn unparsable_days_default_to_thirty() {
        let state = collecting_state();
        ContextViewModel::new(&state).set_days_to_exam("next week");
        let request = ContextViewModel::build_request(&state.snapshot()).unwrap();
        assert_eq!(request.days_to_exam, 30);
    }

    #[test]
    fn cancel_keeps_scan_result_and_reopening_resets_defaults() {
        let state = collecting_state();
        let collector = ContextViewModel::new(&state);
        collector.set_bunked_last_class(true);
        assert!(collector.cancel());

        let snapshot = state.snapshot();
        assert!(snapshot.context.is_none());
        assert!(snapshot.scan_result.is_some());
        assert!(snapshot.scan_result.unwrap().ai_analysis.is_none());
        assert_eq!(snapshot.phase, WorkflowPhase::FileSelected);

        collector.set_is_lab(true);
        assert!(state.snapshot().context.is_none());

        collector.open();
        assert_eq!(state.snapshot().context, Some(Context::default()));
    }
}
