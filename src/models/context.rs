use serde::{Deserialize, Serialize};

/// Valor por defecto de `days_to_exam` cuando el campo no es un entero
pub const FALLBACK_DAYS_TO_EXAM: i64 = 30;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Core,
    Elective,
}

impl SubjectType {
    pub const ALL: [SubjectType; 2] = [SubjectType::Core, SubjectType::Elective];

    pub fn label(self) -> &'static str {
        match self {
            SubjectType::Core => "Core",
            SubjectType::Elective => "Elective",
        }
    }

    /// `is_core_subject` del payload
    pub fn as_flag(self) -> u8 {
        match self {
            SubjectType::Core => 1,
            SubjectType::Elective => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SemesterPhase {
    Start,
    Mid,
    End,
}

impl SemesterPhase {
    pub const ALL: [SemesterPhase; 3] = [SemesterPhase::Start, SemesterPhase::Mid, SemesterPhase::End];

    pub fn label(self) -> &'static str {
        match self {
            SemesterPhase::Start => "Start",
            SemesterPhase::Mid => "Mid",
            SemesterPhase::End => "End",
        }
    }

    pub fn as_code(self) -> u8 {
        match self {
            SemesterPhase::Start => 0,
            SemesterPhase::Mid => 1,
            SemesterPhase::End => 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum FacultyStrictness {
    Chill = 1,
    Mid = 2,
    Strict = 3,
}

impl FacultyStrictness {
    pub const ALL: [FacultyStrictness; 3] =
        [FacultyStrictness::Chill, FacultyStrictness::Mid, FacultyStrictness::Strict];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            FacultyStrictness::Chill => "Chill",
            FacultyStrictness::Mid => "Mid",
            FacultyStrictness::Strict => "Strict",
        }
    }
}

/// Factores de contexto del popup "Context Check"
#[derive(Clone, PartialEq, Debug)]
pub struct Context {
    /// Texto crudo del input numerico
    pub days_to_exam: String,
    pub subject_type: SubjectType,
    pub semester_phase: SemesterPhase,
    pub faculty_strictness: FacultyStrictness,
    pub is_lab: bool,
    pub has_proxy: bool,
    pub bunked_last_class: bool,
    pub is_first_period: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            days_to_exam: "45".to_string(),
            subject_type: SubjectType::Core,
            semester_phase: SemesterPhase::Mid,
            faculty_strictness: FacultyStrictness::Mid,
            is_lab: false,
            has_proxy: false,
            bunked_last_class: false,
            is_first_period: false,
        }
    }
}

impl Context {
    /// Entero inicial del campo, estilo `parseInt`: "12 days" -> 12, "abc" -> 30
    pub fn parsed_days_to_exam(&self) -> i64 {
        parse_leading_int(&self.days_to_exam).unwrap_or(FALLBACK_DAYS_TO_EXAM)
    }
}

/// Cuerpo de `POST /predict/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PredictionRequest {
    pub overall_attendance: f64,
    pub is_core_subject: u8,
    pub days_to_exam: i64,
    pub semester_phase: u8,
    pub faculty_strictness: u8,
    pub is_lab: bool,
    pub has_proxy: bool,
    pub bunked_last_class: bool,
    pub is_first_period: bool,
    pub filename: String,
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_popup_seed() {
        let context = Context::default();
        assert_eq!(context.days_to_exam, "45");
        assert_eq!(context.subject_type, SubjectType::Core);
        assert_eq!(context.semester_phase, SemesterPhase::Mid);
        assert_eq!(context.faculty_strictness.level(), 2);
        assert!(!context.is_lab && !context.has_proxy && !context.bunked_last_class && !context.is_first_period);
    }

    #[test]
    fn days_to_exam_parses_like_parse_int() {
        let with = |raw: &str| Context { days_to_exam: raw.to_string(), ..Context::default() };
        assert_eq!(with("12").parsed_days_to_exam(), 12);
        assert_eq!(with("  7 days").parsed_days_to_exam(), 7);
        assert_eq!(with("3.9").parsed_days_to_exam(), 3);
        assert_eq!(with("-2").parsed_days_to_exam(), -2);
        assert_eq!(with("0").parsed_days_to_exam(), 0);
        assert_eq!(with("").parsed_days_to_exam(), FALLBACK_DAYS_TO_EXAM);
        assert_eq!(with("soon").parsed_days_to_exam(), FALLBACK_DAYS_TO_EXAM);
        assert_eq!(with("-").parsed_days_to_exam(), FALLBACK_DAYS_TO_EXAM);
    }

    #[test]
    fn enum_codes_follow_the_prediction_contract() {
        assert_eq!(SubjectType::Core.as_flag(), 1);
        assert_eq!(SubjectType::Elective.as_flag(), 0);
        assert_eq!(SemesterPhase::Start.as_code(), 0);
        assert_eq!(SemesterPhase::Mid.as_code(), 1);
        assert_eq!(SemesterPhase::End.as_code(), 2);
        assert_eq!(FacultyStrictness::Chill.level(), 1);
        assert_eq!(FacultyStrictness::Strict.level(), 3);
    }
}
