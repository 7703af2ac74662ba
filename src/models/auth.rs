use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BRANCHES: [&str; 4] = ["AIML", "CSE", "IT", "ECE"];
pub const SIGNUP_FALLBACK_ERROR: &str = "Signup Failed. Try again.";

/// Respuesta de `POST /auth/login` (OAuth2 password flow)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Cuerpo de `POST /auth/signup`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    /// Email del estudiante
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub roll_number: String,
    pub branch: String,
}

impl Default for SignupRequest {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            full_name: String::new(),
            roll_number: String::new(),
            branch: BRANCHES[0].to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Mensaje de error de signup a partir del cuerpo de error del backend
///
/// - `detail` lista (422): `"<campo>: <msg>"` del primer elemento
/// - `detail` texto: se muestra tal cual
pub fn signup_error_message(body: &str) -> String {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return SIGNUP_FALLBACK_ERROR.to_string(),
    };
    match parsed.get("detail") {
        Some(Value::Array(items)) => items
            .first()
            .and_then(|first| {
                let field = first.get("loc")?.get(1).map(value_text).unwrap_or_default();
                let msg = first.get("msg").map(value_text).unwrap_or_default();
                Some(format!("{}: {}", field, msg))
            })
            .unwrap_or_else(|| SIGNUP_FALLBACK_ERROR.to_string()),
        Some(Value::String(detail)) => detail.clone(),
        _ => SIGNUP_FALLBACK_ERROR.to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_array_uses_first_field_and_message() {
        let body = r#"{"detail": [
            {"loc": ["body", "username"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "roll_number"], "msg": "field required"}
        ]}"#;
        assert_eq!(signup_error_message(body), "username: value is not a valid email address");
    }

    #[test]
    fn string_detail_is_shown_verbatim() {
        let body = r#"{"detail": "Email a@b.edu is already registered."}"#;
        assert_eq!(signup_error_message(body), "Email a@b.edu is already registered.");
    }

    #[test]
    fn anything_else_is_the_generic_copy() {
        assert_eq!(signup_error_message("<html>502</html>"), SIGNUP_FALLBACK_ERROR);
        assert_eq!(signup_error_message(r#"{"error": "x"}"#), SIGNUP_FALLBACK_ERROR);
        assert_eq!(signup_error_message(r#"{"detail": []}"#), SIGNUP_FALLBACK_ERROR);
    }

    #[test]
    fn signup_defaults_to_aiml_branch() {
        assert_eq!(SignupRequest::default().branch, "AIML");
    }
}
