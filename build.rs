use std::env;
use std::fs;
use std::path::Path;

/// Claves que `AppConfig::from_env` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "BACKEND_URL",
    "API_PREFIX",
    "ENABLE_LOGGING",
    "LOG_LEVEL",
    "REQUEST_TIMEOUT_SECONDS",
    "TOKEN_TTL_HOURS",
    "TOAST_DURATION_MS",
    "LOGIN_REDIRECT_DELAY_MS",
    "SIGNUP_REDIRECT_DELAY_MS",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Valores de .env, sin pisar variables ya definidas en el entorno
    let env_file = Path::new(".env");
    if let Ok(contents) = fs::read_to_string(env_file) {
        println!("cargo:rerun-if-changed=.env");
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                println!("cargo:warning=Linea ignorada en .env: {}", line);
                continue;
            };
            let key = key.trim();
            if !CONFIG_KEYS.contains(&key) {
                println!("cargo:warning=Clave desconocida en .env: {}", key);
                continue;
            }
            if env::var(key).is_err() {
                let value = value.trim().trim_matches('"');
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
