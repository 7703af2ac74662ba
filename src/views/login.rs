// ============================================================================
// LOGIN VIEW
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use chrono::Utc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{ElementBuilder, append_child, navigate, on_submit};
use crate::errors::AdvisorError;
use crate::services::{ApiClient, LocalTokenStore};
use crate::state::{ReactiveState, Route, Toast};
use crate::viewmodels::auth_viewmodel::{AuthViewModel, LOGIN_SUCCESS_MESSAGE};
use crate::views::forms::{create_form_group, create_route_link, create_submit_button, set_busy};

const SUBMIT_TEXT: &str = "Sign In";

/// Renderizar vista de login
pub fn render_login(notices: &ReactiveState<Vec<Toast>>) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");

    // Estado local del formulario (en closures)
    let email = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("div")?.class("auth-logo").text("✨").build())?
        .child(ElementBuilder::new("h1")?.text("Welcome Back!").build())?
        .child(ElementBuilder::new("p")?.class("auth-subtitle").text("Sign in to check your attendance status").build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .build();

    let email_group = create_form_group("email", "Email", "email", "student@college.edu", email.clone())?;
    let password_group = create_form_group("password", "Password", "password", "••••••••", password.clone())?;
    let submit_btn = create_submit_button("btn-primary", SUBMIT_TEXT)?;

    {
        let notices = notices.clone();
        let button = submit_btn.clone();
        on_submit(&form, move || {
            if *loading.borrow() {
                return;
            }
            *loading.borrow_mut() = true;
            set_busy(&button, true, "Signing in...");

            let email_val = email.borrow().clone();
            let password_val = password.borrow().clone();
            let notices = notices.clone();
            let loading = loading.clone();
            let button = button.clone();

            spawn_local(async move {
                let gateway = ApiClient::new();
                let store = LocalTokenStore;
                let auth = AuthViewModel::new(&gateway, &store, CONFIG.token_ttl());
                match auth.login(&email_val, &password_val, Utc::now()).await {
                    Ok(_) => {
                        log::info!("✅ [LOGIN] Login exitoso");
                        notices.update(|list| list.push(Toast::success(LOGIN_SUCCESS_MESSAGE)));
                        Timeout::new(CONFIG.ui_config.login_redirect_delay_ms, || {
                            navigate(Route::Dashboard);
                        })
                        .forget();
                    }
                    Err(e) => {
                        log::error!("❌ [LOGIN] Error en login: {}", e);
                        notices.update(|list| list.push(Toast::error(AdvisorError::Credential.user_message())));
                        *loading.borrow_mut() = false;
                        set_busy(&button, false, SUBMIT_TEXT);
                    }
                }
            });
        })?;
    }

    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit_btn)?;

    append_child(&card, &form)?;
    append_child(&card, &create_route_link("Don't have an account? ", "Create one", Route::Signup.hash())?)?;
    append_child(&screen, &card)?;
    Ok(screen)
}
