// ============================================================================
// SIGNUP VIEW - Registro de estudiante
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{ElementBuilder, append_child, navigate, on_submit};
use crate::models::{SignupRequest, BRANCHES};
use crate::services::{ApiClient, LocalTokenStore};
use crate::state::{ReactiveState, Route, Toast};
use crate::viewmodels::auth_viewmodel::{AuthViewModel, SIGNUP_SUCCESS_MESSAGE};
use crate::views::forms::{create_form_group, create_route_link, create_select_group, create_submit_button, set_busy, FieldValue};

const SUBMIT_TEXT: &str = "Create Account";

struct SignupFields {
    full_name: FieldValue,
    email: FieldValue,
    roll_number: FieldValue,
    branch: FieldValue,
    password: FieldValue,
}

impl SignupFields {
    fn new() -> Self {
        let field = || Rc::new(RefCell::new(String::new()));
        Self {
            full_name: field(),
            email: field(),
            roll_number: field(),
            branch: Rc::new(RefCell::new(SignupRequest::default().branch)),
            password: field(),
        }
    }

    fn request(&self) -> SignupRequest {
        SignupRequest {
            username: self.email.borrow().clone(),
            password: self.password.borrow().clone(),
            full_name: self.full_name.borrow().clone(),
            roll_number: self.roll_number.borrow().clone(),
            branch: self.branch.borrow().clone(),
        }
    }
}

/// Renderizar vista de registro
pub fn render_signup(notices: &ReactiveState<Vec<Toast>>) -> Result<Element, JsValue> {
    log::info!("🎬 [SIGNUP] render_signup()");

    let fields = Rc::new(SignupFields::new());
    let loading = Rc::new(RefCell::new(false));

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card auth-card-signup")
        .child(ElementBuilder::new("div")?.class("auth-logo").text("✨").build())?
        .child(ElementBuilder::new("h1")?.text("Join the Squad").build())?
        .child(ElementBuilder::new("p")?.class("auth-subtitle").text("Create your student profile").build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .build();

    append_child(&form, &create_form_group("full_name", "Full Name", "text", "Your name", fields.full_name.clone())?)?;
    append_child(&form, &create_form_group("email", "Email", "email", "student@college.edu", fields.email.clone())?)?;
    append_child(&form, &create_form_group("roll_number", "Roll No", "text", "23PA1A...", fields.roll_number.clone())?)?;
    append_child(&form, &create_select_group("branch", "Branch", &BRANCHES, fields.branch.clone())?)?;
    append_child(&form, &create_form_group("password", "Password", "password", "••••••••", fields.password.clone())?)?;

    let submit_btn = create_submit_button("btn-primary", SUBMIT_TEXT)?;
    {
        let notices = notices.clone();
        let button = submit_btn.clone();
        on_submit(&form, move || {
            if *loading.borrow() {
                return;
            }
            *loading.borrow_mut() = true;
            set_busy(&button, true, "Creating...");

            let request = fields.request();
            let notices = notices.clone();
            let loading = loading.clone();
            let button = button.clone();

            spawn_local(async move {
                let gateway = ApiClient::new();
                let store = LocalTokenStore;
                let auth = AuthViewModel::new(&gateway, &store, CONFIG.token_ttl());
                match auth.register(&request).await {
                    Ok(_) => {
                        log::info!("✅ [SIGNUP] Cuenta creada");
                        notices.update(|list| list.push(Toast::success(SIGNUP_SUCCESS_MESSAGE)));
                        Timeout::new(CONFIG.ui_config.signup_redirect_delay_ms, || {
                            navigate(Route::Login);
                        })
                        .forget();
                    }
                    Err(e) => {
                        log::error!("❌ [SIGNUP] Error en registro: {}", e);
                        notices.update(|list| list.push(Toast::error(e.user_message())));
                        *loading.borrow_mut() = false;
                        set_busy(&button, false, SUBMIT_TEXT);
                    }
                }
            });
        })?;
    }
    append_child(&form, &submit_btn)?;

    append_child(&card, &form)?;
    append_child(&card, &create_route_link("Already have an account? ", "Log in", Route::Login.hash())?)?;
    append_child(&screen, &card)?;
    Ok(screen)
}
