// ============================================================================
// DASHBOARD VIEW - Upload, veredicto, grafico e historial
// ============================================================================
// Solo lee snapshots del controller y delega cada accion en el.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, File, HtmlInputElement};
use crate::app::Dashboard;
use crate::dom::{ElementBuilder, append_child, navigate, on_change, on_click};
use crate::models::{HistoryCard, ScanResult, SelectedFile};
use crate::state::DashboardState;
use crate::views::chart::render_chart;
use crate::views::context_modal::render_context_modal;

/// Renderizar dashboard completo
pub fn render_dashboard(dashboard: &Rc<Dashboard>) -> Result<Element, JsValue> {
    let state = dashboard.snapshot();

    let page = ElementBuilder::new("div")?
        .class("dashboard")
        .build();

    append_child(&page, &render_header(dashboard)?)?;

    let grid = ElementBuilder::new("div")?
        .class("dashboard-grid")
        .build();
    append_child(&grid, &render_upload_card(dashboard, &state)?)?;
    append_child(&grid, &render_verdict_card(state.scan_result.as_ref())?)?;
    append_child(&page, &grid)?;

    if let Some(points) = dashboard.chart_points() {
        append_child(&page, &render_chart(&points)?)?;
    }
    append_child(&page, &render_history_grid(&dashboard.history_cards())?)?;

    if let Some(context) = state.context.as_ref() {
        append_child(&page, &render_context_modal(dashboard, context)?)?;
    }
    Ok(page)
}

fn render_header(dashboard: &Rc<Dashboard>) -> Result<Element, JsValue> {
    let brand = ElementBuilder::new("div")?
        .class("brand")
        .child(ElementBuilder::new("h1")?.text("Should I Bunk?").build())?
        .child(ElementBuilder::new("p")?.class("brand-subtitle").text("Context-Aware AI Advisor").build())?
        .build();

    let logout = ElementBuilder::new("button")?
        .class("btn-logout")
        .attr("type", "button")?
        .text("Logout")
        .build();
    {
        let dashboard = dashboard.clone();
        on_click(&logout, move |_| {
            navigate(dashboard.terminate_session());
        })?;
    }

    Ok(ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(brand)?
        .child(logout)?
        .build())
}

fn render_upload_card(dashboard: &Rc<Dashboard>, state: &DashboardState) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("section")?
        .class("card upload-card")
        .child(ElementBuilder::new("h2")?.text("Upload Screenshot").build())?
        .build();

    let file_label = state
        .selected_file
        .as_ref()
        .map(|f| f.name.clone())
        .unwrap_or_else(|| "Click to Upload".to_string());

    let input = ElementBuilder::new("input")?
        .class("file-input")
        .attr("type", "file")?
        .attr("accept", "image/*")?
        .build();
    {
        let dashboard = dashboard.clone();
        on_change(&input, move |e| {
            let file = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                return;
            };
            let dashboard = dashboard.clone();
            spawn_local(async move {
                match read_selected_file(file).await {
                    Ok(selected) => {
                        dashboard.select_file(selected);
                    }
                    Err(e) => log::error!("❌ [SCAN] Error leyendo archivo: {:?}", e),
                }
            });
        })?;
    }

    let dropzone_class = if state.selected_file.is_some() { "dropzone has-file" } else { "dropzone" };
    let dropzone = ElementBuilder::new("label")?
        .class(dropzone_class)
        .child(input)?
        .child(ElementBuilder::new("span")?.class("dropzone-text").text(&file_label).build())?
        .build();

    let scanning = state.is_scanning();
    let button = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "button")?
        .flag("disabled", scanning || state.phase.is_busy())?
        .text(if scanning { "Scanning..." } else { "⚡ Analyze Risk" })
        .build();
    {
        let dashboard = dashboard.clone();
        on_click(&button, move |_| {
            let dashboard = dashboard.clone();
            spawn_local(async move {
                if let Err(e) = dashboard.run_scan().await {
                    log::debug!("🔍 [SCAN] Scan terminado con error: {}", e);
                }
            });
        })?;
    }

    append_child(&card, &dropzone)?;
    append_child(&card, &button)?;
    Ok(card)
}

/// Lee el archivo completo en memoria
async fn read_selected_file(file: File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}

fn render_verdict_card(scan: Option<&ScanResult>) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("section")?
        .class("card verdict-card")
        .child(ElementBuilder::new("h2")?.text("AI Verdict").build())?
        .build();

    let Some(scan) = scan else {
        append_child(&card, &ElementBuilder::new("p")?.class("placeholder").text("Waiting for data...").build())?;
        return Ok(card);
    };

    let reading = ElementBuilder::new("div")?
        .class("attendance-reading")
        .child(ElementBuilder::new("div")?.class("attendance-value").text(&format!("{}%", scan.overall_attendance())).build())?
        .child(ElementBuilder::new("div")?.class("attendance-caption").text("Attendance Detected").build())?
        .build();
    append_child(&card, &reading)?;

    match scan.ai_analysis.as_ref() {
        Some(verdict) => {
            let tone = verdict.tone();
            let panel = ElementBuilder::new("div")?
                .class(&format!("verdict-panel {}", tone.css_class()))
                .child(ElementBuilder::new("h3")?.text(verdict.headline()).build())?
                .child(ElementBuilder::new("p")?.text(verdict.display_message()).build())?
                .build();
            if !verdict.confidence.is_empty() {
                append_child(
                    &panel,
                    &ElementBuilder::new("span")?.class("verdict-confidence").text(&verdict.confidence).build(),
                )?;
            }
            append_child(&card, &panel)?;
        }
        None => {
            append_child(&card, &ElementBuilder::new("p")?.class("placeholder").text("Analysis pending input...").build())?;
        }
    }
    Ok(card)
}

fn render_history_grid(cards: &[HistoryCard]) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card history-section")
        .child(ElementBuilder::new("h2")?.text("History").build())?
        .build();

    let grid = ElementBuilder::new("div")?
        .class("history-grid")
        .build();

    for card in cards {
        let badge_class = if card.safe { "history-badge tone-safe" } else { "history-badge tone-risk" };
        let item = ElementBuilder::new("div")?
            .class("history-card")
            .attr("data-key", &card.key)?
            .child(
                ElementBuilder::new("div")?
                    .class("history-card-top")
                    .child(ElementBuilder::new("span")?.class("history-date").text(&card.date_label).build())?
                    .child(ElementBuilder::new("span")?.class(badge_class).text(&card.prediction).build())?
                    .build(),
            )?
            .child(ElementBuilder::new("div")?.class("history-value").text(&format!("{}%", card.attendance)).build())?
            .child(ElementBuilder::new("div")?.class("history-filename").text(&card.filename).build())?
            .build();
        append_child(&grid, &item)?;
    }

    append_child(&section, &grid)?;
    Ok(section)
}
