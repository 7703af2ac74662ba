// ============================================================================
// CONTEXT MODAL - Popup "Context Check"
// ============================================================================
// Los dias se escriben en un borrador local (evento `input`) y se confirman
// en el collector recien al tocar otro control o "Calculate Fate". Un setter
// re-renderiza el modal; confirmar en `change`/blur reemplazaria el boton
// entre mousedown y mouseup y el click se perderia.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Dashboard;
use crate::dom::{ElementBuilder, append_child, event_value, on_click, on_event};
use crate::models::{Context, FacultyStrictness, SemesterPhase, SubjectType};
use crate::viewmodels::ContextViewModel;

/// Renderizar popup con el contexto actual
pub fn render_context_modal(dashboard: &Rc<Dashboard>, context: &Context) -> Result<Element, JsValue> {
    let overlay = ElementBuilder::new("div")?
        .class("modal-overlay")
        .build();

    let modal = ElementBuilder::new("div")?
        .class("modal context-modal")
        .build();

    let close = ElementBuilder::new("button")?
        .class("modal-close")
        .attr("type", "button")?
        .attr("aria-label", "Close")?
        .text("✕")
        .build();
    {
        let dashboard = dashboard.clone();
        on_click(&close, move |_| {
            dashboard.cancel_context();
        })?;
    }

    append_child(&modal, &close)?;
    append_child(&modal, &ElementBuilder::new("h3")?.text("Context Check 🧠").build())?;
    append_child(&modal, &ElementBuilder::new("p")?.class("modal-subtitle").text("Let's look at the B.Tech Reality.").build())?;

    // Dias al examen
    let draft: DaysDraft = Rc::new(RefCell::new(context.days_to_exam.clone()));
    let days = ElementBuilder::new("input")?
        .class("form-input")
        .id("days-to-exam")?
        .attr("type", "number")?
        .attr("value", &context.days_to_exam)?
        .build();
    {
        let draft = draft.clone();
        on_event(&days, "input", move |e| {
            if let Some(value) = event_value(&e) {
                *draft.borrow_mut() = value;
            }
        })?;
    }
    append_child(&modal, &labelled("Days to Exam", days)?)?;

    append_child(&modal, &render_segmented(
        dashboard,
        &draft,
        "Strictness",
        FacultyStrictness::ALL.iter().map(|s| (s.label(), *s == context.faculty_strictness)),
        |collector, index| collector.set_faculty_strictness(FacultyStrictness::ALL[index]),
    )?)?;
    append_child(&modal, &render_segmented(
        dashboard,
        &draft,
        "Subject",
        SubjectType::ALL.iter().map(|s| (s.label(), *s == context.subject_type)),
        |collector, index| collector.set_subject_type(SubjectType::ALL[index]),
    )?)?;
    append_child(&modal, &render_segmented(
        dashboard,
        &draft,
        "Semester Phase",
        SemesterPhase::ALL.iter().map(|s| (s.label(), *s == context.semester_phase)),
        |collector, index| collector.set_semester_phase(SemesterPhase::ALL[index]),
    )?)?;

    // Toggles
    append_child(&modal, &render_toggle(dashboard, &draft, "It's a Lab", None, context.is_lab, |c, v| c.set_is_lab(v))?)?;
    append_child(&modal, &render_toggle(dashboard, &draft, "Proxy Available", Some("I have a friend inside"), context.has_proxy, |c, v| c.set_has_proxy(v))?)?;
    append_child(&modal, &render_toggle(dashboard, &draft, "Bunked Last Class", Some("Teacher might remember me"), context.bunked_last_class, |c, v| c.set_bunked_last_class(v))?)?;
    append_child(&modal, &render_toggle(dashboard, &draft, "First Period (Sleepy)", None, context.is_first_period, |c, v| c.set_is_first_period(v))?)?;

    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "button")?
        .text("Calculate Fate")
        .build();
    {
        let dashboard = dashboard.clone();
        on_click(&submit, move |_| {
            commit_days(&dashboard.collector(), &draft);
            let dashboard = dashboard.clone();
            spawn_local(async move {
                if dashboard.submit_context().await.is_none() {
                    log::warn!("⚠️ [CONTEXT] Submit ignorado, popup cerrado");
                }
            });
        })?;
    }
    append_child(&modal, &submit)?;

    append_child(&overlay, &modal)?;
    Ok(overlay)
}

/// Borrador del campo de dias, compartido con los handlers del modal
type DaysDraft = Rc<RefCell<String>>;

fn commit_days(collector: &ContextViewModel<'_>, draft: &DaysDraft) {
    collector.set_days_to_exam(draft.borrow().clone());
}

fn labelled(text: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.class("field-label").text(text).build())?
        .child(control)?
        .build())
}

/// Grupo de botones excluyentes
fn render_segmented<'a>(
    dashboard: &Rc<Dashboard>,
    draft: &DaysDraft,
    title: &str,
    options: impl Iterator<Item = (&'a str, bool)>,
    select: fn(&ContextViewModel<'_>, usize),
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("segmented")
        .build();

    for (index, (label, active)) in options.enumerate() {
        let class = if active { "segment active" } else { "segment" };
        let button = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .text(label)
            .build();
        let dashboard = dashboard.clone();
        let draft = draft.clone();
        on_click(&button, move |_| {
            let collector = dashboard.collector();
            commit_days(&collector, &draft);
            select(&collector, index);
        })?;
        append_child(&group, &button)?;
    }

    labelled(title, group)
}

/// Tarjeta on/off de un factor booleano
fn render_toggle(
    dashboard: &Rc<Dashboard>,
    draft: &DaysDraft,
    title: &str,
    hint: Option<&str>,
    active: bool,
    set: fn(&ContextViewModel<'_>, bool),
) -> Result<Element, JsValue> {
    let toggle = ElementBuilder::new("div")?
        .class(if active { "toggle active" } else { "toggle" })
        .attr("role", "switch")?
        .attr("aria-checked", if active { "true" } else { "false" })?
        .child(ElementBuilder::new("span")?.class("toggle-title").text(title).build())?
        .build();
    if let Some(hint) = hint {
        append_child(&toggle, &ElementBuilder::new("span")?.class("toggle-hint").text(hint).build())?;
    }

    let dashboard = dashboard.clone();
    let draft = draft.clone();
    on_click(&toggle, move |_| {
        let collector = dashboard.collector();
        commit_days(&collector, &draft);
        set(&collector, !active);
    })?;
    Ok(toggle)
}
