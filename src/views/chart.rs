// ============================================================================
// CHART VIEW - Grafico SVG de asistencia (cronologico)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child};
use crate::models::ChartPoint;
use crate::viewmodels::history_viewmodel::plot;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 300.0;
const PAD: f64 = 36.0;

/// Area + linea con grilla horizontal cada 25%
pub fn render_chart(points: &[ChartPoint]) -> Result<Element, JsValue> {
    let coords = plot(points, WIDTH, HEIGHT, PAD);

    let svg = ElementBuilder::svg("svg")?
        .class("attendance-chart")
        .attr("viewBox", &format!("0 0 {} {}", WIDTH, HEIGHT))?
        .attr("preserveAspectRatio", "none")?
        .build();

    for tick in [0.0, 25.0, 50.0, 75.0, 100.0] {
        let y = PAD + (HEIGHT - 2.0 * PAD) * (1.0 - tick / 100.0);
        let line = ElementBuilder::svg("line")?
            .class("chart-grid")
            .num("x1", PAD)?
            .num("x2", WIDTH - PAD)?
            .num("y1", y)?
            .num("y2", y)?
            .build();
        let label = ElementBuilder::svg("text")?
            .class("chart-axis")
            .attr("x", "4")?
            .num("y", y + 4.0)?
            .text(&tick.to_string())
            .build();
        append_child(&svg, &line)?;
        append_child(&svg, &label)?;
    }

    let polyline: Vec<String> = coords.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        let baseline = HEIGHT - PAD;
        let area = format!(
            "M{:.1},{:.1} L{} L{:.1},{:.1} Z",
            first.0,
            baseline,
            polyline.join(" L"),
            last.0,
            baseline
        );
        append_child(&svg, &ElementBuilder::svg("path")?.class("chart-area").attr("d", &area)?.build())?;
    }
    append_child(
        &svg,
        &ElementBuilder::svg("polyline")?
            .class("chart-line")
            .attr("points", &polyline.join(" "))?
            .build(),
    )?;

    for (point, (x, y)) in points.iter().zip(coords.iter()) {
        let dot = ElementBuilder::svg("circle")?
            .class("chart-dot")
            .num("cx", *x)?
            .num("cy", *y)?
            .attr("r", "4")?
            .child(ElementBuilder::svg("title")?.text(&format!("{}: {}%", point.label, point.attendance)).build())?
            .build();
        let label = ElementBuilder::svg("text")?
            .class("chart-axis")
            .num("x", *x)?
            .num("y", HEIGHT - 10.0)?
            .attr("text-anchor", "middle")?
            .text(&point.label)
            .build();
        append_child(&svg, &dot)?;
        append_child(&svg, &label)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("card chart-section")
        .child(ElementBuilder::new("h2")?.text("Attendance Trend").build())?
        .child(svg)?
        .build())
}
