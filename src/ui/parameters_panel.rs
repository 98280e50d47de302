//! Sliders for the quantum and contemplative parameter sets

use crate::config::{DHARMA_GOLD, QUANTUM_BLUE, SLIDER_STEP};
use crate::simulation::params::{BuddhistField, QuantumField};
use crate::simulation::{Parameter, ParameterStore};
use crate::ui::{color32, PanelState};

pub fn render_parameters_panel(
    ui: &mut egui::Ui,
    panel: &mut PanelState,
    store: &mut ParameterStore,
) -> bool {
    let mut changed = false;

    ui.heading(egui::RichText::new("Quantum Parameters").color(color32(QUANTUM_BLUE)));
    for field in QuantumField::ALL {
        changed |= parameter_slider(ui, panel, store, Parameter::Quantum(field), QUANTUM_BLUE);
    }

    ui.add_space(8.0);

    ui.heading(egui::RichText::new("Buddhist Parameters").color(color32(DHARMA_GOLD)));
    for field in BuddhistField::ALL {
        changed |= parameter_slider(ui, panel, store, Parameter::Buddhist(field), DHARMA_GOLD);
    }

    changed
}

/// Labelled slider writing back through the store.
/// Touching a slider also moves keyboard focus to it.
fn parameter_slider(
    ui: &mut egui::Ui,
    panel: &mut PanelState,
    store: &mut ParameterStore,
    parameter: Parameter,
    accent: [f32; 3],
) -> bool {
    let mut label = egui::RichText::new(parameter.label());
    if panel.selected() == parameter {
        label = label.strong().color(color32(accent));
    }
    ui.label(label);

    let mut value = store.get(parameter);
    let response = ui
        .scope(|ui| {
            ui.visuals_mut().selection.bg_fill = color32(accent);
            ui.add(
                egui::Slider::new(&mut value, 0.0..=1.0)
                    .step_by(SLIDER_STEP as f64)
                    .trailing_fill(true)
                    .custom_formatter(|v, _| format_percent(v))
                    .custom_parser(parse_percent),
            )
        })
        .inner;

    if response.drag_started() || response.clicked() || response.gained_focus() {
        panel.select(parameter);
    }

    response.changed() && store.set(parameter, value)
}

/// 0.42 -> "42%"
fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// "42%" or "42" -> 0.42
fn parse_percent(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .map(|v| v / 100.0)
}
