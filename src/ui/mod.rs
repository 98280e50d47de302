//! Side panel with the parameter sliders and the correlation display.

mod correlation_panel;
mod parameters_panel;
mod state;

pub use state::PanelState;

use correlation_panel::render_correlation_panel;
use parameters_panel::render_parameters_panel;

use crate::config::{PANEL_BACKGROUND, PANEL_OPACITY, PANEL_WIDTH};
use crate::raster::color::to_rgba8;
use crate::simulation::{CorrelationReport, ParameterStore};

/// Show the panel if it is open.
/// Returns true if a slider changed the store.
pub fn show_side_panel(
    ctx: &egui::Context,
    panel: &mut PanelState,
    store: &mut ParameterStore,
    report: &CorrelationReport,
) -> bool {
    if !panel.open {
        return false;
    }

    let [r, g, b, _] = to_rgba8(PANEL_BACKGROUND);
    let fill =
        egui::Color32::from_rgba_unmultiplied(r, g, b, (PANEL_OPACITY * 255.0).round() as u8);
    let frame = egui::Frame::side_top_panel(&ctx.style()).fill(fill);

    let mut changed = false;
    egui::SidePanel::right("parameters")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .frame(frame)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Parameters");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Close (Tab)").clicked() {
                        panel.open = false;
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                changed = render_parameters_panel(ui, panel, store);
                ui.add_space(8.0);
                ui.separator();
                render_correlation_panel(ui, report);
            });
        });

    changed
}

/// Canvas color to egui color
fn color32(color: [f32; 3]) -> egui::Color32 {
    let [r, g, b, _] = to_rgba8(color);
    egui::Color32::from_rgb(r, g, b)
}
