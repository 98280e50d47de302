//! Correlation strengths and the overall harmony

use crate::config::{COSMIC_VIOLET, DHARMA_GOLD, QUANTUM_BLUE};
use crate::simulation::correlation::CorrelationStrength;
use crate::simulation::CorrelationReport;
use crate::ui::color32;

pub fn render_correlation_panel(ui: &mut egui::Ui, report: &CorrelationReport) {
    ui.heading(egui::RichText::new("Active Correlations").color(color32(QUANTUM_BLUE)));
    ui.add_space(4.0);

    for entry in &report.entries {
        ui.group(|ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(buddhist_label(entry)).color(color32(DHARMA_GOLD)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(quantum_label(entry)).color(color32(QUANTUM_BLUE)),
                    );
                });
            });

            ui.add(egui::ProgressBar::new(entry.current).fill(color32(COSMIC_VIOLET)));

            ui.horizontal(|ui| {
                ui.small(base_caption(entry));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(current_caption(entry));
                });
            });
        });
        ui.add_space(4.0);
    }

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("Harmony of Realities").color(color32(COSMIC_VIOLET)));
    });
    ui.add(egui::ProgressBar::new(report.harmony).fill(color32(QUANTUM_BLUE)));
    ui.vertical_centered(|ui| {
        ui.label(harmony_caption(report));
        ui.small(sync_caption(report));
    });
}

fn percent(value: f32) -> i32 {
    (value * 100.0).round() as i32
}

fn buddhist_label(entry: &CorrelationStrength) -> String {
    format!("{} {}%", entry.spec.buddhist.label(), percent(entry.buddhist_value))
}

fn quantum_label(entry: &CorrelationStrength) -> String {
    format!("{} {}%", entry.spec.quantum.label(), percent(entry.quantum_value))
}

fn base_caption(entry: &CorrelationStrength) -> String {
    format!("Base: {}%", percent(entry.spec.base_strength))
}

fn current_caption(entry: &CorrelationStrength) -> String {
    format!("Current: {}%", percent(entry.current))
}

fn harmony_caption(report: &CorrelationReport) -> String {
    format!("{}% synchronization", percent(report.harmony))
}

fn sync_caption(report: &CorrelationReport) -> String {
    format!("{}% of pairs in step", percent(report.sync))
}
