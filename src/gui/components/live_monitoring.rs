use eframe::egui;

use crate::config::VisualConfig;
use crate::engine::scene::{bass_energy, overall_energy};

pub fn render_live_monitoring(ui: &mut egui::Ui, spectrum: &[u8]) {
    let bass_bins = VisualConfig::default().bass_bin_count;
    let bass = bass_energy(spectrum, bass_bins);
    let overall = overall_energy(spectrum);

    ui.label(egui::RichText::new("Live Monitoring").size(16.0));
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.colored_label(egui::Color32::LIGHT_BLUE, "Spectrum Energy:");
        ui.horizontal(|ui| {
            ui.label("Bass:");
            ui.strong(format!("{:.1}%", bass * 100.0));

            ui.separator();

            ui.label("Overall:");
            ui.strong(format!("{:.1}%", overall * 100.0));
        });
    });
}
