use eframe::egui;

/// What the user asked the shell to do this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceAction {
    None,
    Start,
    Stop,
}

pub fn render_source_panel(
    ui: &mut egui::Ui,
    devices: &[String],
    selected_idx: &mut usize,
    running: bool,
    error: Option<&str>,
) -> SourceAction {
    let mut action = SourceAction::None;

    ui.label(egui::RichText::new("Audio Source").size(16.0));
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Input Device:");
            ui.add_enabled_ui(!running, |ui| {
                egui::ComboBox::from_id_salt("device_selector")
                    .selected_text(
                        devices
                            .get(*selected_idx)
                            .map(|name| name.as_str())
                            .unwrap_or("No devices"),
                    )
                    .show_ui(ui, |ui| {
                        for (idx, name) in devices.iter().enumerate() {
                            ui.selectable_value(selected_idx, idx, name);
                        }
                    });
            });
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if running {
                if ui.button("Stop Visualization").clicked() {
                    action = SourceAction::Stop;
                }
            } else if ui.button("▶ Start Visualization").clicked() {
                action = SourceAction::Start;
            }
        });

        if let Some(message) = error {
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::RED, "Audio capture error");
            ui.label(message);
        }
    });

    action
}
