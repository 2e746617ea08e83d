use cpal::traits::{DeviceTrait, HostTrait};
use eframe::egui;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

use crate::audio::{self, AudioStream, SharedSpectrum, SpectrumAnalyzer};
use crate::config::APP_VERSION;
use crate::visual::VisualEngine;

use super::components::{SourceAction, render_live_monitoring, render_source_panel};

pub struct AppState {
    devices: Vec<String>,
    selected_device_idx: usize,
    analyzer: Arc<Mutex<SpectrumAnalyzer>>,
    spectrum: SharedSpectrum,
    audio_stream: Option<AudioStream>,
    capture_error: Option<String>,
    visuals_window_open: bool,
    visuals_window: VisualEngine,
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_panel(ctx);
        self.render_central_panel(ctx);
        self.render_visualizer_window(ctx);

        ctx.request_repaint();
    }
}

impl AppState {
    pub fn new(analyzer: Arc<Mutex<SpectrumAnalyzer>>, spectrum: SharedSpectrum) -> Self {
        debug!("Initializing GUI state...");
        let host = cpal::default_host();

        let devices: Vec<String> = host
            .input_devices()
            .ok()
            .map(|iter| iter.filter_map(|d| d.name().ok()).collect())
            .unwrap_or_default();

        debug!("Found {} audio input devices", devices.len());

        let default_device_name = host.default_input_device().and_then(|d| d.name().ok());

        let selected_device_idx = default_device_name
            .as_ref()
            .and_then(|name| devices.iter().position(|n| n == name))
            .unwrap_or(0);

        let selected_device = devices
            .get(selected_device_idx)
            .map(|s| s.as_str())
            .unwrap_or("None");
        info!("Default audio device: {selected_device}");

        Self {
            devices,
            selected_device_idx,
            analyzer,
            visuals_window: VisualEngine::new(spectrum.clone()),
            spectrum,
            audio_stream: None,
            capture_error: None,
            visuals_window_open: false,
        }
    }

    fn is_running(&self) -> bool {
        self.audio_stream.is_some()
    }

    fn start_visualization(&mut self) {
        self.capture_error = None;
        match audio::create_audio_stream(
            self.selected_device_idx,
            &self.devices,
            self.analyzer.clone(),
        ) {
            Ok(stream) => {
                self.audio_stream = Some(stream);
                self.visuals_window_open = true;
                info!("Visualization started");
            }
            Err(e) => {
                warn!("Could not start capture: {e:#}");
                self.capture_error = Some(format!("{e:#}"));
            }
        }
    }

    fn stop_visualization(&mut self) {
        self.audio_stream = None;
        self.visuals_window_open = false;
        self.visuals_window.shutdown();
        info!("Visualization stopped");
    }

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(format!("rhythmfx {APP_VERSION}"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.is_running() {
                        ui.colored_label(egui::Color32::GREEN, "Listening");
                    } else {
                        ui.colored_label(egui::Color32::GRAY, "Idle");
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            let running = self.is_running();
            let action = render_source_panel(
                ui,
                &self.devices,
                &mut self.selected_device_idx,
                running,
                self.capture_error.as_deref(),
            );
            match action {
                SourceAction::Start => self.start_visualization(),
                SourceAction::Stop => self.stop_visualization(),
                SourceAction::None => {}
            }

            ui.add_space(12.0);

            let spectrum = self.spectrum.snapshot();
            render_live_monitoring(ui, &spectrum);
        });
    }

    fn render_visualizer_window(&mut self, ctx: &egui::Context) {
        if self.visuals_window_open {
            let visualizer_id = egui::ViewportId::from_hash_of("rhythmfx_visualizer");

            ctx.show_viewport_immediate(
                visualizer_id,
                egui::ViewportBuilder::default()
                    .with_title("rhythmfx visuals")
                    .with_inner_size([800.0, 600.0])
                    .with_resizable(true),
                |ctx, _class| {
                    if ctx.input(|i| i.viewport().close_requested()) {
                        self.stop_visualization();
                    }
                    self.visuals_window.render(ctx);
                },
            );
        }
    }
}
