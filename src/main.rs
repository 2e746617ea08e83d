use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rhythmfx::audio::{SharedSpectrum, SpectrumAnalyzer};
use rhythmfx::config::AudioConfig;
use rhythmfx::gui::AppState;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting up...");

    // === Shared State ===
    let config = AudioConfig::default();
    let analyzer = Arc::new(Mutex::new(SpectrumAnalyzer::new(config.clone())));
    let spectrum = SharedSpectrum::new(analyzer.lock().unwrap().bin_count());
    let shutdown = Arc::new(AtomicBool::new(false));

    // === Analysis Thread ===
    debug!("Spawning analysis thread...");
    let analysis_thread = {
        let analyzer = analyzer.clone();
        let spectrum = spectrum.clone();
        let shutdown = shutdown.clone();
        let interval = Duration::from_millis(config.update_interval_ms);

        thread::spawn(move || {
            debug!("Analysis thread started");
            while !shutdown.load(Ordering::Relaxed) {
                thread::sleep(interval);

                if !shutdown.load(Ordering::Relaxed) {
                    let magnitudes = analyzer.lock().unwrap().magnitudes();
                    spectrum.publish(magnitudes);
                }
            }
            debug!("Analysis thread shutting down");
        })
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 360.0])
            .with_title("rhythmfx"),
        ..Default::default()
    };

    debug!("Launching GUI...");
    let result = eframe::run_native(
        "rhythmfx visualizer",
        options,
        Box::new(move |_cc| Ok(Box::new(AppState::new(analyzer, spectrum)))),
    );

    debug!("Signaling analysis thread to shut down...");
    shutdown.store(true, Ordering::Relaxed);

    analysis_thread
        .join()
        .expect("Failed to join analysis thread");
    debug!("Analysis thread joined");

    info!("Clean shutdown complete");

    result
}
