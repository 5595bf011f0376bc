// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! SERP Preview - Main Entry Point
//!
//! A live search-engine result preview for page titles, URLs and meta
//! descriptions. Built with Rust and egui.

mod app;
mod config;
mod error;
mod preview;
mod string_utils;
mod theme;
mod ui;

use app::SerpPreviewApp;
use config::load_config;
use log::info;

/// Application name constant.
const APP_NAME: &str = "SERP Preview";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([480.0, 320.0]);

    // Apply position if saved
    let viewport = if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport.with_position([x, y])
    } else {
        viewport
    };

    // Apply maximized state
    let viewport = if window_size.maximized {
        viewport.with_maximized(true)
    } else {
        viewport
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(SerpPreviewApp::new(cc, settings)))),
    )
}
