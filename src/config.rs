use std::path::PathBuf;

use eframe::egui;

/// Launch table read at startup, relative to the working directory.
pub const DATA_PATH: &str = "spacex_launch_dash.csv";

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const TITLE_COLOR: [u8; 3] = [0x50, 0x3D, 0x36];
pub const TITLE_FONT_SIZE: f32 = 40.0;

pub const SLIDER_STEP: f64 = 100.0;
pub const SLIDER_MARK_COUNT: usize = 5;
pub const MIN_MARK_COLOR: [u8; 3] = [0x77, 0xB0, 0xB1];
pub const MAX_MARK_COLOR: [u8; 3] = [0xFF, 0x55, 0x00];

/// Window and data settings, fixed at build time.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            window_title: "Launch Dash – Launch Records".to_string(),
            inner_size: [1100.0, 900.0],
            min_inner_size: [600.0, 500.0],
        }
    }
}

impl DashboardConfig {
    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.window_title)
                .with_inner_size(self.inner_size)
                .with_min_inner_size(self.min_inner_size),
            ..Default::default()
        }
    }
}
