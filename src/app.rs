use eframe::egui::{self, ScrollArea, Ui};

use crate::color::OutcomeColors;
use crate::data::model::LaunchTable;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    colors: OutcomeColors,
}

impl LaunchDashApp {
    pub fn new(table: LaunchTable) -> Self {
        Self {
            state: AppState::new(table),
            colors: OutcomeColors::default(),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: controls and charts, top to bottom ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    let layout = &self.state.layout;
                    plot::pie_chart(ui, layout.pie_graph.id, &self.state.pie, &self.colors);
                    ui.separator();

                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(8.0);

                    let layout = &self.state.layout;
                    plot::scatter_chart(
                        ui,
                        layout.scatter_graph.id,
                        &self.state.scatter,
                        &self.colors,
                        layout.payload_slider.bounds(),
                    );
                    ui.separator();

                    panels::view_table(ui, &self.state);
                });
        });
    }
}
