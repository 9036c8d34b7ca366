use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::rgb;
use crate::data::filter::PayloadRange;
use crate::data::model::{CLASS_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN};
use crate::layout::SliderMark;
use crate::state::AppState;

/// Horizontal space left beside a slider for its value box and caption.
const SLIDER_TEXT_ROOM: f32 = 140.0;
const MIN_SLIDER_WIDTH: f32 = 160.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and the dashboard title.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in payload view",
            state.table.len(),
            state.scatter.points.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    let title = &state.layout.title;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(title.text)
                .size(title.font_size)
                .color(rgb(title.color))
                .strong(),
        );
    });
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Searchable site selector.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let spec = &state.layout.site_dropdown;
    let current = &state.selection.site;
    let search = &mut state.site_search;
    let mut chosen = None;

    egui::ComboBox::from_id_salt(spec.id)
        .selected_text(current.label())
        .width(ui.available_width().min(420.0))
        .show_ui(ui, |ui: &mut Ui| {
            if spec.searchable {
                ui.add(egui::TextEdit::singleline(&mut *search).hint_text(spec.placeholder));
                ui.separator();
            }
            for opt in spec.search(search.as_str()) {
                if ui.selectable_label(*current == opt.value, &opt.label).clicked() {
                    chosen = Some(opt.value.clone());
                }
            }
        });

    if let Some(site) = chosen {
        state.site_search.clear();
        state.select_site(site);
    }
}

// ---------------------------------------------------------------------------
// Payload slider
// ---------------------------------------------------------------------------

/// Two handles over the observed payload range; they cannot cross.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let spec = &state.layout.payload_slider;
    let bounds = spec.bounds();
    let range = spec.min..=spec.max;
    let PayloadRange { mut low, mut high } = state.selection.payload;

    ui.label(state.layout.slider_caption);

    let (low_moved, reset) = ui
        .scope(|ui: &mut Ui| {
            let width = (ui.available_width() - SLIDER_TEXT_ROOM).max(MIN_SLIDER_WIDTH);
            ui.spacing_mut().slider_width = width;

            let low_moved = ui
                .add(egui::Slider::new(&mut low, range.clone()).step_by(spec.step).text("min"))
                .changed();
            ui.add(egui::Slider::new(&mut high, range).step_by(spec.step).text("max"));
            slider_marks_row(ui, &spec.marks, bounds, width);

            (low_moved, ui.small_button("Full range").clicked())
        })
        .inner;

    let next = if reset {
        spec.value
    } else {
        PayloadRange::dragged(low, high, low_moved, bounds)
    };
    state.set_payload_range(next);
}

/// Mark labels painted under the slider rail at their values.
fn slider_marks_row(ui: &mut Ui, marks: &[SliderMark], bounds: PayloadRange, width: f32) {
    let font = FontId::proportional(11.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, font.size + 4.0), Sense::hover());
    // egui insets the rail by the handle radius on both ends.
    let handle_radius = ui.spacing().interact_size.y / 2.5;
    let rail = rect.shrink2(egui::vec2(handle_radius, 0.0));

    let painter = ui.painter();
    for mark in marks {
        let x = rail.left() + rail.width() * mark.position(bounds);
        let color = mark.color.map_or_else(|| ui.visuals().text_color(), rgb);
        painter.text(
            egui::pos2(x, rect.top()),
            Align2::CENTER_TOP,
            &mark.label,
            font.clone(),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Derived view table
// ---------------------------------------------------------------------------

/// Rows currently plotted in the scatter chart.
pub fn view_table(ui: &mut Ui, state: &AppState) {
    let points = &state.scatter.points;
    let extra: Vec<&str> = state
        .table
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| ![SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN].contains(c))
        .collect();

    egui::CollapsingHeader::new(RichText::new(format!("Rows in view ({})", points.len())).strong())
        .id_salt("derived-view")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(240.0)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .columns(Column::auto(), extra.len())
                .header(20.0, |mut header| {
                    for title in ["Row", SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN]
                        .into_iter()
                        .chain(extra.iter().copied())
                    {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, points.len(), |mut row| {
                        let p = &points[row.index()];
                        let record = state.table.record(p.row);
                        row.col(|ui| {
                            ui.label(p.row.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&p.site);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}", p.payload_mass_kg));
                        });
                        row.col(|ui| {
                            ui.label(p.outcome.to_string());
                        });
                        for col in &extra {
                            row.col(|ui| {
                                if let Some(value) = record.and_then(|r| r.extra.get(*col)) {
                                    ui.label(value.to_string());
                                }
                            });
                        }
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart descriptions")
        .set_file_name("charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.export_charts(&path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
