use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::{OutcomeColors, legend_label};
use crate::data::filter::PayloadRange;
use crate::data::model::Outcome;

const CHART_HEIGHT: f32 = 320.0;
/// Arc vertices per full turn.
const PIE_RESOLUTION: usize = 180;
/// Polygons must stay convex, so wedges are drawn in pieces no wider than this.
const MAX_WEDGE_SWEEP: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the outcome pie, slices clockwise from twelve o'clock.
pub fn pie_chart(ui: &mut Ui, id: &str, chart: &PieChart, colors: &OutcomeColors) {
    ui.strong(&chart.title);

    if chart.is_empty() {
        ui.label(RichText::new("No launches match the selected site.").italics());
        return;
    }
    ui.label(format!(
        "{} successful, {} failed",
        chart.count_of(Outcome::Success),
        chart.count_of(Outcome::Failure)
    ));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for slice in &chart.slices {
                let fraction = chart.fraction(slice);
                let sweep = -fraction * TAU;
                let color = colors.color_for(slice.outcome);
                let name = legend_label(slice.outcome);

                for piece in wedge_pieces(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(piece)
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                start += sweep;
            }
        });
}

/// Unit-circle wedge from angle `start` sweeping `sweep` radians, split into
/// convex polygons (centre + arc) of at most [`MAX_WEDGE_SWEEP`] each.
pub fn wedge_pieces(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    if sweep == 0.0 {
        return Vec::new();
    }
    let n_pieces = (sweep.abs() / MAX_WEDGE_SWEEP).ceil().max(1.0) as usize;
    let piece_sweep = sweep / n_pieces as f64;
    let steps = ((PIE_RESOLUTION as f64 * piece_sweep.abs() / TAU).ceil() as usize).max(2);

    (0..n_pieces)
        .map(|p| {
            let a0 = start + piece_sweep * p as f64;
            std::iter::once([0.0, 0.0])
                .chain((0..=steps).map(|s| {
                    let a = a0 + piece_sweep * s as f64 / steps as f64;
                    [a.cos(), a.sin()]
                }))
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass against outcome class, one series per class.
/// The x axis always spans `bounds` so the view doesn't jump while filtering.
pub fn scatter_chart(
    ui: &mut Ui,
    id: &str,
    chart: &ScatterChart,
    colors: &OutcomeColors,
    bounds: PayloadRange,
) {
    ui.strong(&chart.title);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .include_x(bounds.low)
        .include_x(bounds.high)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for outcome in [Outcome::Success, Outcome::Failure] {
                let points: Vec<[f64; 2]> = chart
                    .series(outcome)
                    .map(|p| [p.payload_mass_kg, f64::from(outcome.class())])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(legend_label(outcome))
                        .color(colors.color_for(outcome))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });

    if chart.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range.").italics());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_circle_split_into_quarters() {
        let pieces = wedge_pieces(FRAC_PI_2, -TAU);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            for p in &piece[1..] {
                let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_small_wedge_single_piece() {
        let pieces = wedge_pieces(0.0, 0.3);
        assert_eq!(pieces.len(), 1);
        let last = pieces[0].last().unwrap();
        assert!((last[0] - 0.3f64.cos()).abs() < 1e-9);
        assert!((last[1] - 0.3f64.sin()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_wedge_has_no_pieces() {
        assert!(wedge_pieces(1.0, 0.0).is_empty());
    }
}
