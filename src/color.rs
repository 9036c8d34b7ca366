use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours with hues spread from `start_hue`.
pub fn generate_palette(n: usize, start_hue: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (start_hue + (i as f32 / n as f32) * 360.0) % 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

// ---------------------------------------------------------------------------
// Outcome colours shared by the pie and scatter charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct OutcomeColors {
    pub success: Color32,
    pub failure: Color32,
}

impl Default for OutcomeColors {
    fn default() -> Self {
        // Hue 210 lands on blue for success, its opposite on orange-red.
        let palette = generate_palette(2, 210.0);
        Self {
            success: palette[0],
            failure: palette[1],
        }
    }
}

impl OutcomeColors {
    pub fn color_for(&self, outcome: Outcome) -> Color32 {
        match outcome {
            Outcome::Success => self.success,
            Outcome::Failure => self.failure,
        }
    }
}

/// `"1 (Success)"` / `"0 (Failure)"`.
pub fn legend_label(outcome: Outcome) -> String {
    format!("{} ({})", outcome, outcome.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_distinct() {
        let colors = generate_palette(4, 0.0);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn test_outcome_colors_differ() {
        let colors = OutcomeColors::default();
        assert_ne!(colors.success, colors.failure);
        assert_eq!(colors.color_for(Outcome::Success), colors.success);
        assert_eq!(colors.color_for(Outcome::Failure), colors.failure);
        assert_eq!(legend_label(Outcome::Success), "1 (Success)");
        assert_eq!(legend_label(Outcome::Failure), "0 (Failure)");
    }
}
