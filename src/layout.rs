use serde::Serialize;

use crate::config::{
    DASHBOARD_TITLE, MAX_MARK_COLOR, MIN_MARK_COLOR, SLIDER_MARK_COUNT, SLIDER_STEP, TITLE_COLOR,
    TITLE_FONT_SIZE,
};
use crate::data::filter::{ALL_SITES_LABEL, PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;

// ---------------------------------------------------------------------------
// Static control tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleSpec {
    pub text: &'static str,
    pub color: [u8; 3],
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: SiteSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub id: &'static str,
    pub options: Vec<DropdownOption>,
    pub default: SiteSelection,
    pub placeholder: &'static str,
    pub searchable: bool,
}

impl DropdownSpec {
    /// Options whose label contains `query`, ignoring case. An empty query
    /// matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a DropdownOption> + 'a {
        let needle = query.trim().to_lowercase();
        self.options
            .iter()
            .filter(move |opt| needle.is_empty() || opt.label.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
    pub color: Option<[u8; 3]>,
}

impl SliderMark {
    /// Where the mark sits along the slider rail, from 0.0 at `bounds.low`
    /// to 1.0 at `bounds.high`.
    pub fn position(&self, bounds: PayloadRange) -> f32 {
        if bounds.span() <= 0.0 {
            return 0.0;
        }
        ((self.value - bounds.low) / bounds.span()).clamp(0.0, 1.0) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSliderSpec {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

impl RangeSliderSpec {
    pub fn bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSpec {
    pub id: &'static str,
}

/// The dashboard's controls, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: TitleSpec,
    pub site_dropdown: DropdownSpec,
    pub pie_graph: GraphSpec,
    pub slider_caption: &'static str,
    pub payload_slider: RangeSliderSpec,
    pub scatter_graph: GraphSpec,
}

/// Build the control tree. Dropdown options come from the table's distinct
/// sites and the slider spans its observed payload range.
pub fn build_layout(table: &LaunchTable) -> Layout {
    let options: Vec<DropdownOption> = std::iter::once(DropdownOption {
        label: ALL_SITES_LABEL.to_string(),
        value: SiteSelection::All,
    })
    .chain(table.sites().iter().map(|site| DropdownOption {
        label: site.clone(),
        value: SiteSelection::Site(site.clone()),
    }))
    .collect();

    let bounds = table.payload_bounds();

    Layout {
        title: TitleSpec {
            text: DASHBOARD_TITLE,
            color: TITLE_COLOR,
            font_size: TITLE_FONT_SIZE,
        },
        site_dropdown: DropdownSpec {
            id: "site-dropdown",
            options,
            default: SiteSelection::All,
            placeholder: "Select a Launch Site here",
            searchable: true,
        },
        pie_graph: GraphSpec {
            id: "success-pie-chart",
        },
        slider_caption: "Payload range (Kg):",
        payload_slider: RangeSliderSpec {
            id: "payload-slider",
            min: bounds.low,
            max: bounds.high,
            step: SLIDER_STEP,
            marks: slider_marks(bounds, SLIDER_MARK_COUNT),
            value: bounds,
        },
        scatter_graph: GraphSpec {
            id: "success-payload-scatter-chart",
        },
    }
}

/// `count` evenly spaced marks from `bounds.low` to `bounds.high`; the two
/// end marks are coloured. A zero-width range gets a single mark.
pub fn slider_marks(bounds: PayloadRange, count: usize) -> Vec<SliderMark> {
    if count < 2 || bounds.span() <= 0.0 {
        return vec![SliderMark {
            value: bounds.low,
            label: format!("{:.0}", bounds.low),
            color: Some(MIN_MARK_COLOR),
        }];
    }
    let last = count - 1;
    (0..count)
        .map(|i| {
            let value = bounds.low + bounds.span() * i as f64 / last as f64;
            let color = match i {
                0 => Some(MIN_MARK_COLOR),
                i if i == last => Some(MAX_MARK_COLOR),
                _ => None,
            };
            SliderMark {
                value,
                label: format!("{value:.0}"),
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn sample() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 525.0, Outcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn test_dropdown_options() {
        let layout = build_layout(&sample());
        let labels: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, ["All Sites", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(layout.site_dropdown.options[0].value, SiteSelection::All);
        assert_eq!(layout.site_dropdown.default, SiteSelection::All);
        assert!(layout.site_dropdown.searchable);
    }

    #[test]
    fn test_dropdown_search() {
        let layout = build_layout(&sample());
        let hits: Vec<&str> = layout
            .site_dropdown
            .search("ccafs")
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(hits, ["CCAFS LC-40"]);
        assert_eq!(layout.site_dropdown.search("  ").count(), 4);
        assert_eq!(layout.site_dropdown.search("mars").count(), 0);
    }

    #[test]
    fn test_slider_spans_observed_range() {
        let layout = build_layout(&sample());
        let slider = &layout.payload_slider;
        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 9600.0);
        assert_eq!(slider.value, PayloadRange::new(0.0, 9600.0));
        assert_eq!(slider.step, 100.0);
    }

    #[test]
    fn test_slider_marks_follow_data() {
        let marks = slider_marks(PayloadRange::new(0.0, 9600.0), 5);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 2400.0, 4800.0, 7200.0, 9600.0]);
        assert_eq!(marks[4].label, "9600");
        assert_eq!(marks[0].color, Some(MIN_MARK_COLOR));
        assert_eq!(marks[4].color, Some(MAX_MARK_COLOR));
        assert!(marks[2].color.is_none());
    }

    #[test]
    fn test_slider_mark_positions() {
        let bounds = PayloadRange::new(0.0, 9600.0);
        let positions: Vec<f32> = slider_marks(bounds, 5)
            .iter()
            .map(|m| m.position(bounds))
            .collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let single = slider_marks(PayloadRange::new(500.0, 500.0), 5);
        assert_eq!(single[0].position(PayloadRange::new(500.0, 500.0)), 0.0);
    }

    #[test]
    fn test_slider_marks_degenerate_range() {
        let marks = slider_marks(PayloadRange::new(500.0, 500.0), 5);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].label, "500");
    }
}
