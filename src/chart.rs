//! Chart descriptions produced by the two dashboard handlers.
//!
//! A description is plain data (title plus slices or points); drawing it is
//! left to `ui::plot`, and it can be exported as JSON unchanged.

use serde::Serialize;

use crate::data::filter::{FilterSelection, SiteSelection, site_indices, view_indices};
use crate::data::model::{LaunchTable, Outcome};

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome (1 = Success, 0 = Failure)";

// ---------------------------------------------------------------------------
// Pie chart: outcome counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub outcome: Outcome,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn count_of(&self, outcome: Outcome) -> usize {
        self.slices
            .iter()
            .find(|s| s.outcome == outcome)
            .map_or(0, |s| s.count)
    }

    /// Share of the whole pie taken by `slice`, in `[0, 1]`.
    pub fn fraction(&self, slice: &PieSlice) -> f64 {
        match self.total() {
            0 => 0.0,
            total => slice.count as f64 / total as f64,
        }
    }
}

/// Count outcomes over the given rows. Classes with no rows get no slice;
/// slices are ordered by count, largest first, successes before failures
/// on a tie.
pub fn outcome_counts(table: &LaunchTable, indices: &[usize]) -> Vec<PieSlice> {
    let (mut failures, mut successes) = (0usize, 0usize);
    for rec in indices.iter().filter_map(|&i| table.record(i)) {
        match rec.outcome {
            Outcome::Failure => failures += 1,
            Outcome::Success => successes += 1,
        }
    }

    let mut slices: Vec<PieSlice> = [
        PieSlice {
            outcome: Outcome::Success,
            count: successes,
        },
        PieSlice {
            outcome: Outcome::Failure,
            count: failures,
        },
    ]
    .into_iter()
    .filter(|s| s.count > 0)
    .collect();
    // Stable sort keeps success first on equal counts.
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

/// Success/failure breakdown for one site, or for every site.
pub fn pie_chart(table: &LaunchTable, site: &SiteSelection) -> PieChart {
    let title = match site {
        SiteSelection::All => "Total Success Launches for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Success vs. Failed Launches for {name}"),
    };
    let indices = site_indices(table, site);
    if indices.is_empty() {
        log::warn!("No launches recorded for site '{}'", site.label());
    }
    PieChart {
        title,
        slices: outcome_counts(table, &indices),
    }
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Row index into the launch table.
    pub row: usize,
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of one outcome class, in table order.
    pub fn series(&self, outcome: Outcome) -> impl Iterator<Item = &ScatterPoint> {
        self.points.iter().filter(move |p| p.outcome == outcome)
    }
}

/// Payload mass against outcome for the rows passing `selection`.
pub fn scatter_chart(table: &LaunchTable, selection: &FilterSelection) -> ScatterChart {
    let title = format!(
        "Correlation between Payload and Success for {}",
        selection.site.label()
    );
    let points = view_indices(table, selection)
        .into_iter()
        .filter_map(|row| {
            table.record(row).map(|rec| ScatterPoint {
                row,
                site: rec.site.clone(),
                payload_mass_kg: rec.payload_mass_kg,
                outcome: rec.outcome,
            })
        })
        .collect();

    ScatterChart {
        title,
        x_label: PAYLOAD_AXIS_LABEL,
        y_label: OUTCOME_AXIS_LABEL,
        points,
    }
}
