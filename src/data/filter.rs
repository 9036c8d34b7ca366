use std::cmp::Ordering;

use serde::Serialize;

use super::model::LaunchTable;

/// Dropdown value meaning "include every site".
pub const ALL_SITES: &str = "ALL";
/// Label shown for [`ALL_SITES`].
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Current dropdown value: the sentinel or one concrete site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_LABEL,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> String {
        selection.value().to_string()
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// An inverted or NaN range admits nothing.
    pub fn is_empty(&self) -> bool {
        !matches!(
            self.low.partial_cmp(&self.high),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    /// Resolve a drag of the two slider handles. Each handle is kept inside
    /// `bounds`; a handle dragged past the other one carries it along.
    pub fn dragged(low: f64, high: f64, low_moved: bool, bounds: PayloadRange) -> Self {
        let low = low.max(bounds.low).min(bounds.high);
        let high = high.max(bounds.low).min(bounds.high);
        match (low > high, low_moved) {
            (true, true) => Self::new(low, low),
            (true, false) => Self::new(high, high),
            (false, _) => Self::new(low, high),
        }
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

// ---------------------------------------------------------------------------
// Filter selection and derived views
// ---------------------------------------------------------------------------

/// The values currently held by the two filter controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl FilterSelection {
    /// All sites over the table's full payload range.
    #[cfg(test)]
    pub fn full(table: &LaunchTable) -> Self {
        Self {
            site: SiteSelection::All,
            payload: table.payload_bounds(),
        }
    }
}

/// Indices of rows launched from the selected site.
pub fn site_indices(table: &LaunchTable, site: &SiteSelection) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of rows passing both the site and the payload filter.
pub fn view_indices(table: &LaunchTable, selection: &FilterSelection) -> Vec<usize> {
    if selection.payload.is_empty() {
        return Vec::new();
    }
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.payload.contains(rec.payload_mass_kg) && selection.site.matches(&rec.site)
        })
        .map(|(i, _)| i)
        .collect()
}
