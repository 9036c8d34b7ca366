use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::{PieChart, ScatterChart};
use crate::data::filter::{FilterSelection, PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;
use crate::events::{ChartUpdate, ControlEvent, dispatch, initial_charts};
use crate::layout::{Layout, build_layout};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Launch table, read-only after startup.
    pub table: LaunchTable,

    /// Control tree built from the table.
    pub layout: Layout,

    /// Values currently held by the dropdown and slider.
    pub selection: FilterSelection,

    pub pie: PieChart,
    pub scatter: ScatterChart,

    /// Text typed into the dropdown's search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// What "File → Export charts…" writes.
#[derive(Serialize)]
struct ChartExport<'a> {
    selection: &'a FilterSelection,
    pie: &'a PieChart,
    scatter: &'a ScatterChart,
}

impl AppState {
    /// Build the layout and render both charts for the layout's defaults.
    pub fn new(table: LaunchTable) -> Self {
        let layout = build_layout(&table);
        let selection = FilterSelection {
            site: layout.site_dropdown.default.clone(),
            payload: layout.payload_slider.value,
        };
        let (pie, scatter) = initial_charts(&table, &selection);

        Self {
            table,
            layout,
            selection,
            pie,
            scatter,
            site_search: String::new(),
            status_message: None,
        }
    }

    /// Route one control change and keep the charts it produces.
    pub fn handle(&mut self, event: ControlEvent) {
        for update in dispatch(&self.table, &mut self.selection, event) {
            match update {
                ChartUpdate::Pie(pie) => self.pie = pie,
                ChartUpdate::Scatter(scatter) => self.scatter = scatter,
            }
        }
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        if site != self.selection.site {
            self.handle(ControlEvent::SiteSelected(site));
        }
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range != self.selection.payload {
            self.handle(ControlEvent::PayloadRangeChanged(range));
        }
    }

    /// Write the current selection and both chart descriptions as JSON.
    pub fn export_charts(&self, path: &Path) -> Result<()> {
        let export = ChartExport {
            selection: &self.selection,
            pie: &self.pie,
            scatter: &self.scatter,
        };
        let json = serde_json::to_string_pretty(&export).context("serializing charts")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        AppState::new(
            LaunchTable::from_records(vec![
                LaunchRecord::new("siteA", 500.0, Outcome::Success),
                LaunchRecord::new("siteA", 5000.0, Outcome::Failure),
                LaunchRecord::new("siteB", 3000.0, Outcome::Success),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_new_uses_layout_defaults() {
        let state = state();
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.selection.payload, PayloadRange::new(500.0, 5000.0));
        assert_eq!(state.pie.total(), 3);
        assert_eq!(state.scatter.points.len(), 3);
    }

    #[test]
    fn test_select_site_refreshes_charts() {
        let mut state = state();
        state.select_site(SiteSelection::Site("siteA".into()));
        assert_eq!(state.pie.total(), 2);
        assert_eq!(state.scatter.points.len(), 2);
        assert!(state.scatter.title.ends_with("siteA"));
    }

    #[test]
    fn test_payload_range_keeps_pie() {
        let mut state = state();
        state.set_payload_range(PayloadRange::new(1000.0, 10000.0));
        assert_eq!(state.pie.total(), 3);
        assert_eq!(state.scatter.points.len(), 2);
    }

    #[test]
    fn test_export_charts_writes_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charts.json");
        let state = state();
        state.export_charts(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["selection"]["site"], "ALL");
        assert_eq!(json["pie"]["title"], "Total Success Launches for All Sites");
        assert_eq!(json["scatter"]["points"].as_array().unwrap().len(), 3);
    }
}
