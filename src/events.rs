//! Routes control changes to the chart handlers that subscribe to them.
//!
//! ```text
//!  SiteDropdown ──┬──► SuccessPie      (pie_chart)
//!                 └──► PayloadScatter  (scatter_chart)
//!  PayloadSlider ────► PayloadScatter
//! ```

use crate::chart::{PieChart, ScatterChart, pie_chart, scatter_chart};
use crate::data::filter::{FilterSelection, PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphId {
    SuccessPie,
    PayloadScatter,
}

impl ControlId {
    /// Graphs recomputed when this control changes.
    pub fn subscribers(self) -> &'static [GraphId] {
        match self {
            ControlId::SiteDropdown => &[GraphId::SuccessPie, GraphId::PayloadScatter],
            ControlId::PayloadSlider => &[GraphId::PayloadScatter],
        }
    }
}

/// A new value reported by one control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::SiteSelected(_) => ControlId::SiteDropdown,
            ControlEvent::PayloadRangeChanged(_) => ControlId::PayloadSlider,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartUpdate {
    pub fn graph(&self) -> GraphId {
        match self {
            ChartUpdate::Pie(_) => GraphId::SuccessPie,
            ChartUpdate::Scatter(_) => GraphId::PayloadScatter,
        }
    }
}

/// Both charts for the current selection, used for the first frame.
pub fn initial_charts(table: &LaunchTable, selection: &FilterSelection) -> (PieChart, ScatterChart) {
    (
        pie_chart(table, &selection.site),
        scatter_chart(table, selection),
    )
}

/// Store the event's value in `selection` and re-run every subscribed
/// handler against it.
pub fn dispatch(
    table: &LaunchTable,
    selection: &mut FilterSelection,
    event: ControlEvent,
) -> Vec<ChartUpdate> {
    let control = event.control();
    match event {
        ControlEvent::SiteSelected(site) => selection.site = site,
        ControlEvent::PayloadRangeChanged(range) => selection.payload = range,
    }

    let updates: Vec<ChartUpdate> = control
        .subscribers()
        .iter()
        .map(|graph| match graph {
            GraphId::SuccessPie => ChartUpdate::Pie(pie_chart(table, &selection.site)),
            GraphId::PayloadScatter => ChartUpdate::Scatter(scatter_chart(table, selection)),
        })
        .collect();

    log::debug!(
        "{control:?} -> site={} payload=[{}, {}], redrew {:?}",
        selection.site.value(),
        selection.payload.low,
        selection.payload.high,
        updates.iter().map(ChartUpdate::graph).collect::<Vec<_>>()
    );
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn sample() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success),
            LaunchRecord::new("siteA", 5000.0, Outcome::Failure),
            LaunchRecord::new("siteB", 3000.0, Outcome::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_site_event_updates_both_graphs() {
        let table = sample();
        let mut selection = FilterSelection::full(&table);
        let updates = dispatch(
            &table,
            &mut selection,
            ControlEvent::SiteSelected(SiteSelection::Site("siteB".into())),
        );

        assert_eq!(selection.site, SiteSelection::Site("siteB".into()));
        let graphs: Vec<GraphId> = updates.iter().map(ChartUpdate::graph).collect();
        assert_eq!(graphs, [GraphId::SuccessPie, GraphId::PayloadScatter]);
        match &updates[0] {
            ChartUpdate::Pie(pie) => assert_eq!(pie.total(), 1),
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_slider_event_updates_scatter_only() {
        let table = sample();
        let mut selection = FilterSelection::full(&table);
        let updates = dispatch(
            &table,
            &mut selection,
            ControlEvent::PayloadRangeChanged(PayloadRange::new(1000.0, 10000.0)),
        );

        assert_eq!(updates.len(), 1);
        match &updates[0] {
            ChartUpdate::Scatter(chart) => assert_eq!(chart.points.len(), 2),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn test_scatter_sees_both_controls() {
        let table = sample();
        let mut selection = FilterSelection::full(&table);
        dispatch(
            &table,
            &mut selection,
            ControlEvent::SiteSelected(SiteSelection::Site("siteA".into())),
        );
        let updates = dispatch(
            &table,
            &mut selection,
            ControlEvent::PayloadRangeChanged(PayloadRange::new(1000.0, 10000.0)),
        );
        match &updates[0] {
            ChartUpdate::Scatter(chart) => {
                assert_eq!(chart.points.len(), 1);
                assert_eq!(chart.points[0].payload_mass_kg, 5000.0);
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_charts_cover_table() {
        let table = sample();
        let (pie, scatter) = initial_charts(&table, &FilterSelection::full(&table));
        assert_eq!(pie.total(), 3);
        assert_eq!(scatter.points.len(), 3);
    }
}
