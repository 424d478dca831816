//! Dashboard session
//!
//! Holds the two independent range selections and drives the
//! Idle -> Recomputing -> Idle cycle. A change to one chart's range only
//! recomputes that chart.

use serde::Serialize;

use super::view::{ChartPanel, DashboardView};
use crate::chart::{bind, ChartKind};
use crate::dataset::{Dataset, RangeSelection, YearBounds};

/// Where the session is in its interaction cycle
///
/// `Recomputing` is only held inside [`DashboardSession::set_range`], which
/// borrows the session mutably for the whole rebuild. Between calls the
/// session always reads `Idle`; the recompute event is logged while the
/// state is still `Recomputing`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Displaying the current charts
    Idle,
    /// A widget changed and a chart is being rebuilt
    Recomputing,
}

/// Per-viewer slider state
#[derive(Debug, Clone)]
pub struct DashboardSession {
    line: RangeSelection,
    scatter: RangeSelection,
    state: SessionState,
}

impl DashboardSession {
    /// Fresh session: both sliders cover the full observed range
    pub fn new(bounds: Option<YearBounds>) -> Self {
        Self::from_widgets(bounds, (None, None), (None, None))
    }

    /// Session seeded with raw slider values (e.g. from a submitted form)
    pub fn from_widgets(
        bounds: Option<YearBounds>,
        line: (Option<i32>, Option<i32>),
        scatter: (Option<i32>, Option<i32>),
    ) -> Self {
        Self {
            line: RangeSelection::from_widget(bounds, line.0, line.1),
            scatter: RangeSelection::from_widget(bounds, scatter.0, scatter.1),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self, kind: ChartKind) -> RangeSelection {
        match kind {
            ChartKind::Line => self.line,
            ChartKind::Scatter => self.scatter,
        }
    }

    fn selection_mut(&mut self, kind: ChartKind) -> &mut RangeSelection {
        match kind {
            ChartKind::Line => &mut self.line,
            ChartKind::Scatter => &mut self.scatter,
        }
    }

    /// Filter and bind one chart with its current selection
    pub fn panel(&self, kind: ChartKind, dataset: &Dataset) -> ChartPanel {
        let selection = self.selection(kind);
        let view = dataset.filter(selection);
        ChartPanel {
            kind,
            selection,
            spec: bind(kind, &view),
        }
    }

    /// Everything the page needs for one render
    pub fn view(&self, dataset: &Dataset) -> DashboardView {
        DashboardView {
            bounds: dataset.bounds(),
            rows: dataset.len(),
            sample: dataset.sample().clone(),
            line: self.panel(ChartKind::Line, dataset),
            scatter: self.panel(ChartKind::Scatter, dataset),
        }
    }

    /// Apply a slider change and rebuild only the affected chart
    pub fn set_range(&mut self, kind: ChartKind, from: i32, to: i32, dataset: &Dataset) -> ChartPanel {
        self.state = SessionState::Recomputing;

        let selection = RangeSelection::from_widget(dataset.bounds(), Some(from), Some(to));
        *self.selection_mut(kind) = selection;
        let panel = self.panel(kind, dataset);

        tracing::debug!(
            state = ?self.state,
            chart = %kind,
            selection = %selection,
            points = panel.spec.points.len(),
            "Chart recomputed"
        );

        self.state = SessionState::Idle;
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn dataset() -> Dataset {
        Dataset::new((1960..=2022).map(|y| Record::new(y, (y - 1959) as f64)).collect())
    }

    #[test]
    fn test_new_session_is_idle_with_full_range() {
        let ds = dataset();
        let session = DashboardSession::new(ds.bounds());

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.selection(ChartKind::Line), RangeSelection::new(1960, 2022));
        assert_eq!(session.selection(ChartKind::Scatter), RangeSelection::new(1960, 2022));

        let view = session.view(&ds);
        assert_eq!(view.line.spec.points.len(), 63);
        assert_eq!(view.scatter.spec.points.len(), 63);
    }

    #[test]
    fn test_scatter_change_leaves_line_alone() {
        let ds = dataset();
        let mut session = DashboardSession::new(ds.bounds());
        let line_before = session.panel(ChartKind::Line, &ds);

        let scatter = session.set_range(ChartKind::Scatter, 2000, 2013, &ds);

        assert_eq!(scatter.spec.points.len(), 14);
        assert_eq!(scatter.selection, RangeSelection::new(2000, 2013));
        assert_eq!(session.panel(ChartKind::Line, &ds), line_before);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_line_change_leaves_scatter_alone() {
        let ds = dataset();
        let mut session = DashboardSession::new(ds.bounds());

        session.set_range(ChartKind::Line, 2008, 2010, &ds);

        assert_eq!(session.selection(ChartKind::Line), RangeSelection::new(2008, 2010));
        assert_eq!(session.selection(ChartKind::Scatter), RangeSelection::new(1960, 2022));
    }

    #[test]
    fn test_set_range_clamps_to_observed_years() {
        let ds = dataset();
        let mut session = DashboardSession::new(ds.bounds());

        let panel = session.set_range(ChartKind::Line, 1900, 2100, &ds);
        assert_eq!(panel.selection, RangeSelection::new(1960, 2022));
    }

    #[test]
    fn test_form_values_seed_selections() {
        let ds = dataset();
        let session = DashboardSession::from_widgets(ds.bounds(), (Some(2008), None), (None, Some(1970)));

        assert_eq!(session.selection(ChartKind::Line), RangeSelection::new(2008, 2022));
        assert_eq!(session.selection(ChartKind::Scatter), RangeSelection::new(1960, 1970));
    }

    #[test]
    fn test_empty_dataset_renders_empty_charts() {
        let ds = Dataset::default();
        let session = DashboardSession::new(ds.bounds());
        let view = session.view(&ds);

        assert!(view.bounds.is_none());
        assert!(view.line.spec.is_empty());
        assert!(view.scatter.spec.is_empty());
    }
}
