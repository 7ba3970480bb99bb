use crate::color::ColorMap;
use crate::data::model::{BenchReport, ScalarValue};
use crate::data::select::{init_selection, GroupSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Parsed benchmark report (None until a file is loaded).
    pub report: Option<BenchReport>,

    /// Which thread groups are currently shown.
    pub selection: GroupSelection,

    /// Colour per thread group.
    pub color_map: Option<ColorMap>,

    /// Scale each group's throughput by its own maximum instead of plotting
    /// absolute MB/s.
    pub relative_throughput: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            report: None,
            selection: GroupSelection::default(),
            color_map: None,
            relative_throughput: false,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a freshly parsed report: select every group, rebuild colours.
    pub fn set_report(&mut self, report: BenchReport) {
        self.selection = init_selection(&report);
        self.color_map = Some(ColorMap::from_groups(&report.groups));
        self.report = Some(report);
        self.status_message = None;
        self.loading = false;
    }

    /// Toggle a single thread group's visibility.
    pub fn toggle_group(&mut self, key: &ScalarValue) {
        if self.selection.contains(key) {
            self.selection.remove(key);
        } else {
            self.selection.insert(key.clone());
        }
    }

    /// Show every group.
    pub fn select_all(&mut self) {
        if let Some(report) = &self.report {
            self.selection = init_selection(report);
        }
    }

    /// Hide every group.
    pub fn select_none(&mut self) {
        self.selection.clear();
    }
}
