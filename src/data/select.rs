use std::collections::BTreeSet;

use super::model::{BenchReport, ScalarValue};

// ---------------------------------------------------------------------------
// Group selection: which thread groups are drawn
// ---------------------------------------------------------------------------

/// The set of thread-group keys currently shown. An empty set hides every
/// series; a key's presence shows its group.
pub type GroupSelection = BTreeSet<ScalarValue>;

/// Initialise a [`GroupSelection`] with every group selected.
pub fn init_selection(report: &BenchReport) -> GroupSelection {
    report.groups.keys().cloned().collect()
}

/// Return indices (in first-seen group order) of the groups that are
/// currently selected.
pub fn visible_groups(report: &BenchReport, selection: &GroupSelection) -> Vec<usize> {
    report
        .groups
        .keys()
        .enumerate()
        .filter(|(_, key)| selection.contains(key))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse::parse_log;

    fn report() -> BenchReport {
        let log = "f\nd\n\
                   RESULT:\tthreads=2\tlevel=1\tRatio=2.0\tDatarate=500MB/s\n\
                   RESULT:\tthreads=4\tlevel=1\tRatio=2.0\tDatarate=900MB/s\n";
        parse_log(log).into_report()
    }

    #[test]
    fn init_selects_every_group() {
        let report = report();
        let selection = init_selection(&report);
        assert_eq!(selection.len(), 2);
        assert_eq!(visible_groups(&report, &selection), vec![0, 1]);
    }

    #[test]
    fn deselected_group_is_hidden() {
        let report = report();
        let mut selection = init_selection(&report);
        selection.remove(&ScalarValue::Integer(2));
        assert_eq!(visible_groups(&report, &selection), vec![1]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let report = report();
        assert!(visible_groups(&report, &GroupSelection::new()).is_empty());
    }
}
