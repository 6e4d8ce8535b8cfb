//! Per-column multi-select filter state.
//!
//! Each column of the source data has a selection set. A row is admitted
//! when, for every column, the selection is empty or contains the row's
//! value. An empty selection means "no constraint", never "nothing".

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::graph::LineageStore;
use crate::parser::{ColumnMapping, LineageRow};

/// The selection state of one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Every distinct value of the column, in first-seen order
    pub all_options: Vec<String>,
    /// Currently selected values; empty means pass-through
    pub selected: BTreeSet<String>,
}

impl ColumnSelection {
    /// Returns true if the value passes this column.
    pub fn admits(&self, value: &str) -> bool {
        self.selected.is_empty() || self.selected.contains(value)
    }

    /// Returns true if the value is currently selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Short text for a dropdown button, e.g. `"2 items selected (2/5)"`.
    pub fn summary(&self) -> String {
        let total = self.all_options.len();
        let count = self.selected.len();

        let text = if count == 0 {
            "None selected (all pass)".to_string()
        } else if count == total {
            "All selected".to_string()
        } else if count == 1 {
            self.selected.iter().next().cloned().unwrap_or_default()
        } else {
            format!("{} items selected", count)
        };

        format!("{} ({}/{})", text, count, total)
    }
}

/// Multi-select filter state over every column of the source data.
///
/// # Example
///
/// ```rust
/// use lineagescope::filter::FilterState;
/// use lineagescope::graph::LineageStore;
/// use lineagescope::parser::LineageRow;
///
/// let store = LineageStore::build(vec![
///     LineageRow::new("v", "View", "reads", "t", "Table"),
///     LineageRow::new("w", "View", "writes", "t", "Table"),
/// ]);
/// let mut filter = FilterState::new(&store);
///
/// assert!(store.rows().iter().all(|r| filter.is_row_admitted(r)));
///
/// filter.set_selected("relationship", "reads", true);
/// assert!(filter.is_row_admitted(&store.rows()[0]));
/// assert!(!filter.is_row_admitted(&store.rows()[1]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    mapping: ColumnMapping,
    columns: Vec<String>,
    selections: HashMap<String, ColumnSelection>,
}

impl FilterState {
    /// Creates a filter with one empty selection per header column.
    pub fn new(store: &LineageStore) -> Self {
        let mapping = store.mapping().clone();
        let columns: Vec<String> = store.headers().to_vec();

        let selections = columns
            .iter()
            .map(|column| {
                let mut seen = HashSet::new();
                let all_options = store
                    .rows()
                    .iter()
                    .filter_map(|row| mapping.value(row, column))
                    .filter(|value| seen.insert(*value))
                    .map(str::to_string)
                    .collect();

                (
                    column.clone(),
                    ColumnSelection {
                        all_options,
                        selected: BTreeSet::new(),
                    },
                )
            })
            .collect();

        Self {
            mapping,
            columns,
            selections,
        }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The selection state of a column.
    pub fn selection(&self, column: &str) -> Option<&ColumnSelection> {
        self.selections.get(column)
    }

    /// Returns true if any column constrains rows.
    pub fn is_active(&self) -> bool {
        self.selections.values().any(|s| !s.selected.is_empty())
    }

    /// Distinct values of `column` among rows admitted by every other
    /// column's selection, in first-seen order.
    ///
    /// This is what narrows each dropdown while the others are set.
    pub fn options_for(&self, column: &str, rows: &[LineageRow]) -> Vec<String> {
        let mut seen = HashSet::new();
        rows.iter()
            .filter(|row| self.row_passes(row, Some(column)))
            .filter_map(|row| self.mapping.value(row, column))
            .filter(|value| seen.insert(*value))
            .map(str::to_string)
            .collect()
    }

    /// Includes or excludes one value of a column.
    ///
    /// Returns `true` if the selection changed. Unknown columns and values
    /// outside the column's options are ignored.
    pub fn set_selected(&mut self, column: &str, value: &str, included: bool) -> bool {
        let Some(selection) = self.selections.get_mut(column) else {
            debug!(column, "ignoring selection for unknown column");
            return false;
        };

        if included {
            if !selection.all_options.iter().any(|o| o == value) {
                debug!(column, value, "ignoring selection of unknown value");
                return false;
            }
            selection.selected.insert(value.to_string())
        } else {
            selection.selected.remove(value)
        }
    }

    /// Replaces a column's selection with the given values.
    ///
    /// Values outside the column's options are dropped. Returns `true` if
    /// the selection changed.
    pub fn set_selection<I, S>(&mut self, column: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(selection) = self.selections.get_mut(column) else {
            debug!(column, "ignoring selection for unknown column");
            return false;
        };

        let selected: BTreeSet<String> = values
            .into_iter()
            .filter(|v| selection.all_options.iter().any(|o| o == v.as_ref()))
            .map(|v| v.as_ref().to_string())
            .collect();

        if selected == selection.selected {
            return false;
        }
        selection.selected = selected;
        true
    }

    /// Selects every option of a column, or clears the column.
    pub fn select_all(&mut self, column: &str, included: bool) -> bool {
        let Some(selection) = self.selections.get_mut(column) else {
            return false;
        };

        let before = selection.selected.len();
        if included {
            selection.selected = selection.all_options.iter().cloned().collect();
        } else {
            selection.selected.clear();
        }
        before != selection.selected.len()
    }

    /// Clears every column's selection.
    pub fn clear(&mut self) {
        for selection in self.selections.values_mut() {
            selection.selected.clear();
        }
    }

    /// Returns true if the row passes every column.
    pub fn is_row_admitted(&self, row: &LineageRow) -> bool {
        self.row_passes(row, None)
    }

    fn row_passes(&self, row: &LineageRow, skip: Option<&str>) -> bool {
        self.columns.iter().all(|column| {
            if skip == Some(column.as_str()) {
                return true;
            }
            match self.selections.get(column) {
                Some(selection) => {
                    selection.admits(self.mapping.value(row, column).unwrap_or_default())
                }
                None => true,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> LineageStore {
        LineageStore::build(vec![
            LineageRow::new("v1", "View", "reads", "t1", "Table"),
            LineageRow::new("v2", "View", "writes", "t1", "Table"),
            LineageRow::new("t2", "Table", "copies", "t1", "Table"),
            LineageRow::new("v3", "View", "reads", "t2", "Table"),
        ])
    }

    #[test]
    fn test_new_filter_is_pass_through() {
        let store = create_test_store();
        let filter = FilterState::new(&store);

        assert_eq!(filter.columns().len(), 5);
        assert!(!filter.is_active());
        assert!(store.rows().iter().all(|r| filter.is_row_admitted(r)));
    }

    #[test]
    fn test_all_options_first_seen_order() {
        let store = create_test_store();
        let filter = FilterState::new(&store);

        let rel = filter.selection("relationship").unwrap();
        assert_eq!(rel.all_options, vec!["reads", "writes", "copies"]);
    }

    #[test]
    fn test_set_selected_admits_matching_rows() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        assert!(filter.set_selected("relationship", "reads", true));
        let admitted: Vec<&str> = store
            .rows()
            .iter()
            .filter(|r| filter.is_row_admitted(r))
            .map(|r| r.child_name.as_str())
            .collect();
        assert_eq!(admitted, vec!["v1", "v3"]);
    }

    #[test]
    fn test_deselecting_last_value_is_pass_through() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        filter.set_selected("relationship", "reads", true);
        assert!(filter.set_selected("relationship", "reads", false));

        assert!(!filter.is_active());
        assert!(store.rows().iter().all(|r| filter.is_row_admitted(r)));
    }

    #[test]
    fn test_unknown_column_and_value_ignored() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        assert!(!filter.set_selected("nope", "x", true));
        assert!(!filter.set_selected("relationship", "deletes", true));
        assert!(!filter.is_active());
    }

    #[test]
    fn test_set_selection_replaces() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        assert!(filter.set_selection("childTableType", ["View", "Bogus"]));
        let sel = filter.selection("childTableType").unwrap();
        assert_eq!(sel.selected.len(), 1);
        assert!(sel.is_selected("View"));

        assert!(!filter.set_selection("childTableType", ["View"]));
        assert!(filter.set_selection("childTableType", Vec::<String>::new()));
        assert!(!filter.is_active());
    }

    #[test]
    fn test_select_all_and_clear() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        assert!(filter.select_all("relationship", true));
        assert_eq!(filter.selection("relationship").unwrap().selected.len(), 3);
        assert!(store.rows().iter().all(|r| filter.is_row_admitted(r)));

        assert!(filter.select_all("relationship", false));
        assert!(!filter.is_active());

        filter.set_selected("parentTableName", "t2", true);
        filter.clear();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_options_for_cross_filters() {
        let store = create_test_store();
        let mut filter = FilterState::new(&store);

        filter.set_selected("parentTableName", "t2", true);

        // Other columns narrow to what t2's rows carry
        assert_eq!(filter.options_for("relationship", store.rows()), vec!["reads"]);
        assert_eq!(filter.options_for("childTableName", store.rows()), vec!["v3"]);

        // The column's own selection does not narrow itself
        assert_eq!(
            filter.options_for("parentTableName", store.rows()),
            vec!["t1", "t2"]
        );
    }

    #[test]
    fn test_options_for_extra_column() {
        let store = LineageStore::build(vec![
            LineageRow::edge("a", "r", "b", "T").with_extra("owner", "x"),
        ]);
        let filter = FilterState::new(&store);
        // Headers of a built store are only the five semantic columns
        assert!(filter.selection("owner").is_none());
        assert!(filter.options_for("owner", store.rows()).contains(&"x".to_string()));
    }

    #[test]
    fn test_summary_text() {
        let mut sel = ColumnSelection {
            all_options: vec!["a".into(), "b".into(), "c".into()],
            selected: BTreeSet::new(),
        };
        assert_eq!(sel.summary(), "None selected (all pass) (0/3)");

        sel.selected.insert("b".into());
        assert_eq!(sel.summary(), "b (1/3)");

        sel.selected.insert("c".into());
        assert_eq!(sel.summary(), "2 items selected (2/3)");

        sel.selected.insert("a".into());
        assert_eq!(sel.summary(), "All selected (3/3)");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_unconstrained_column_does_not_affect_admission(
                rows in prop::collection::vec(
                    (
                        prop::sample::select(vec!["a", "b", "c"]),
                        prop::sample::select(vec!["reads", "writes"]),
                        prop::sample::select(vec!["Table", "View"]),
                    ),
                    1..12,
                ),
                picks in prop::collection::vec(
                    prop::sample::select(vec!["reads", "writes", "Table", "View"]),
                    0..3,
                ),
                replacement in prop::sample::select(vec!["a", "b", "c", "zzz"]),
            ) {
                let store = LineageStore::build(
                    rows.iter()
                        .map(|(child, rel, ty)| LineageRow::new(*child, *ty, *rel, "p", "Table"))
                        .collect(),
                );
                let mut filter = FilterState::new(&store);
                for pick in &picks {
                    let column = if pick.starts_with(char::is_lowercase) {
                        "relationship"
                    } else {
                        "childTableType"
                    };
                    filter.set_selected(column, pick, true);
                }

                // childTableName has no selection, so its value never matters
                for row in store.rows() {
                    let mut moved = row.clone();
                    moved.child_name = replacement.to_string();
                    prop_assert_eq!(filter.is_row_admitted(row), filter.is_row_admitted(&moved));
                }
            }
        }
    }
}
