//! Event records and the alert view.
//!
//! Rows come from the store already ordered by `id` descending; that order is
//! the canonical display order and the alert filter preserves it.

/// One row of the event table.
///
/// `cells` holds every column rendered as display text, in `columns` order.
/// `id` and `alert` are additionally carried typed because the alert view
/// depends on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: i64,
    pub alert: Option<String>,
    pub cells: Vec<String>,
}

impl EventRow {
    /// Whether this row belongs in the alerts view.
    ///
    /// Only SQL NULL, the empty string, and the literal string "None" are
    /// treated as "no alert". Whitespace-only values count as set; callers
    /// wanting a trim-based rule need a product decision first.
    #[must_use]
    pub fn has_alert(&self) -> bool {
        match self.alert.as_deref() {
            None | Some("") | Some("None") => false,
            Some(_) => true,
        }
    }
}

/// The full event table as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTable {
    pub columns: Vec<String>,
    pub rows: Vec<EventRow>,
}

impl EventTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The alerts view: rows whose alert field is meaningfully set.
    ///
    /// Stable with respect to the input order and leaves `self` untouched.
    /// Applying it to its own output yields the same table.
    #[must_use]
    pub fn alerts(&self) -> EventTable {
        EventTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.has_alert())
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventRow, EventTable};

    fn row(id: i64, alert: Option<&str>) -> EventRow {
        EventRow {
            id,
            alert: alert.map(str::to_string),
            cells: vec![id.to_string(), alert.unwrap_or("").to_string()],
        }
    }

    fn table(rows: Vec<EventRow>) -> EventTable {
        EventTable {
            columns: vec!["id".to_string(), "alert".to_string()],
            rows,
        }
    }

    #[test]
    fn null_empty_and_none_literal_are_excluded() {
        assert!(!row(1, None).has_alert());
        assert!(!row(2, Some("")).has_alert());
        assert!(!row(3, Some("None")).has_alert());
    }

    #[test]
    fn set_alert_is_included() {
        assert!(row(1, Some("Fire")).has_alert());
    }

    #[test]
    fn whitespace_only_alert_is_included() {
        // Mirrors the stored-data rule: only exact "" and "None" are excluded.
        assert!(row(1, Some("   ")).has_alert());
        assert!(row(2, Some("\t")).has_alert());
    }

    #[test]
    fn case_variants_of_none_are_included() {
        assert!(row(1, Some("none")).has_alert());
        assert!(row(2, Some("NONE")).has_alert());
    }

    #[test]
    fn alerts_view_keeps_only_flagged_rows_in_order() {
        let events = table(vec![
            row(3, None),
            row(2, Some("Flood")),
            row(1, Some("")),
        ]);

        let alerts = events.alerts();
        assert_eq!(alerts.rows.len(), 1);
        assert_eq!(alerts.rows[0].id, 2);
        assert_eq!(alerts.rows[0].alert.as_deref(), Some("Flood"));
        assert_eq!(alerts.columns, events.columns);
    }

    #[test]
    fn alerts_view_never_grows_and_preserves_relative_order() {
        let events = table(vec![
            row(5, Some("Fire")),
            row(4, Some("None")),
            row(3, Some("Smoke")),
            row(2, None),
            row(1, Some("Flood")),
        ]);

        let alerts = events.alerts();
        assert!(alerts.len() <= events.len());
        let ids: Vec<i64> = alerts.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 3, 1]);
    }

    #[test]
    fn alerts_view_is_idempotent() {
        let events = table(vec![
            row(4, Some("Fire")),
            row(3, Some("")),
            row(2, Some("None")),
            row(1, Some("Flood")),
        ]);

        let once = events.alerts();
        let twice = once.alerts();
        assert_eq!(once, twice);
    }

    #[test]
    fn alerts_view_does_not_mutate_input() {
        let events = table(vec![row(2, Some("Flood")), row(1, None)]);
        let before = events.clone();
        let _ = events.alerts();
        assert_eq!(events, before);
    }

    #[test]
    fn empty_table_filters_to_empty() {
        let events = table(Vec::new());
        assert!(events.alerts().is_empty());
    }
}
