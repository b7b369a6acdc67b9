//! Week archival and carry-forward.
//!
//! The functions here are the synchronous heart of the deploy operation:
//! given the current rows and the existing archive, produce the frozen
//! snapshot for the week being closed plus the starting row set for the next
//! week. Persistence is someone else's job ([`crate::db`] commits both halves
//! in one transaction); everything in this module is pure.
//!
//! The carry-forward rule: a completed cell is considered done and resets to
//! an empty cell; an incomplete cell (including blank ones) is retained
//! verbatim, so unfinished work follows the user into the next week.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    error::{MatrixError, Result},
    models::{calculate_stats, DayState, HistoryEntry, PlannerRow},
};

/// Identity policy applied to rows when a week rolls over.
///
/// With `preserve_row_identity` set, rows keep their ids across the
/// transition, making "this row across history" a meaningful reference.
/// Without it, every row receives a fresh id while its content carries
/// forward unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverPolicy {
    pub preserve_row_identity: bool,
}

impl Default for RolloverPolicy {
    fn default() -> Self {
        Self {
            preserve_row_identity: true,
        }
    }
}

/// Applies the carry-forward rule to every cell of every row.
///
/// The returned row set has the same count and ordering as the input; rows
/// are never dropped or added by rollover itself.
pub fn carry_forward(rows: &[PlannerRow], policy: RolloverPolicy) -> Vec<PlannerRow> {
    rows.iter()
        .map(|row| {
            let mut next = row.clone();
            if !policy.preserve_row_identity {
                next.id = crate::models::new_row_id();
            }
            for day in crate::models::Weekday::ALL {
                let cell = next.days.get_mut(day);
                if cell.completed {
                    *cell = DayState::default();
                }
            }
            next
        })
        .collect()
}

/// Archives the current week and derives the next week's starting rows.
///
/// The snapshot's stats are computed over the pre-rollover rows, so a fully
/// completed week archives at 100% even though every one of its cells is
/// cleared in the returned next-week set. `week_number` counts archives made
/// (existing entries plus one), not calendar weeks.
///
/// # Errors
///
/// Returns `MatrixError::InvalidInput` when the range label is blank and
/// `MatrixError::DuplicateWeek` when an entry with the same label already
/// exists; in both cases nothing is produced.
pub fn archive_week(
    rows: &[PlannerRow],
    history: &[HistoryEntry],
    week_range: &str,
    policy: RolloverPolicy,
) -> Result<(HistoryEntry, Vec<PlannerRow>)> {
    let week_range = week_range.trim();
    if week_range.is_empty() {
        return Err(MatrixError::invalid_input(
            "week_range",
            "Week range label must not be empty",
        ));
    }

    if history.iter().any(|entry| entry.week_range == week_range) {
        return Err(MatrixError::DuplicateWeek {
            week_range: week_range.to_string(),
        });
    }

    let entry = HistoryEntry {
        id: Uuid::new_v4().to_string(),
        week_number: history.len() as u32 + 1,
        week_range: week_range.to_string(),
        timestamp: Timestamp::now(),
        rows: rows.to_vec(),
        stats: calculate_stats(rows),
    };

    let next_rows = carry_forward(rows, policy);
    Ok((entry, next_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityGroup, Weekday};

    fn sample_rows() -> Vec<PlannerRow> {
        let mut done = PlannerRow::new(PriorityGroup::P1);
        done.label = "Done work".to_string();
        done.days.get_mut(Weekday::Monday).text = "Ship release".to_string();
        done.days.get_mut(Weekday::Monday).completed = true;

        let mut open = PlannerRow::new(PriorityGroup::P2);
        open.label = "Open work".to_string();
        open.days.get_mut(Weekday::Tuesday).text = "Unfinished".to_string();

        vec![done, open]
    }

    #[test]
    fn test_completed_cells_reset_and_incomplete_cells_survive() {
        let rows = sample_rows();
        let next = carry_forward(&rows, RolloverPolicy::default());

        assert_eq!(next.len(), rows.len());
        let monday = next[0].days.get(Weekday::Monday);
        assert_eq!(monday.text, "");
        assert!(!monday.completed);

        let tuesday = next[1].days.get(Weekday::Tuesday);
        assert_eq!(tuesday.text, "Unfinished");
        assert!(!tuesday.completed);
    }

    #[test]
    fn test_fully_completed_week_rolls_to_blank_grid() {
        let mut rows = sample_rows();
        for row in &mut rows {
            for day in Weekday::ALL {
                let cell = row.days.get_mut(day);
                if cell.is_filled() {
                    cell.completed = true;
                }
            }
        }

        let (entry, next) =
            archive_week(&rows, &[], "2026-01-12 TO 2026-01-16", RolloverPolicy::default())
                .unwrap();

        // The snapshot reflects the pre-rollover state.
        assert_eq!(entry.stats.completion_rate, 100);
        assert_eq!(entry.rows[0].days.get(Weekday::Monday).text, "Ship release");

        for row in &next {
            for (_, cell) in row.days.iter() {
                assert_eq!(*cell, crate::models::DayState::default());
            }
        }
    }

    #[test]
    fn test_row_identity_preserved_by_default() {
        let rows = sample_rows();
        let next = carry_forward(&rows, RolloverPolicy::default());
        for (before, after) in rows.iter().zip(&next) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.label, after.label);
            assert_eq!(before.effort_label, after.effort_label);
            assert_eq!(before.priority_group, after.priority_group);
        }
    }

    #[test]
    fn test_fresh_id_policy_regenerates_ids_but_keeps_content() {
        let rows = sample_rows();
        let next = carry_forward(
            &rows,
            RolloverPolicy {
                preserve_row_identity: false,
            },
        );
        for (before, after) in rows.iter().zip(&next) {
            assert_ne!(before.id, after.id);
            assert_eq!(before.label, after.label);
        }
        // Carried cells are still retained under the fresh-id policy.
        assert_eq!(next[1].days.get(Weekday::Tuesday).text, "Unfinished");
    }

    #[test]
    fn test_archive_empty_row_set_is_permitted() {
        let (entry, next) =
            archive_week(&[], &[], "2026-02-02 TO 2026-02-06", RolloverPolicy::default()).unwrap();
        assert_eq!(entry.stats.total_tasks, 0);
        assert_eq!(entry.stats.completion_rate, 0);
        assert_eq!(entry.week_number, 1);
        assert!(next.is_empty());
    }

    #[test]
    fn test_duplicate_week_range_is_rejected() {
        let rows = sample_rows();
        let (first, _) =
            archive_week(&rows, &[], "2026-01-12 TO 2026-01-16", RolloverPolicy::default())
                .unwrap();

        let err = archive_week(
            &rows,
            &[first],
            "2026-01-12 TO 2026-01-16",
            RolloverPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::DuplicateWeek { .. }));
    }

    #[test]
    fn test_blank_week_range_is_rejected() {
        let err =
            archive_week(&[], &[], "   ", RolloverPolicy::default()).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidInput { .. }));
    }

    #[test]
    fn test_week_number_counts_existing_archives() {
        let rows = sample_rows();
        let (first, _) =
            archive_week(&rows, &[], "week one", RolloverPolicy::default()).unwrap();
        let (second, _) =
            archive_week(&rows, &[first.clone()], "week two", RolloverPolicy::default()).unwrap();
        assert_eq!(first.week_number, 1);
        assert_eq!(second.week_number, 2);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_rollover_preserves_row_count_and_order() {
        let rows = sample_rows();
        let (_, next) =
            archive_week(&rows, &[], "ordered week", RolloverPolicy::default()).unwrap();
        let labels: Vec<&str> = next.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Done work", "Open work"]);
    }
}
