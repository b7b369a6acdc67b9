use matrixpro_core::{
    params::{BoardId, CellRef, Deploy, DropPayload, EditWeek, Login, SetCell, WeekRef},
    MatrixError, Weekday, WorkItem,
};

mod common;
use common::{create_test_matrix, login};

async fn fill_cell(matrix: &matrixpro_core::Matrix, row_id: &str, day: &str, text: &str) {
    matrix
        .set_cell(&SetCell {
            row_id: row_id.to_string(),
            day: day.to_string(),
            text: text.to_string(),
        })
        .await
        .expect("Failed to set cell");
}

async fn complete_cell(matrix: &matrixpro_core::Matrix, row_id: &str, day: &str) {
    matrix
        .toggle_cell(&CellRef {
            row_id: row_id.to_string(),
            day: day.to_string(),
        })
        .await
        .expect("Failed to toggle cell");
}

#[tokio::test]
async fn test_deploy_archives_snapshot_and_carries_forward() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;

    let rows = matrix.rows().await.unwrap();
    let p1 = rows[0].id.clone();
    let p2 = rows[1].id.clone();

    fill_cell(&matrix, &p1, "monday", "Ship the release").await;
    complete_cell(&matrix, &p1, "monday").await;
    fill_cell(&matrix, &p2, "tuesday", "Unfinished migration").await;

    let (entry, next_rows) = matrix
        .deploy_week(&Deploy {
            week_range: "2026-01-12 TO 2026-01-16".to_string(),
            fresh_row_ids: None,
        })
        .await
        .unwrap();

    // The snapshot captures the pre-rollover state.
    assert_eq!(entry.week_number, 1);
    assert_eq!(entry.stats.total_tasks, 2);
    assert_eq!(entry.stats.completed_tasks, 1);
    assert_eq!(entry.stats.completion_rate, 50);
    assert_eq!(entry.stats.distribution.p1, 1);
    assert_eq!(entry.stats.distribution.p2, 1);
    assert_eq!(
        entry.rows[0].days.get(Weekday::Monday).text,
        "Ship the release"
    );

    // Completed work cleared, incomplete work carried forward verbatim.
    assert_eq!(next_rows.len(), 4);
    assert_eq!(next_rows[0].days.get(Weekday::Monday).text, "");
    assert_eq!(
        next_rows[1].days.get(Weekday::Tuesday).text,
        "Unfinished migration"
    );

    // The carried state is what the board now persists.
    let reloaded = matrix.rows().await.unwrap();
    assert_eq!(reloaded, next_rows);
    assert_eq!(reloaded[0].id, p1);
}

#[tokio::test]
async fn test_duplicate_week_range_is_rejected_without_state_change() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;

    let rows = matrix.rows().await.unwrap();
    fill_cell(&matrix, &rows[0].id, "friday", "Retro notes").await;

    let deploy = Deploy {
        week_range: "2026-01-12 TO 2026-01-16".to_string(),
        fresh_row_ids: None,
    };
    matrix.deploy_week(&deploy).await.unwrap();

    // The carried cell is still on the board; archiving the same label again
    // must fail and leave everything alone.
    let err = matrix.deploy_week(&deploy).await.unwrap_err();
    assert!(matches!(err, MatrixError::DuplicateWeek { .. }));

    assert_eq!(matrix.history().await.unwrap().len(), 1);
    let reloaded = matrix.rows().await.unwrap();
    assert_eq!(reloaded[0].days.get(Weekday::Friday).text, "Retro notes");
}

#[tokio::test]
async fn test_history_is_ordered_most_recent_first() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;

    for label in ["week one", "week two", "week three"] {
        matrix
            .deploy_week(&Deploy {
                week_range: label.to_string(),
                fresh_row_ids: None,
            })
            .await
            .unwrap();
    }

    let history = matrix.history().await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].week_range, "week three");
    assert_eq!(history[0].week_number, 3);
    assert_eq!(history[2].week_range, "week one");
    assert_eq!(history[2].week_number, 1);
}

#[tokio::test]
async fn test_fresh_row_ids_override() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;

    let before = matrix.rows().await.unwrap();
    fill_cell(&matrix, &before[0].id, "wednesday", "Carryover task").await;

    matrix
        .deploy_week(&Deploy {
            week_range: "identity week".to_string(),
            fresh_row_ids: Some(true),
        })
        .await
        .unwrap();

    let after = matrix.rows().await.unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        assert_ne!(old.id, new.id);
        assert_eq!(old.label, new.label);
    }
    assert_eq!(after[0].days.get(Weekday::Wednesday).text, "Carryover task");
}

#[tokio::test]
async fn test_show_and_edit_archived_week() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;

    let rows = matrix.rows().await.unwrap();
    fill_cell(&matrix, &rows[0].id, "monday", "Original entry").await;

    matrix
        .deploy_week(&Deploy {
            week_range: "editable week".to_string(),
            fresh_row_ids: None,
        })
        .await
        .unwrap();

    let entry = matrix
        .show_week(&WeekRef {
            week_number: 1,
            board: None,
        })
        .await
        .unwrap()
        .expect("archived week should exist");
    assert_eq!(entry.stats.completed_tasks, 0);

    // Mark the archived cell complete after the fact.
    let mut edited = entry.rows.clone();
    edited[0].days.get_mut(Weekday::Monday).completed = true;

    let updated = matrix
        .edit_week(&EditWeek {
            week_number: 1,
            rows_json: serde_json::to_string(&edited).unwrap(),
        })
        .await
        .unwrap();

    // Stats recomputed; identity untouched.
    assert_eq!(updated.stats.completed_tasks, 1);
    assert_eq!(updated.stats.completion_rate, 100);
    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.week_range, entry.week_range);
    assert_eq!(updated.timestamp, entry.timestamp);

    let err = matrix
        .edit_week(&EditWeek {
            week_number: 99,
            rows_json: "[]".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixError::WeekNotFound { week_number: 99 }));
}

#[tokio::test]
async fn test_other_boards_history_is_readable() {
    let (_tmp, matrix) = create_test_matrix().await;

    // First user archives a week.
    let first = login(&matrix).await;
    matrix
        .deploy_week(&Deploy {
            week_range: "their week".to_string(),
            fresh_row_ids: None,
        })
        .await
        .unwrap();

    // Second user logs in and browses the first user's archive.
    matrix
        .login(&Login {
            name: "Colleague".to_string(),
            email: "colleague@example.com".to_string(),
        })
        .await
        .unwrap();

    let theirs = matrix.board_history(&BoardId { id: first.id }).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].week_range, "their week");

    // Own history is empty and independent.
    assert!(matrix.history().await.unwrap().is_empty());

    let err = matrix
        .board_history(&BoardId { id: 9999 })
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixError::BoardNotFound { id: 9999 }));
}

#[tokio::test]
async fn test_drop_work_item_writes_formatted_cell() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;
    let rows = matrix.rows().await.unwrap();

    let item = WorkItem {
        id: 4217,
        title: "Improve throughput".to_string(),
        priority: 1,
        state: "Active".to_string(),
        assigned_to: "dev@example.com".to_string(),
        comments: vec!["Perf numbers look good".to_string()],
    };

    let cell = matrix
        .drop_work_item(&DropPayload {
            row_id: rows[0].id.clone(),
            day: "thursday".to_string(),
            payload: serde_json::to_string(&item).unwrap(),
        })
        .await
        .unwrap()
        .expect("payload should be accepted");

    assert!(cell.text.starts_with("[#4217] Improve throughput"));
    assert!(cell.text.contains("Latest Update:\nPerf numbers look good"));
}

#[tokio::test]
async fn test_malformed_drop_payload_is_ignored() {
    let (_tmp, matrix) = create_test_matrix().await;
    login(&matrix).await;
    let rows = matrix.rows().await.unwrap();

    let result = matrix
        .drop_work_item(&DropPayload {
            row_id: rows[0].id.clone(),
            day: "thursday".to_string(),
            payload: "{broken".to_string(),
        })
        .await
        .unwrap();
    assert!(result.is_none());

    // The grid is untouched.
    let reloaded = matrix.rows().await.unwrap();
    assert_eq!(reloaded[0].days.get(Weekday::Thursday).text, "");
}

#[tokio::test]
async fn test_deploy_requires_session() {
    let (_tmp, matrix) = create_test_matrix().await;

    let err = matrix
        .deploy_week(&Deploy {
            week_range: "nobody's week".to_string(),
            fresh_row_ids: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixError::NotLoggedIn));
}
