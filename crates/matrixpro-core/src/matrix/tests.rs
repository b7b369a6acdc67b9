//! Unit tests for the coordinator.

use tempfile::TempDir;

use super::*;
use crate::{
    error::MatrixError,
    params::{AddRow, CellRef, Login, RowId, SetCell, UpdateRow, UpdateSettings},
};

async fn test_matrix() -> (TempDir, Matrix) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let matrix = MatrixBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create matrix");
    (temp_dir, matrix)
}

fn login_params() -> Login {
    Login {
        name: "Dev".to_string(),
        email: "dev@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_operations_require_a_session() {
    let (_tmp, matrix) = test_matrix().await;

    let err = matrix.rows().await.unwrap_err();
    assert!(matches!(err, MatrixError::NotLoggedIn));

    let err = matrix.current_board().await.unwrap_err();
    assert!(matches!(err, MatrixError::NotLoggedIn));
}

#[tokio::test]
async fn test_login_seeds_starter_rows_and_session() {
    let (_tmp, matrix) = test_matrix().await;

    let board = matrix.login(&login_params()).await.unwrap();
    assert_eq!(board.email, "dev@example.com");

    let current = matrix.current_board().await.unwrap();
    assert_eq!(current.id, board.id);

    let rows = matrix.rows().await.unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].label, "STRATEGIC INITIATIVES");
    assert_eq!(rows[3].effort_label, "5%");
}

#[tokio::test]
async fn test_login_twice_reuses_the_board() {
    let (_tmp, matrix) = test_matrix().await;

    let first = matrix.login(&login_params()).await.unwrap();
    // Email lookup is case-insensitive; the stored name wins.
    let second = matrix
        .login(&Login {
            name: "Someone Else".to_string(),
            email: "DEV@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(matrix.list_boards().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_clears_the_session() {
    let (_tmp, matrix) = test_matrix().await;

    matrix.login(&login_params()).await.unwrap();
    matrix.logout().await.unwrap();

    let err = matrix.rows().await.unwrap_err();
    assert!(matches!(err, MatrixError::NotLoggedIn));
}

#[tokio::test]
async fn test_add_update_and_remove_row() {
    let (_tmp, matrix) = test_matrix().await;
    matrix.login(&login_params()).await.unwrap();

    let row = matrix
        .add_row(&AddRow {
            group: "p2".to_string(),
            label: Some("Refactor importer".to_string()),
            effort_label: None,
        })
        .await
        .unwrap();
    assert_eq!(row.label, "Refactor importer");
    assert_eq!(row.effort_label, "10%");

    let rows = matrix.rows().await.unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows.last().unwrap().id, row.id);

    let updated = matrix
        .update_row(&UpdateRow {
            id: row.id.clone(),
            label: None,
            effort_label: Some("25%".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(updated.effort_label, "25%");
    assert_eq!(updated.label, "Refactor importer");

    matrix.remove_row(&RowId { id: row.id }).await.unwrap();
    assert_eq!(matrix.rows().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_remove_unknown_row_fails() {
    let (_tmp, matrix) = test_matrix().await;
    matrix.login(&login_params()).await.unwrap();

    let err = matrix
        .remove_row(&RowId {
            id: "missing".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixError::RowNotFound { .. }));
}

#[tokio::test]
async fn test_set_toggle_and_clear_cell() {
    let (_tmp, matrix) = test_matrix().await;
    matrix.login(&login_params()).await.unwrap();
    let rows = matrix.rows().await.unwrap();
    let row_id = rows[0].id.clone();

    let cell = matrix
        .set_cell(&SetCell {
            row_id: row_id.clone(),
            day: "monday".to_string(),
            text: "Write design note".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(cell.text, "Write design note");
    assert!(!cell.completed);

    let cell = matrix
        .toggle_cell(&CellRef {
            row_id: row_id.clone(),
            day: "monday".to_string(),
        })
        .await
        .unwrap();
    assert!(cell.completed);

    let cell = matrix
        .clear_cell(&CellRef {
            row_id: row_id.clone(),
            day: "monday".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(cell.text, "");
    assert!(!cell.completed);
}

#[tokio::test]
async fn test_settings_update_merges_partial_changes() {
    let (_tmp, matrix) = test_matrix().await;
    matrix.login(&login_params()).await.unwrap();

    let defaults = matrix.settings().await.unwrap();
    assert_eq!(defaults.company_email, "dev@example.com");
    assert!(defaults.preserve_row_identity);

    let updated = matrix
        .update_settings(&UpdateSettings {
            organization: Some("Aptean".to_string()),
            project: Some("EDIOne".to_string()),
            preserve_row_identity: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.organization, "Aptean");
    assert!(!updated.preserve_row_identity);
    // Untouched fields survive the merge.
    assert_eq!(updated.company_email, "dev@example.com");

    let reloaded = matrix.settings().await.unwrap();
    assert_eq!(reloaded, updated);
}
