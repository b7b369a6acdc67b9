use matrixpro_core::{params::Login, Matrix, MatrixBuilder};
use tempfile::TempDir;

/// Helper function to create a test coordinator
pub async fn create_test_matrix() -> (TempDir, Matrix) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let matrix = MatrixBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create matrix");
    (temp_dir, matrix)
}

/// Helper to log the default test identity in
pub async fn login(matrix: &Matrix) -> matrixpro_core::Board {
    matrix
        .login(&Login {
            name: "Dev".to_string(),
            email: "dev@example.com".to_string(),
        })
        .await
        .expect("Failed to log in")
}
