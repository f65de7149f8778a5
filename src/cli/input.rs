//! Matrix input files

use crate::error::{MatcacheError, MatcacheResult};
use crate::matrix::Matrix;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Read a matrix stored as a JSON array of rows
pub async fn load_matrix(path: &Path) -> MatcacheResult<Matrix> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| MatcacheError::io(format!("reading matrix from {}", path.display()), e))?;

    let matrix: Matrix =
        serde_json::from_str(&content).map_err(|e| MatcacheError::MatrixInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(
        "Loaded {}x{} matrix from {}",
        matrix.rows(),
        matrix.cols(),
        path.display()
    );
    Ok(matrix)
}
