//! Column-wise z-score normalization

use crate::error::{ErrorCode, Result, TaskError};
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Build a 2D matrix from row vectors, rejecting ragged input
pub fn matrix_from_rows(rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map(Vec::len).unwrap_or(0);

    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(TaskError::validation_with_code(
            ErrorCode::VALIDATION_SHAPE_MISMATCH,
            format!(
                "Row {} has {} columns, expected {}",
                idx,
                row.len(),
                n_cols
            ),
            Some("matrix".to_string()),
        ));
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
}

/// Normalize every column to zero mean and unit population standard deviation.
///
/// A constant column has no spread to scale by and comes out as all zeros, as
/// does any other value that would be NaN or infinite.
pub fn normalize<S, A>(matrix: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = A>,
    A: Copy + Into<f64>,
{
    let mut normalized: Array2<f64> = matrix.mapv(|v| v.into());

    for mut column in normalized.columns_mut() {
        let n = column.len();
        if n == 0 {
            continue;
        }

        let first = column[0];
        if column.iter().all(|v| *v == first) {
            column.fill(0.0);
            continue;
        }

        let mean = column.sum() / n as f64;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let std_dev = variance.sqrt();

        column.mapv_inplace(|v| {
            let z = (v - mean) / std_dev;
            if z.is_finite() {
                z
            } else {
                0.0
            }
        });
    }

    normalized
}
