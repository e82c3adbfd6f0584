//! Random integer matrices whose shape comes from two pairs of factors

use crate::error::{ErrorCode, Result, TaskError};
use ndarray::Array2;
use rand::Rng;
use std::ops::Range;
use tracing::debug;

/// Values are drawn from this half-open range
pub const VALUE_RANGE: Range<i64> = 1..100;

/// `(rows, cols)` for a pair of pairs: products of each pair.
///
/// Fails when either product, or the element count, does not fit in memory
/// addressing.
pub fn shape_for(dims: [[usize; 2]; 2]) -> Result<(usize, usize)> {
    let too_large = || {
        TaskError::validation_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            format!("Matrix dimensions {:?} are too large", dims),
            Some("dims".to_string()),
        )
    };

    let rows = dims[0][0].checked_mul(dims[0][1]).ok_or_else(too_large)?;
    let cols = dims[1][0].checked_mul(dims[1][1]).ok_or_else(too_large)?;
    match rows.checked_mul(cols) {
        Some(len) if len <= isize::MAX as usize => Ok((rows, cols)),
        _ => Err(too_large()),
    }
}

/// Read the pair of pairs out of a list of lists
pub fn dims_from_lists(lists: &[Vec<usize>]) -> Result<[[usize; 2]; 2]> {
    let pair = |idx: usize| -> Result<[usize; 2]> {
        match lists.get(idx).map(Vec::as_slice) {
            Some([a, b, ..]) => Ok([*a, *b]),
            _ => Err(TaskError::validation_with_code(
                ErrorCode::VALIDATION_SHAPE_MISMATCH,
                format!("Expected sublist {} to hold at least two integers", idx),
                Some("dims".to_string()),
            )),
        }
    };

    Ok([pair(0)?, pair(1)?])
}

/// Matrix of independent uniform integers in `[1, 100)`
pub fn random_matrix<R: Rng>(dims: [[usize; 2]; 2], rng: &mut R) -> Result<Array2<i64>> {
    let shape = shape_for(dims)?;
    debug!(rows = shape.0, cols = shape.1, "Generating random matrix");
    Ok(Array2::from_shape_fn(shape, |_| rng.random_range(VALUE_RANGE)))
}
