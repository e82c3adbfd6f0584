//! Chart of the parabola y = x^2

use crate::plot::{Chart, Series};
use ndarray::Array1;

pub const X_MIN: f64 = -10.0;
pub const X_MAX: f64 = 10.0;
pub const POINTS: usize = 400;

/// 400 evenly spaced samples of `y = x^2` over `[-10, 10]`, gridded
pub fn parabola_chart() -> Chart {
    let xs = Array1::linspace(X_MIN, X_MAX, POINTS);
    let points = xs.iter().map(|x| (*x, x * x)).collect();

    Chart::new()
        .with_title("y = x^2")
        .with_axis_labels("x", "y")
        .with_grid(true)
        .add_series(Series::new("y = x^2", points))
}
