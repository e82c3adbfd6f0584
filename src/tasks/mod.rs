//! Independent leaf operations
//!
//! Each submodule is self-contained: it takes simple inputs and returns a
//! simple value (a map, a matrix, a date, a chart). Nothing is shared
//! between them.

pub mod business_day;
pub mod dns;
pub mod parabola;
pub mod performance;
pub mod random_matrix;
pub mod sum_of_squares;
pub mod traffic;
pub mod zscore;

pub use business_day::next_business_day;
pub use dns::{resolve_hostnames, HostnameMap};
pub use parabola::parabola_chart;
pub use performance::{generate_performance, PerformanceData, PerformanceReport};
pub use random_matrix::random_matrix;
pub use sum_of_squares::sum_of_squares;
pub use traffic::{generate_traffic, TrafficRecord, TrafficReport};
pub use zscore::normalize;
