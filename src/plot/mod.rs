//! Line charts returned by the plotting tasks
//!
//! A [`Chart`] is a plain value describing what was plotted. It can be
//! inspected directly (titles, labels, series data) or rendered to SVG.

pub mod chart;

pub use chart::{Chart, Series};
