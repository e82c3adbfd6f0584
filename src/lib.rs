//! # datatasks
//!
//! A set of small, independent data utilities. Each task takes simple
//! inputs and returns a simple value; nothing is shared between them.
//!
//! ## Usage
//!
//! ```bash
//! datatasks next-business-day 2022-10-22
//! datatasks traffic --hours 24 --svg traffic.svg
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based seam over the system DNS resolver
//! - `config` - Output directory, default teams and seed, log level
//! - `error` - Categorized error type with numeric codes
//! - `plot` - Chart values returned by the plotting tasks, rendered to SVG
//! - `tasks` - The leaf operations: reverse DNS, performance series,
//!   traffic CSV, z-scores, random matrices, business days, sums of squares,
//!   and the parabola chart
pub mod abstractions;
pub mod config;
pub mod error;
pub mod plot;
pub mod tasks;


pub use error::{Result, TaskError};
