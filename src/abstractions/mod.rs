//! Abstraction layers for external dependencies
//!
//! This module provides trait-based abstractions for external services
//! (the system DNS resolver) to enable testing and dependency injection.

pub mod resolver;

pub use resolver::{MockResolver, ReverseResolver, SystemResolver};
