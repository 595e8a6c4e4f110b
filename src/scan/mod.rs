//! Installation discovery.
//!
//! - [`catalog`] - The roots a scan walks
//! - [`scanner`] - The walk itself, gating and deduplication

pub mod catalog;
pub mod scanner;

pub use catalog::{default_roots, PathCatalog};
pub use scanner::{scan_roots, Scanner};
