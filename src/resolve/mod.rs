//! Active installation resolution.
//!
//! - [`active`] - The three-signal resolver
//! - [`locate`] - Asking the OS where the interpreter resolves to

pub mod active;
pub mod locate;

pub use active::{ActiveResolver, Resolution, Tier};
