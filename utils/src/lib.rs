//! Shared infrastructure utilities for ticonv.
//!
//! Things the IO-facing crates need but that don't belong in the domain-pure
//! `ticonv-types` crate:
//!
//! - **`atomic_write`**: crash-safe file persistence (temp + rename)

pub mod atomic_write;

pub use atomic_write::atomic_write;
