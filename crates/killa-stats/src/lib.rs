//! # Killa Stats
//!
//! Pure statistics over a user's kill timeline, plus the formatting
//! contracts used to present them.
//!
//! Nothing in this crate performs I/O: callers supply the events, the
//! user's reset marker, and the current instant.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod boundary;
pub mod engine;
pub mod format;

pub use boundary::*;
pub use engine::*;
pub use format::*;
