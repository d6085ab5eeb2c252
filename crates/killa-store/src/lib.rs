//! # Killa Store
//!
//! Durable storage for kill events and reset markers, and the tracker that
//! recomputes stats after every mutation.
//!
//! Storage sits behind the [`KillStore`] trait so the tracker can be driven
//! by SQLite in production and by an in-memory store or a mock in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod tracker;

pub use clock::*;
pub use memory::*;
pub use sqlite::*;
pub use store::*;
pub use tracker::*;
