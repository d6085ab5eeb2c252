//! # Killa Common
//!
//! Shared types, errors, and logging setup for Killa Bot.
//!
//! Every other crate in the workspace builds on the domain types defined
//! here: the Discord user newtype, kill events, and per-user reset markers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
