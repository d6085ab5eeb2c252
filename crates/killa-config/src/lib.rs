//! # Killa Config
//!
//! Type-safe configuration for Killa Bot.
//!
//! Configuration is read from a YAML file (or built from defaults), then
//! overridden from environment variables and validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
