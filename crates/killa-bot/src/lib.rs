//! # Killa Bot
//!
//! Discord bot that tracks Killa kills per user: a running total, a daily
//! count with a per-user reset, and pace statistics.
//!
//! This crate wires configuration, storage and the Poise framework
//! together and owns the process lifecycle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
