//! # Killa Commands
//!
//! Discord slash commands, button routing and the message view for Killa
//! Bot, built on the Poise framework.
//!
//! Commands are collected into a [`CommandRegistry`] at startup; button
//! presses on a counter message are routed through [`handle_component`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod buttons;
pub mod framework;
pub mod killa;
pub mod message;
pub mod registry;
pub mod utility;

pub use buttons::*;
pub use framework::*;
pub use message::*;
pub use registry::*;
