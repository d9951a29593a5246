//! Appliance compatibility engine and inverter sizing.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
/// Selection gate, warnings, load aggregation and sizing.
pub mod engine;
pub mod io;
pub mod notify;
mod report;
pub mod rules;
pub mod selection;
#[cfg(feature = "tui")]
pub mod tui;
