//! Freight Simulation Library
//!
//! A tile-grid logistics simulation library that can run independently or
//! with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
