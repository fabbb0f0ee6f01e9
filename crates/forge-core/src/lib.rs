//! Forge Core - Frame clock and core types for Forgeworld
//!
//! This crate provides the foundations the combat simulation is built on:
//! - The frame clock that turns host-provided timestamps into clamped deltas
//! - Entity identifier types

pub mod time;
pub mod types;

pub use time::{ClockConfig, FrameClock};
pub use types::MonsterId;
