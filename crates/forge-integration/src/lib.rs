//! Forge Integration - Scan backend API client
//!
//! Posts captured images to the classification backend and normalizes the
//! vision/flavor responses for the game layer. All requests run on a
//! background runtime and are polled from the frame loop.

pub mod client;
pub mod error;
pub mod scan;
pub mod types;

pub use client::{PendingRequest, ScanClient, DEFAULT_BASE_URL};
pub use error::ScanError;
pub use scan::ScanApi;
pub use types::{
    Flavor, FlavorWire, ItemStats, ScanAnalysis, ScanMode, ScanResponseWire, ScanResult,
    FALLBACK_STAT_POOL,
};
