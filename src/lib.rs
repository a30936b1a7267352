//! Energy-zone dashboard engine: community impact scoring, cleaner-hour
//! selection, ROI projection, and recommendation text.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Scoring, selection, and projection core.
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod recommend;
pub mod runner;
pub mod synth;
