//! State module for tracking run progress
//!
//! # Components
//!
//! - `RunPhase`: The phase a crawl run is in, from initialization through
//!   cleanup of the fetch session

mod run_phase;

pub use run_phase::RunPhase;
