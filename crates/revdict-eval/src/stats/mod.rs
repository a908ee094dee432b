//! Statistical summaries of evaluation runs
//!
//! # Examples
//!
//! ```
//! use revdict_eval::stats::LatencySummary;
//!
//! let latencies = vec![12.0, 9.5, 30.1, 11.0];
//! let summary = LatencySummary::from_samples(&latencies);
//! println!("Median: {}, p95: {}", summary.median, summary.p95);
//! ```

pub mod percentiles;

// Re-export main types and functions
pub use percentiles::{percentile, LatencySummary};
