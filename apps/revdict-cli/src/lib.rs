//! Reverse dictionary command-line front end
//!
//! Wires the corpus builder, the keyword index, the post-processor and the
//! evaluation harness together behind three commands: `build`, `evaluate`
//! and `query`.

pub mod commands;

pub use commands::{build_index, evaluate, query, BuildOptions, EvaluateOptions};
