//! casegen - judge test data generator
//!
//! Generates INSERT/QUERY inputs for a fixed list of subtasks plus a batch of
//! random cases, and records the reference solution's output for each.
//!
//! # Modules
//!
//! - [`testgen`] - Random source and case generator
//! - [`runner`] - Compiling and running the reference solution
//! - [`orchestrator`] - The full batch
//! - [`config`] - Batch parameters
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Error type

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod runner;
pub mod testgen;

// Convenient re-exports at crate root
pub use config::{HarnessConfig, LogConfig, Subtask};
pub use error::HarnessError;
pub use orchestrator::{BatchReport, CaseOutcome, Orchestrator};
pub use runner::{RunOutcome, Toolchain};
pub use testgen::generator::{Operation, TestCase, generate_case, generate_test};
pub use testgen::rng::CaseRng;
