//! casegen - judge test data generator
//!
//! Compiles `gpt4o.cpp` into `standard_solution`, then writes
//! `subtask{1..7}.in/.out` and `test_cases/test_case_{0..99}.in/.out` in the
//! current directory. Takes no arguments.
//!
//! Exit status is 0 once the batch completes, even if some reference runs
//! failed, and 1 if the reference does not compile or an input file cannot
//! be written.

use std::process::ExitCode;

use anyhow::Context;

use casegen::config::HarnessConfig;
use casegen::logging::init_logging;
use casegen::orchestrator::{BatchReport, Orchestrator};

fn run(config: HarnessConfig) -> anyhow::Result<BatchReport> {
    let mut orchestrator = Orchestrator::new(config);
    tracing::info!(seed = orchestrator.seed(), "random source ready");

    let source = orchestrator.config().solution_source.clone();
    orchestrator
        .run()
        .with_context(|| format!("test generation with {} aborted", source.display()))
}

fn main() -> ExitCode {
    let config = HarnessConfig::default();
    let _log_guard = init_logging(&config.logging);

    match run(config) {
        Ok(report) => {
            println!("\n{}", report.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
