//! Batch Orchestrator
//!
//! Drives one full generation run:
//!
//! ```text
//! ┌───────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────┐
//! │  Compile  │───▶│ Fixed        │───▶│ Random cases │───▶│ Done │
//! │ reference │    │ subtasks     │    │ test_cases/  │    └──────┘
//! └───────────┘    └──────────────┘    └──────────────┘
//!       │ fail
//!       ▼
//!    Abort (nothing generated)
//! ```
//!
//! Each case is generate `.in` → run reference → `.out`. A reference
//! failure is reported and the batch moves on; nothing is retried. A `.in`
//! that cannot be written aborts the whole batch.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::runner::run_solution;
use crate::testgen::generator::{OUT_EXT, generate_test, with_suffix};
use crate::testgen::rng::CaseRng;

/// Result of one generate-and-run cycle.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub n: usize,
    pub value_range: i64,
    /// Reference run time, present on success
    pub elapsed: Option<Duration>,
    /// Failure description, present on failure
    pub error: Option<String>,
}

impl CaseOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub seed: u64,
    pub cases: Vec<CaseOutcome>,
    pub total_time: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.cases.iter().filter(|c| c.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| !c.succeeded())
    }

    pub fn summary(&self) -> String {
        let slowest = self
            .cases
            .iter()
            .filter_map(|c| c.elapsed.map(|e| (e, c.name.as_str())))
            .max_by_key(|(e, _)| *e);

        let mut out = format!(
            r#"=== Generation Summary ===
Seed: {}
Cases: {}
  Succeeded: {}
  Failed: {}
Total Time: {:.2?}
"#,
            self.seed,
            self.cases.len(),
            self.succeeded(),
            self.failed(),
            self.total_time,
        );
        if let Some((elapsed, name)) = slowest {
            out.push_str(&format!("Slowest Run: {} ({:.2?})\n", name, elapsed));
        }
        out
    }
}

pub struct Orchestrator {
    config: HarnessConfig,
    rng: CaseRng,
}

impl Orchestrator {
    /// Uses the configured seed when present, the clock otherwise.
    pub fn new(config: HarnessConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => CaseRng::with_seed(seed),
            None => CaseRng::from_time(),
        };
        Self { config, rng }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the whole batch.
    ///
    /// Returns `Err` only for fatal conditions: invalid configuration, a
    /// failed compilation, or a `.in` file that cannot be written.
    pub fn run(&mut self) -> Result<BatchReport> {
        self.config.validate()?;
        let start = Instant::now();
        tracing::info!(seed = self.seed(), "starting batch");

        self.compile()?;

        let mut cases = Vec::with_capacity(self.config.subtasks.len() + self.config.random_cases);

        let subtasks = self.config.subtasks.clone();
        for subtask in &subtasks {
            let base = self.config.resolve(Path::new(&subtask.name));
            cases.push(self.run_case(&subtask.name, &base, subtask.n, subtask.value_range)?);
        }

        let case_dir = self.config.resolve(&self.config.test_case_dir);
        std::fs::create_dir_all(&case_dir).map_err(|e| {
            eprintln!("❌ Failed to create {}: {}", case_dir.display(), e);
            HarnessError::io(&case_dir, e)
        })?;

        let (n_lo, n_hi) = self.config.random_n;
        let (r_lo, r_hi) = self.config.random_value_range;
        for i in 0..self.config.random_cases {
            let file_name = format!("{}{}", self.config.test_case_prefix, i);
            let label = self.config.test_case_dir.join(&file_name);
            let base = case_dir.join(&file_name);

            let n = self.rng.random(n_lo, n_hi) as usize;
            let value_range = self.rng.random(r_lo, r_hi);
            cases.push(self.run_case(&label.to_string_lossy(), &base, n, value_range)?);
        }

        println!(
            "\n🎉 All .in and .out files generated using {}.",
            self.config.solution_source.display()
        );

        let report = BatchReport {
            seed: self.seed(),
            cases,
            total_time: start.elapsed(),
        };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        Ok(report)
    }

    fn compile(&self) -> Result<()> {
        let source = self.config.resolve(&self.config.solution_source);
        let binary = self.config.resolve(&self.config.solution_binary);

        println!("🔧 Compiling standard solution...");
        if let Err(e) = self.config.toolchain.compile(&source, &binary) {
            eprintln!(
                "❌ Compilation failed for {}",
                self.config.solution_source.display()
            );
            tracing::error!(error = %e, "compilation failed");
            return Err(e);
        }
        println!("✅ Compilation complete.");
        Ok(())
    }

    fn run_case(
        &mut self,
        label: &str,
        base: &Path,
        n: usize,
        value_range: i64,
    ) -> Result<CaseOutcome> {
        let input = generate_test(&mut self.rng, base, n, value_range).map_err(|e| {
            eprintln!("❌ {}", e);
            e
        })?;
        let output = with_suffix(base, OUT_EXT);
        let binary = self.binary_path();

        let mut outcome = CaseOutcome {
            name: label.to_string(),
            n,
            value_range,
            elapsed: None,
            error: None,
        };

        match run_solution(&binary, &input, &output) {
            Ok(run) => {
                println!("✅ {}.out generated", label);
                tracing::debug!(case = label, elapsed = ?run.elapsed, "reference run ok");
                outcome.elapsed = Some(run.elapsed);
            }
            Err(e) => {
                eprintln!("❌ Runtime error on: {}", label);
                tracing::warn!(case = label, error = %e, "reference run failed");
                outcome.error = Some(e.to_string());
            }
        }
        Ok(outcome)
    }

    fn binary_path(&self) -> PathBuf {
        self.config.resolve(&self.config.solution_binary)
    }
}
