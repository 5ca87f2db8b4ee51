//! Reference Solution Runner
//!
//! Compiles the reference source and runs the resulting binary against
//! generated inputs. Every child process is spawned directly with an
//! explicit argument list; stdin and stdout are wired to files, never
//! through a shell.
//!
//! Runs block until the child exits. There is no timeout, so a reference
//! solution that never terminates stalls the caller.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

pub const SOURCE_PLACEHOLDER: &str = "{source}";
pub const BINARY_PLACEHOLDER: &str = "{binary}";

/// Compiler invocation. Each argument is passed as-is after substituting
/// `{source}` and `{binary}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler: String,
    pub compile_args: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: "g++".to_string(),
            compile_args: vec![
                "-O2".to_string(),
                "-std=c++17".to_string(),
                SOURCE_PLACEHOLDER.to_string(),
                "-o".to_string(),
                BINARY_PLACEHOLDER.to_string(),
            ],
        }
    }
}

impl Toolchain {
    /// Expanded argument list for compiling `source` into `binary`.
    pub fn args_for(&self, source: &Path, binary: &Path) -> Vec<String> {
        let source = source.to_string_lossy();
        let binary = binary.to_string_lossy();
        self.compile_args
            .iter()
            .map(|arg| {
                arg.replace(SOURCE_PLACEHOLDER, &source)
                    .replace(BINARY_PLACEHOLDER, &binary)
            })
            .collect()
    }

    /// Compile `source` into `binary`.
    ///
    /// Compiler stdout is discarded and stderr passes through so diagnostics
    /// stay visible; only the exit status decides the result. A compiler
    /// that cannot be launched counts as a failed compilation.
    pub fn compile(&self, source: &Path, binary: &Path) -> Result<()> {
        let args = self.args_for(source, binary);
        tracing::debug!(compiler = %self.compiler, ?args, "compiling");

        let status = Command::new(&self.compiler)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| HarnessError::Compile {
                source_file: source.to_path_buf(),
                reason: format!("cannot run {}: {}", self.compiler, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(HarnessError::Compile {
                source_file: source.to_path_buf(),
                reason: status.to_string(),
            })
        }
    }
}

/// A successful reference run.
#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub elapsed: Duration,
}

/// Path suitable for `Command::new`: a bare file name would be looked up on
/// `PATH`, so it is anchored to the current directory instead.
pub fn executable_path(binary: &Path) -> PathBuf {
    if binary.components().count() == 1 && !binary.is_absolute() {
        Path::new(".").join(binary)
    } else {
        binary.to_path_buf()
    }
}

/// Run `binary` with `input` as stdin and `output` (created or truncated) as
/// stdout. Stderr is inherited.
pub fn run_solution(binary: &Path, input: &Path, output: &Path) -> Result<RunOutcome> {
    let stdin = File::open(input).map_err(|e| HarnessError::io(input, e))?;
    let stdout = File::create(output).map_err(|e| HarnessError::io(output, e))?;
    let program = executable_path(binary);

    let start = Instant::now();
    let status = Command::new(&program)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .status()
        .map_err(|e| HarnessError::Spawn { program, source: e })?;
    let elapsed = start.elapsed();

    if status.success() {
        Ok(RunOutcome { elapsed })
    } else {
        Err(HarnessError::Runtime { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toolchain_args() {
        let tc = Toolchain::default();
        let args = tc.args_for(Path::new("gpt4o.cpp"), Path::new("standard_solution"));
        assert_eq!(tc.compiler, "g++");
        assert_eq!(
            args,
            vec!["-O2", "-std=c++17", "gpt4o.cpp", "-o", "standard_solution"]
        );
    }

    #[test]
    fn test_args_keep_spaces_intact() {
        // No shell: a path with spaces stays a single argument
        let tc = Toolchain {
            compiler: "cc".to_string(),
            compile_args: vec!["{source}".to_string(), "-o{binary}".to_string()],
        };
        let args = tc.args_for(Path::new("my solution.c"), Path::new("out bin"));
        assert_eq!(args, vec!["my solution.c", "-oout bin"]);
    }

    #[test]
    fn test_missing_compiler_is_compile_error() {
        let tc = Toolchain {
            compiler: "casegen-definitely-not-a-compiler".to_string(),
            compile_args: vec![],
        };
        let err = tc
            .compile(Path::new("gpt4o.cpp"), Path::new("standard_solution"))
            .unwrap_err();
        assert!(matches!(err, HarnessError::Compile { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_executable_path_anchoring() {
        assert_eq!(
            executable_path(Path::new("standard_solution")),
            PathBuf::from("./standard_solution")
        );
        assert_eq!(
            executable_path(Path::new("build/standard_solution")),
            PathBuf::from("build/standard_solution")
        );
        assert_eq!(
            executable_path(Path::new("/usr/bin/cat")),
            PathBuf::from("/usr/bin/cat")
        );
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = run_solution(
            Path::new("standard_solution"),
            Path::new("target/casegen_missing_input.in"),
            Path::new("target/casegen_missing_input.out"),
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_redirects_and_reports_status() {
        let dir = PathBuf::from(format!("target/test_runner_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let input = dir.join("a.in");
        let output = dir.join("a.out");
        std::fs::write(&input, "1\nQUERY\n").unwrap();

        run_solution(Path::new("/bin/cat"), &input, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1\nQUERY\n");

        let err = run_solution(Path::new("/bin/false"), &input, &output).unwrap_err();
        assert!(matches!(err, HarnessError::Runtime { .. }));
        assert!(!err.is_fatal());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
