//! Test Case Generator
//!
//! Builds random INSERT/QUERY sequences and writes them in the judge's
//! `.in` format:
//!
//! ```text
//! 3
//! INSERT -17
//! QUERY
//! INSERT 42
//! ```
//!
//! Generation policy, per position:
//! - a QUERY is only eligible once at least one INSERT has been emitted;
//!   when eligible a fair coin decides between QUERY and INSERT
//! - an INSERT value is uniform over `[-value_range, value_range]`
//!
//! A non-empty case always carries at least one QUERY: if the coin never
//! picked one, a uniformly chosen position is overwritten with QUERY. That
//! position may hold the only INSERT before it (or be position 0), so the
//! forced QUERY is the one place where the "prior insert" rule does not hold.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::error::{HarnessError, Result};
use crate::testgen::rng::CaseRng;

pub const QUERY_KEYWORD: &str = "QUERY";
pub const INSERT_KEYWORD: &str = "INSERT";

/// Input file suffix
pub const IN_EXT: &str = "in";
/// Reference output suffix
pub const OUT_EXT: &str = "out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert(i64),
    Query,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert(x) => write!(f, "{} {}", INSERT_KEYWORD, x),
            Operation::Query => write!(f, "{}", QUERY_KEYWORD),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCaseError {
    #[error("missing operation count line")]
    MissingCount,

    #[error("invalid operation count: {0:?}")]
    InvalidCount(String),

    #[error("invalid operation at line {line}: {text:?}")]
    InvalidOperation { line: usize, text: String },

    #[error("declared {declared} operations, found {found}")]
    CountMismatch { declared: usize, found: usize },
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(QUERY_KEYWORD), None, None) => Ok(Operation::Query),
            (Some(INSERT_KEYWORD), Some(value), None) => value
                .parse()
                .map(Operation::Insert)
                .map_err(|_| s.to_string()),
            _ => Err(s.to_string()),
        }
    }
}

/// One problem instance: the declared count plus the operations in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub n: usize,
    pub ops: Vec<Operation>,
}

impl TestCase {
    pub fn query_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Operation::Query))
            .count()
    }

    pub fn insert_count(&self) -> usize {
        self.ops.len() - self.query_count()
    }

    /// Serialize in `.in` format: the count line, then one line per operation.
    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "{}", self.n)?;
        for op in &self.ops {
            writeln!(w, "{}", op)?;
        }
        w.flush()
    }
}

impl FromStr for TestCase {
    type Err = ParseCaseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut lines = s.lines();
        let count_line = lines.next().ok_or(ParseCaseError::MissingCount)?;
        let n: usize = count_line
            .trim()
            .parse()
            .map_err(|_| ParseCaseError::InvalidCount(count_line.to_string()))?;

        let ops = lines
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Operation>()
                    .map_err(|text| ParseCaseError::InvalidOperation { line: i + 2, text })
            })
            .collect::<std::result::Result<Vec<Operation>, _>>()?;

        if ops.len() != n {
            return Err(ParseCaseError::CountMismatch {
                declared: n,
                found: ops.len(),
            });
        }
        Ok(Self { n, ops })
    }
}

/// Generate `n` operations with inserts bounded by `value_range`.
pub fn generate_case(rng: &mut CaseRng, n: usize, value_range: i64) -> TestCase {
    let mut ops = Vec::with_capacity(n);
    let mut inserted = 0usize;
    let mut queries = 0usize;

    for _ in 0..n {
        // Short-circuit: no coin is drawn before the first insert
        if inserted > 0 && rng.coin() {
            ops.push(Operation::Query);
            queries += 1;
        } else {
            ops.push(Operation::Insert(rng.random(-value_range, value_range)));
            inserted += 1;
        }
    }

    if n > 0 && queries == 0 {
        let idx = rng.random(0, n as i64 - 1) as usize;
        tracing::trace!(idx, "forcing QUERY");
        ops[idx] = Operation::Query;
    }

    TestCase { n, ops }
}

/// `<base>.<ext>`, appended rather than replacing any dot already in `base`.
pub fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut s = base.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Generate a case and write it to `<base>.in`, creating or truncating it.
///
/// Returns the path written.
pub fn generate_test(
    rng: &mut CaseRng,
    base: &Path,
    n: usize,
    value_range: i64,
) -> Result<PathBuf> {
    let path = with_suffix(base, IN_EXT);
    let case = generate_case(rng, n, value_range);

    let file = File::create(&path).map_err(|e| HarnessError::io(&path, e))?;
    case.write_to(BufWriter::new(file))
        .map_err(|e| HarnessError::io(&path, e))?;

    tracing::debug!(
        path = %path.display(),
        n,
        value_range,
        inserts = case.insert_count(),
        queries = case.query_count(),
        "test case written"
    );
    Ok(path)
}
