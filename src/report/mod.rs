// Report module for CI test result summaries
//
// This module turns parsed JUnit runs into a markdown report sized to fit
// a CI annotation.

pub mod formatter;
pub mod generator;
pub mod sections;

// Re-export main types
pub use generator::{generate_report, generate_report_from_files, ReportGenerator};

use crate::error::{ReportError, Result};
use crate::junit::TestRun;
use serde::{Deserialize, Serialize};

/// Largest report that fits into a single CI annotation (1 MiB)
pub const DEFAULT_SIZE_LIMIT: usize = 1024 * 1024;

pub const SEE_BUILD_FILE_STR: &str = "Download the build's log file to see the details.";

pub const UNRELATED_FAILURES_STR: &str = "If these failures are unrelated to your changes (for example \
tests are broken or flaky at HEAD), please open an issue at \
https://github.com/llvm/llvm-project/issues and add the \
`infrastructure` label.";

/// Configuration options for report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Maximum size of the encoded report in bytes.
    /// Default: 1 MiB. A report over this size is regenerated without
    /// failure details.
    pub size_limit: usize,

    /// Whether failing tests are listed with their output.
    /// Default: true
    pub list_failures: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            list_failures: true,
        }
    }
}

impl ReportOptions {
    /// Validates the report options.
    ///
    /// # Validation Rules
    /// - `size_limit`: Must be greater than 0
    ///
    /// # Example
    /// ```
    /// use junit_report::report::ReportOptions;
    ///
    /// let options = ReportOptions {
    ///     size_limit: 64 * 1024,
    ///     ..Default::default()
    /// };
    /// assert!(options.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.size_limit == 0 {
            return Err(ReportError::InvalidOptions(
                "size_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregate test counts across every suite of every run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub tests_run: u64,
    pub tests_skipped: u64,
    pub tests_failed: u64,
    /// `tests_run - tests_skipped - tests_failed`; negative when the
    /// input counts are inconsistent
    pub tests_passed: i64,
}

impl TestSummary {
    pub fn from_runs(runs: &[TestRun]) -> Self {
        let mut summary = TestSummary::default();
        for suite in runs.iter().flatten() {
            summary.tests_run = summary.tests_run.saturating_add(suite.tests);
            summary.tests_skipped = summary.tests_skipped.saturating_add(suite.skipped);
            summary.tests_failed = summary.tests_failed.saturating_add(suite.failures);
        }
        summary.tests_passed = to_signed(summary.tests_run)
            .saturating_sub(to_signed(summary.tests_skipped))
            .saturating_sub(to_signed(summary.tests_failed));
        summary
    }
}

fn to_signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// A failing test as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTest {
    /// `classname/name`
    pub name: String,
    pub output: String,
}

/// Failing tests of all suites sharing one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureGroup {
    pub suite: String,
    pub tests: Vec<FailedTest>,
}

/// Collects failing tests grouped by suite name.
///
/// Groups appear in the order their suite name is first seen, and tests
/// keep their encounter order within a group. Suites with the same name in
/// different runs share a group. Only cases that failed with captured
/// output are listed; errors and skips are not.
pub fn collect_failures(runs: &[TestRun]) -> Vec<FailureGroup> {
    let mut groups: Vec<FailureGroup> = Vec::new();

    for suite in runs.iter().flatten() {
        for case in &suite.cases {
            let Some(output) = case.failure_text() else {
                continue;
            };
            let failed = FailedTest {
                name: case.qualified_name(),
                output: output.to_string(),
            };
            match groups.iter_mut().find(|g| g.suite == suite.name) {
                Some(group) => group.tests.push(failed),
                None => groups.push(FailureGroup {
                    suite: suite.name.clone(),
                    tests: vec![failed],
                }),
            }
        }
    }

    groups
}
