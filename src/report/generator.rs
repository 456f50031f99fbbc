// Report generator - turns parsed JUnit runs into a markdown report

use std::path::Path;

use super::sections;
use super::{collect_failures, formatter, FailureGroup, ReportOptions, TestSummary};
use crate::error::Result;
use crate::junit::{self, TestRun};

/// Report generator configured once with size and listing options
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    /// Create a generator, rejecting invalid options
    pub fn new(options: ReportOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn generate(&self, title: &str, return_code: i32, runs: &[TestRun]) -> String {
        generate_report(
            title,
            return_code,
            runs,
            self.options.size_limit,
            self.options.list_failures,
        )
    }

    /// Parse every file and generate a report; the first unreadable or
    /// malformed file aborts with its error
    pub fn generate_from_files<P: AsRef<Path>>(
        &self,
        title: &str,
        return_code: i32,
        paths: &[P],
    ) -> Result<String> {
        let runs = parse_all(paths)?;
        Ok(self.generate(title, return_code, &runs))
    }
}

/// Generate a markdown report for a set of test runs.
///
/// If the encoded report is larger than `size_limit` bytes and failures were
/// listed, it is generated again without failure details. The second
/// attempt is small and fixed-size, so no more than two attempts are made.
/// A `size_limit` smaller than the degraded report is not enforced.
pub fn generate_report(
    title: &str,
    return_code: i32,
    runs: &[TestRun],
    size_limit: usize,
    list_failures: bool,
) -> String {
    let summary = TestSummary::from_runs(runs);
    let failures = collect_failures(runs);

    let attempts: &[bool] = if list_failures { &[true, false] } else { &[false] };
    let mut report = String::new();

    for &list in attempts {
        report = render(title, return_code, &summary, &failures, list);
        if report.len() <= size_limit {
            break;
        }
        tracing::warn!(
            size = report.len(),
            size_limit,
            list_failures = list,
            "Report exceeds size limit"
        );
    }

    report
}

/// Parse every file and generate a report with default options
pub fn generate_report_from_files<P: AsRef<Path>>(
    title: &str,
    return_code: i32,
    paths: &[P],
) -> Result<String> {
    ReportGenerator::default().generate_from_files(title, return_code, paths)
}

fn parse_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<TestRun>> {
    paths.iter().map(|path| junit::parse_file(path)).collect()
}

fn render(
    title: &str,
    return_code: i32,
    summary: &TestSummary,
    failures: &[FailureGroup],
    list_failures: bool,
) -> String {
    let mut lines = sections::build_title(title);

    if summary.tests_run == 0 {
        lines.extend(sections::build_no_tests_section(return_code));
        return formatter::join_lines(&lines);
    }

    lines.extend(sections::build_counts_section(summary));

    if !list_failures {
        lines.extend(sections::build_omitted_failures_section());
    } else if !failures.is_empty() {
        lines.extend(sections::build_failures_section(failures));
    } else if return_code != 0 {
        // Nothing failed in the tests themselves, so point at the build
        lines.extend(sections::build_build_failure_section());
    }

    if !failures.is_empty() || return_code != 0 {
        lines.extend(sections::build_unrelated_failures_section());
    }

    formatter::join_lines(&lines)
}
