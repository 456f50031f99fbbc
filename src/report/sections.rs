// Section builders for the test report
//
// Each function builds one section of the report as a list of lines.
// Sections that follow earlier content start with a blank separator line.

use super::formatter;
use super::{FailureGroup, TestSummary, SEE_BUILD_FILE_STR, UNRELATED_FAILURES_STR};

/// Build the report title followed by a blank line
pub fn build_title(title: &str) -> Vec<String> {
    vec![formatter::build_section_header(title, 1), String::new()]
}

/// Build the body used when no tests ran at all
pub fn build_no_tests_section(return_code: i32) -> Vec<String> {
    if return_code == 0 {
        vec![
            "The build succeeded and no tests ran. This is expected in some \
build configurations."
                .to_string(),
        ]
    } else {
        vec![
            "The build failed before running any tests.".to_string(),
            String::new(),
            SEE_BUILD_FILE_STR.to_string(),
            String::new(),
            UNRELATED_FAILURES_STR.to_string(),
        ]
    }
}

/// Build the passed/skipped/failed bullets, omitting zero counts
pub fn build_counts_section(summary: &TestSummary) -> Vec<String> {
    let counts = [
        (summary.tests_passed, "passed"),
        (summary.tests_skipped as i64, "skipped"),
        (summary.tests_failed as i64, "failed"),
    ];

    counts
        .iter()
        .filter(|(count, _)| *count != 0)
        .map(|(count, outcome)| formatter::build_count_line(*count, outcome))
        .collect()
}

/// Build the note shown in place of failure details in a degraded report
pub fn build_omitted_failures_section() -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Failed tests and their output was too large to report. {}",
            SEE_BUILD_FILE_STR
        ),
    ]
}

/// Build the "Failed Tests" section with one collapsible block per test
pub fn build_failures_section(groups: &[FailureGroup]) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        formatter::build_section_header("Failed Tests", 2),
        "(click on a test name to see its output)".to_string(),
    ];

    for group in groups {
        lines.push(String::new());
        lines.push(formatter::build_section_header(&group.suite, 3));
        for test in &group.tests {
            lines.extend(formatter::build_details_block(&test.name, &test.output));
        }
    }

    lines
}

/// Build the note for a failed build whose tests all passed
pub fn build_build_failure_section() -> Vec<String> {
    vec![
        String::new(),
        "All tests passed but another part of the build **failed**.".to_string(),
        String::new(),
        SEE_BUILD_FILE_STR.to_string(),
    ]
}

pub fn build_unrelated_failures_section() -> Vec<String> {
    vec![String::new(), UNRELATED_FAILURES_STR.to_string()]
}
