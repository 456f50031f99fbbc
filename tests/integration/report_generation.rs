// Integration tests for test report generation
//
// These tests verify end-to-end report generation including:
// - Reports for builds with and without tests
// - Failure listing grouped by suite
// - Degradation when the report exceeds the size limit
// - Reading result documents from disk

#[cfg(test)]
mod report_generation_tests {
    use std::io::Write;
    use std::path::PathBuf;

    use junit_report::junit::{parse_str, TestCase, TestRun, TestSuite};
    use junit_report::report::{UNRELATED_FAILURES_STR, DEFAULT_SIZE_LIMIT};
    use junit_report::{
        generate_report, generate_report_from_files, ReportError, ReportGenerator, ReportOptions,
    };

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn suite_with_counts(name: &str, tests: u64, skipped: u64, failures: u64) -> TestSuite {
        let mut suite = TestSuite::new(name);
        suite.tests = tests;
        suite.skipped = skipped;
        suite.failures = failures;
        suite
    }

    fn single_failure_runs() -> Vec<TestRun> {
        vec![TestRun::new(vec![TestSuite::from_cases(
            "Suite1",
            vec![TestCase::failed("Foo", "bar", "boom")],
        )])]
    }

    fn default_report(title: &str, return_code: i32, runs: &[TestRun]) -> String {
        generate_report(title, return_code, runs, DEFAULT_SIZE_LIMIT, true)
    }

    #[test]
    fn test_no_tests_build_succeeded() {
        let report = default_report("Foo", 0, &[]);
        assert_eq!(
            report,
            "# Foo\n\nThe build succeeded and no tests ran. This is expected in some build configurations."
        );
    }

    #[test]
    fn test_no_tests_in_empty_documents() {
        let runs = vec![TestRun::default(), TestRun::new(vec![TestSuite::new("Empty")])];
        let report = default_report("Foo", 0, &runs);
        assert!(report.ends_with("This is expected in some build configurations."));
    }

    #[test]
    fn test_no_tests_build_failed() {
        let report = default_report("Foo", 1, &[]);
        assert_eq!(
            report,
            format!(
                "# Foo\n\nThe build failed before running any tests.\n\n\
Download the build's log file to see the details.\n\n{}",
                UNRELATED_FAILURES_STR
            )
        );
    }

    #[test]
    fn test_counts_with_singular_failed() {
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 8, 2, 1)])];
        let report = default_report("Foo", 0, &runs);

        assert!(report.contains("* 5 tests passed"));
        assert!(report.contains("* 2 tests skipped"));
        assert!(report.contains("* 1 test failed"));
    }

    #[test]
    fn test_all_passed_success_has_only_counts() {
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 1, 0, 0)])];
        assert_eq!(default_report("Foo", 0, &runs), "# Foo\n\n* 1 test passed");
    }

    #[test]
    fn test_single_failure_listing() {
        let report = default_report("Foo", 1, &single_failure_runs());

        let expected = format!(
            "# Foo\n\
\n\
* 1 test failed\n\
\n\
## Failed Tests\n\
(click on a test name to see its output)\n\
\n\
### Suite1\n\
<details>\n\
<summary>Foo/bar</summary>\n\
\n\
```\n\
boom\n\
```\n\
</details>\n\
\n\
{}",
            UNRELATED_FAILURES_STR
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_failures_listed_even_with_zero_return_code() {
        let report = default_report("Foo", 0, &single_failure_runs());
        assert!(report.contains("## Failed Tests"));
        assert!(report.ends_with(UNRELATED_FAILURES_STR));
    }

    #[test]
    fn test_all_tests_passed_but_build_failed() {
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 3, 0, 0)])];
        let report = default_report("Foo", 1, &runs);

        assert_eq!(
            report,
            format!(
                "# Foo\n\n* 3 tests passed\n\n\
All tests passed but another part of the build **failed**.\n\n\
Download the build's log file to see the details.\n\n{}",
                UNRELATED_FAILURES_STR
            )
        );
        assert!(!report.contains("Failed Tests"));
    }

    #[test]
    fn test_failure_counts_without_output_are_not_listed() {
        // Counts say one failure, but the case carries no output
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 2, 0, 1)])];
        let report = default_report("Foo", 1, &runs);

        assert!(report.contains("* 1 test failed"));
        assert!(!report.contains("## Failed Tests"));
        assert!(report.contains("All tests passed but another part of the build **failed**."));
    }

    #[test]
    fn test_errors_and_skips_are_not_listed() {
        let run = parse_str(
            r#"<testsuites><testsuite name="S" tests="3" skipped="1" failures="0" errors="1">
<testcase classname="C" name="ok"/>
<testcase classname="C" name="skip"><skipped>not supported</skipped></testcase>
<testcase classname="C" name="err"><error>crashed</error></testcase>
</testsuite></testsuites>"#,
        )
        .unwrap();
        let report = default_report("Foo", 0, &[run]);

        assert!(report.contains("* 2 tests passed"));
        assert!(report.contains("* 1 test skipped"));
        assert!(!report.contains("crashed"));
        assert!(!report.contains(UNRELATED_FAILURES_STR));
    }

    #[test]
    fn test_groups_merge_across_documents_in_first_seen_order() {
        let runs = vec![
            TestRun::new(vec![
                TestSuite::from_cases("Beta", vec![TestCase::failed("B", "one", "b1")]),
                TestSuite::from_cases("Alpha", vec![TestCase::failed("A", "one", "a1")]),
            ]),
            TestRun::new(vec![TestSuite::from_cases(
                "Beta",
                vec![TestCase::failed("B", "two", "b2")],
            )]),
        ];
        let report = default_report("Foo", 1, &runs);

        let beta = report.find("### Beta").unwrap();
        let alpha = report.find("### Alpha").unwrap();
        let b2 = report.find("<summary>B/two</summary>").unwrap();
        assert!(beta < b2 && b2 < alpha);
        assert_eq!(report.matches("### Beta").count(), 1);
        assert!(report.contains("* 3 tests failed"));
    }

    #[test]
    fn test_negative_passed_count_is_reported_as_is() {
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 1, 0, 3)])];
        let report = default_report("Foo", 1, &runs);
        assert!(report.contains("* -2 tests passed"));
    }

    #[test]
    fn test_zero_size_limit_matches_unlisted_report() {
        let runs = single_failure_runs();
        let limited = generate_report("Foo", 1, &runs, 0, true);
        let unlisted = generate_report("Foo", 1, &runs, DEFAULT_SIZE_LIMIT, false);

        assert_eq!(limited, unlisted);
        assert_eq!(
            limited,
            format!(
                "# Foo\n\n* 1 test failed\n\n\
Failed tests and their output was too large to report. \
Download the build's log file to see the details.\n\n{}",
                UNRELATED_FAILURES_STR
            )
        );
    }

    #[test]
    fn test_unlisted_report_without_failures_has_no_disclaimer() {
        let runs = vec![TestRun::new(vec![suite_with_counts("S", 3, 0, 0)])];
        let report = generate_report("T", 0, &runs, DEFAULT_SIZE_LIMIT, false);

        assert_eq!(
            report,
            "# T\n\n* 3 tests passed\n\n\
Failed tests and their output was too large to report. \
Download the build's log file to see the details."
        );
    }

    #[test]
    fn test_nested_suites_are_counted_once() {
        let run = parse_str(
            r#"<testsuites><testsuite name="outer" tests="2"><testsuite name="inner" tests="2">
<testcase classname="C" name="a"/>
<testcase classname="C" name="b"/>
</testsuite></testsuite></testsuites>"#,
        )
        .unwrap();

        assert_eq!(default_report("T", 0, &[run]), "# T\n\n* 2 tests passed");
    }

    #[test]
    fn test_nested_suite_failures_listed_under_outer_suite() {
        let run = parse_str(
            r#"<testsuites><testsuite name="outer" tests="2" failures="1"><testsuite name="inner">
<testcase classname="C" name="a"/>
<testcase classname="C" name="b"><failure>inner boom</failure></testcase>
</testsuite></testsuite></testsuites>"#,
        )
        .unwrap();
        let report = default_report("T", 1, &[run]);

        assert!(report.contains("* 1 test passed\n* 1 test failed"));
        assert!(report.contains("### outer\n<details>\n<summary>C/b</summary>"));
        assert!(!report.contains("### inner"));
    }

    #[test]
    fn test_large_output_degrades_under_limit() {
        let big_output = "x".repeat(4096);
        let runs = vec![TestRun::new(vec![TestSuite::from_cases(
            "Big",
            (0..50)
                .map(|i| TestCase::failed("Big", format!("t{}", i), big_output.clone()))
                .collect(),
        )])];

        let size_limit = 16 * 1024;
        let report = generate_report("Foo", 1, &runs, size_limit, true);

        assert!(report.len() <= size_limit);
        assert!(report.contains("* 50 tests failed"));
        assert!(report.contains("too large to report"));
        assert!(!report.contains(&big_output));
    }

    #[test]
    fn test_size_limit_counts_utf8_bytes() {
        let runs = vec![TestRun::new(vec![TestSuite::from_cases(
            "S",
            vec![TestCase::failed("C", "t", "é".repeat(100))],
        )])];
        let full = generate_report("Foo", 1, &runs, DEFAULT_SIZE_LIMIT, true);

        // Exactly at the limit keeps the details, one byte less drops them
        let at_limit = generate_report("Foo", 1, &runs, full.len(), true);
        assert_eq!(at_limit, full);
        let below = generate_report("Foo", 1, &runs, full.len() - 1, true);
        assert!(below.contains("too large to report"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let runs = single_failure_runs();
        assert_eq!(
            default_report("Foo", 1, &runs),
            default_report("Foo", 1, &runs)
        );
    }

    #[test]
    fn test_report_from_files() {
        let report = generate_report_from_files(
            "Foo",
            1,
            &[fixture("passing.xml"), fixture("failing.xml")],
        )
        .unwrap();

        assert!(report.starts_with("# Foo\n\n* 2 tests passed\n* 1 test skipped\n* 2 tests failed"));
        assert!(report.contains("### Bar"));
        assert!(report.contains("<summary>Bar/test_3/test_3</summary>"));
        assert!(report.contains("Other output goes here"));
        assert!(!report.contains("### Passed"));
    }

    #[test]
    fn test_report_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<testsuites><testsuite name="Tmp" tests="1" failures="1">
<testcase classname="T" name="x"><failure>from disk</failure></testcase>
</testsuite></testsuites>"#
        )
        .unwrap();

        let generator = ReportGenerator::new(ReportOptions::default()).unwrap();
        let report = generator
            .generate_from_files("Tmp", 1, &[file.path()])
            .unwrap();
        assert!(report.contains("### Tmp"));
        assert!(report.contains("from disk"));
    }

    #[test]
    fn test_report_from_no_files() {
        let paths: [PathBuf; 0] = [];
        let report = generate_report_from_files("Foo", 0, &paths).unwrap();
        assert!(report.contains("The build succeeded and no tests ran."));
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");

        let err = generate_report_from_files("Foo", 1, &[fixture("passing.xml"), missing.clone()])
            .unwrap_err();
        match err {
            ReportError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected IO error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_propagates_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<testsuites><testsuite name=\"S\"></testsuites>").unwrap();

        let err = generate_report_from_files("Foo", 1, &[file.path()]).unwrap_err();
        assert!(err.is_parse_error());
        assert!(matches!(err, ReportError::Xml { .. }));
    }
}
