//! JUnit result model
//!
//! Parsed representation of JUnit XML result documents. A `TestRun` is one
//! document; a collection of runs is what the report generator consumes.

pub mod parser;

pub use parser::{parse_file, parse_reader, parse_str};

use serde::{Deserialize, Serialize};

/// One parsed result document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    pub suites: Vec<TestSuite>,
}

impl TestRun {
    pub fn new(suites: Vec<TestSuite>) -> Self {
        Self { suites }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestSuite> {
        self.suites.iter()
    }
}

impl<'a> IntoIterator for &'a TestRun {
    type Item = &'a TestSuite;
    type IntoIter = std::slice::Iter<'a, TestSuite>;

    fn into_iter(self) -> Self::IntoIter {
        self.suites.iter()
    }
}

/// A named group of test cases within one document
///
/// The counts are taken from the `<testsuite>` attributes and are not
/// reconciled against `cases`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    /// Number of tests run
    pub tests: u64,
    pub skipped: u64,
    pub failures: u64,
    pub errors: u64,
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builds a suite whose counts are derived from its cases
    pub fn from_cases(name: impl Into<String>, cases: Vec<TestCase>) -> Self {
        let mut suite = Self::new(name);
        suite.tests = cases.len() as u64;
        suite.skipped = count_where(&cases, TestStatus::is_skipped);
        suite.failures = count_where(&cases, TestStatus::is_failed);
        suite.errors = count_where(&cases, TestStatus::is_error);
        suite.cases = cases;
        suite
    }
}

fn count_where(cases: &[TestCase], pred: fn(&TestStatus) -> bool) -> u64 {
    cases.iter().filter(|c| pred(&c.status)).count() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub classname: String,
    pub name: String,
    pub status: TestStatus,
}

impl TestCase {
    pub fn new(classname: impl Into<String>, name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            classname: classname.into(),
            name: name.into(),
            status,
        }
    }

    pub fn passed(classname: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(classname, name, TestStatus::Passed)
    }

    pub fn failed(
        classname: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            classname,
            name,
            TestStatus::Failed {
                message: None,
                text: Some(text.into()),
            },
        )
    }

    pub fn skipped(classname: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(classname, name, TestStatus::Skipped { message: None })
    }

    /// `classname/name`, the label shown for a failing test
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.classname, self.name)
    }

    /// Failure output, only for cases whose status is exactly `Failed`
    pub fn failure_text(&self) -> Option<&str> {
        match &self.status {
            TestStatus::Failed {
                text: Some(text), ..
            } => Some(text),
            _ => None,
        }
    }
}

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed {
        message: Option<String>,
        text: Option<String>,
    },
    Error {
        message: Option<String>,
        text: Option<String>,
    },
    Skipped {
        message: Option<String>,
    },
}

impl TestStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TestStatus::Failed { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TestStatus::Error { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestStatus::Skipped { .. })
    }
}
