// JUnit XML reader
//
// Event-driven reader over quick-xml. Only the parts of the format the
// report needs are kept: suites, their counts, cases and case outcomes.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{TestCase, TestRun, TestStatus, TestSuite};
use crate::error::{ReportError, Result};

const TAG_REPORT: &[u8] = b"testsuites";
const TAG_TEST_SUITE: &[u8] = b"testsuite";
const TAG_TEST_CASE: &[u8] = b"testcase";
const TAG_STATUS_FAILURE: &[u8] = b"failure";
const TAG_STATUS_ERROR: &[u8] = b"error";
const TAG_STATUS_SKIPPED: &[u8] = b"skipped";

/// Parse a JUnit XML file from disk
pub fn parse_file(path: impl AsRef<Path>) -> Result<TestRun> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file), &path.display().to_string())
}

/// Parse a JUnit XML document from any buffered reader
///
/// `source_name` is only used to label errors.
pub fn parse_reader<R: BufRead>(xml: R, source_name: &str) -> Result<TestRun> {
    let mut parser = JunitParser::new(source_name);
    parser.parse(xml)?;
    let run = parser.finish()?;

    tracing::debug!(
        source = %source_name,
        suites = run.suites.len(),
        "Parsed JUnit document"
    );
    Ok(run)
}

pub fn parse_str(xml: &str) -> Result<TestRun> {
    parse_reader(xml.as_bytes(), "<string>")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Failure,
    Error,
    Skipped,
}

impl StatusKind {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            TAG_STATUS_FAILURE => Some(StatusKind::Failure),
            TAG_STATUS_ERROR => Some(StatusKind::Error),
            TAG_STATUS_SKIPPED => Some(StatusKind::Skipped),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PendingStatus {
    kind: StatusKind,
    message: Option<String>,
    text: String,
}

impl PendingStatus {
    fn into_status(self) -> TestStatus {
        let text = if self.text.is_empty() {
            None
        } else {
            Some(self.text.replace("\r\n", "\n"))
        };
        match self.kind {
            StatusKind::Failure => TestStatus::Failed {
                message: self.message,
                text,
            },
            StatusKind::Error => TestStatus::Error {
                message: self.message,
                text,
            },
            StatusKind::Skipped => TestStatus::Skipped {
                message: self.message,
            },
        }
    }
}

/// Suite under construction; counts stay `None` until an attribute supplies them
#[derive(Debug, Default)]
struct PendingSuite {
    name: String,
    tests: Option<u64>,
    skipped: Option<u64>,
    failures: Option<u64>,
    errors: Option<u64>,
    cases: Vec<TestCase>,
}

impl PendingSuite {
    fn into_suite(self) -> TestSuite {
        let derived = TestSuite::from_cases(self.name, self.cases);
        TestSuite {
            tests: self.tests.unwrap_or(derived.tests),
            skipped: self.skipped.unwrap_or(derived.skipped),
            failures: self.failures.unwrap_or(derived.failures),
            errors: self.errors.unwrap_or(derived.errors),
            ..derived
        }
    }
}

#[derive(Debug)]
struct JunitParser {
    source_name: String,
    root_seen: bool,
    suites: Vec<TestSuite>,
    // Only the outermost open suite is kept; cases of nested suites belong to it.
    current_suite: Option<PendingSuite>,
    suite_depth: usize,
    current_case: Option<TestCase>,
    current_status: Option<PendingStatus>,
}

impl JunitParser {
    fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            root_seen: false,
            suites: Vec::new(),
            current_suite: None,
            suite_depth: 0,
            current_case: None,
            current_status: None,
        }
    }

    fn parse<R: BufRead>(&mut self, xml: R) -> Result<()> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| self.xml_error(source))?;
            if !self.match_event(event)? {
                break;
            }
            buf.clear();
        }

        Ok(())
    }

    fn finish(self) -> Result<TestRun> {
        if !self.root_seen {
            return Err(ReportError::malformed(
                self.source_name,
                "no <testsuites> or <testsuite> root element",
            ));
        }
        if self.current_suite.is_some() || self.current_case.is_some() {
            return Err(ReportError::malformed(
                self.source_name,
                "unexpected end of document",
            ));
        }
        Ok(TestRun::new(self.suites))
    }

    /// Returns `false` once the end of input is reached
    fn match_event(&mut self, event: Event<'_>) -> Result<bool> {
        match event {
            Event::Eof => return Ok(false),
            Event::Start(e) => self.open_element(&e)?,
            Event::Empty(e) => {
                self.open_element(&e)?;
                self.close_element(e.local_name().as_ref())?;
            }
            Event::End(e) => self.close_element(e.local_name().as_ref())?,
            Event::Text(e) => {
                if self.current_status.is_some() {
                    let text = e.unescape().map_err(|source| self.xml_error(source))?;
                    self.push_status_text(&text);
                }
            }
            Event::CData(e) => {
                if self.current_status.is_some() {
                    let bytes = e.into_inner();
                    self.push_status_text(&String::from_utf8_lossy(&bytes));
                }
            }
            _ => (),
        }
        Ok(true)
    }

    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let local_name = e.local_name();
        let tag = local_name.as_ref();

        if !self.root_seen {
            if tag != TAG_REPORT && tag != TAG_TEST_SUITE {
                return Err(ReportError::malformed(
                    self.source_name.clone(),
                    format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(tag)
                    ),
                ));
            }
            self.root_seen = true;
        }

        match tag {
            TAG_TEST_SUITE => self.open_test_suite(e),
            TAG_TEST_CASE => self.open_test_case(e)?,
            _ => {
                if let Some(kind) = StatusKind::from_tag(tag) {
                    self.open_status(kind, e);
                }
            }
        }
        Ok(())
    }

    fn close_element(&mut self, tag: &[u8]) -> Result<()> {
        match tag {
            TAG_TEST_SUITE => self.close_test_suite(),
            TAG_TEST_CASE => self.close_test_case(),
            _ => {
                if StatusKind::from_tag(tag).is_some() {
                    self.close_status();
                }
            }
        }
        Ok(())
    }

    fn open_test_suite(&mut self, e: &BytesStart<'_>) {
        self.suite_depth += 1;
        // Nested suites add no counts of their own
        if self.current_suite.is_some() {
            return;
        }
        self.current_suite = Some(PendingSuite {
            name: parse_attr::string(e, "name").unwrap_or_default().into_owned(),
            tests: parse_attr::count(e, "tests"),
            skipped: parse_attr::count(e, "skipped"),
            failures: parse_attr::count(e, "failures"),
            errors: parse_attr::count(e, "errors"),
            cases: Vec::new(),
        });
    }

    fn close_test_suite(&mut self) {
        self.suite_depth = self.suite_depth.saturating_sub(1);
        if self.suite_depth > 0 {
            return;
        }
        if let Some(pending) = self.current_suite.take() {
            self.suites.push(pending.into_suite());
        }
    }

    fn open_test_case(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.current_suite.is_none() {
            return Err(ReportError::malformed(
                self.source_name.clone(),
                "<testcase> found outside of a <testsuite>",
            ));
        }
        self.current_case = Some(TestCase::passed(
            parse_attr::string(e, "classname").unwrap_or_default(),
            parse_attr::string(e, "name").unwrap_or_default(),
        ));
        Ok(())
    }

    fn close_test_case(&mut self) {
        if let (Some(case), Some(suite)) = (self.current_case.take(), self.current_suite.as_mut()) {
            suite.cases.push(case);
        }
    }

    fn open_status(&mut self, kind: StatusKind, e: &BytesStart<'_>) {
        // Status elements outside a test case carry nothing the report uses
        if self.current_case.is_none() {
            return;
        }
        self.current_status = Some(PendingStatus {
            kind,
            message: parse_attr::string(e, "message").map(Cow::into_owned),
            text: String::new(),
        });
    }

    fn push_status_text(&mut self, text: &str) {
        if let Some(status) = self.current_status.as_mut() {
            status.text.push_str(text);
        }
    }

    fn close_status(&mut self) {
        let Some(status) = self.current_status.take() else {
            return;
        };
        // Only the first outcome element of a case counts
        if let Some(case) = self.current_case.as_mut() {
            if case.status.is_passed() {
                case.status = status.into_status();
            }
        }
    }

    fn xml_error(&self, source: quick_xml::Error) -> ReportError {
        ReportError::Xml {
            source_name: self.source_name.clone(),
            source,
        }
    }
}

mod parse_attr {
    use std::borrow::Cow;

    use quick_xml::events::BytesStart;

    pub fn string<'a>(e: &'a BytesStart<'a>, attr_name: &'static str) -> Option<Cow<'a, str>> {
        e.try_get_attribute(attr_name)
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok())
    }

    pub fn count(e: &BytesStart<'_>, attr_name: &'static str) -> Option<u64> {
        string(e, attr_name).and_then(|value| value.trim().parse::<u64>().ok())
    }
}
