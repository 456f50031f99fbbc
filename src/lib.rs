// Library exports for junit-report

pub mod error;
pub mod junit; // JUnit XML model and reader
pub mod report; // Markdown report generator

pub use error::{ReportError, Result};
pub use report::{generate_report, generate_report_from_files, ReportGenerator, ReportOptions};
