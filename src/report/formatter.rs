// Markdown formatting utilities for report generation
//
// Reports are built as a list of lines and joined at the end, so these
// helpers return lines rather than newline-terminated blocks.

/// Build a markdown section header
pub fn build_section_header(title: &str, level: u8) -> String {
    let hashes = "#".repeat(level as usize);
    format!("{} {}", hashes, title)
}

/// Build a markdown bullet item
pub fn build_bullet(item: &str) -> String {
    format!("* {}", item)
}

/// "test" for exactly one, "tests" otherwise
pub fn plural(count: i64) -> &'static str {
    if count == 1 {
        "test"
    } else {
        "tests"
    }
}

/// Build a count bullet such as `* 1 test failed`
pub fn build_count_line(count: i64, outcome: &str) -> String {
    build_bullet(&format!("{} {} {}", count, plural(count), outcome))
}

/// Build a collapsible block whose body is a fenced code block
///
/// The body is emitted verbatim; it is not escaped.
pub fn build_details_block(summary: &str, body: &str) -> Vec<String> {
    vec![
        "<details>".to_string(),
        format!("<summary>{}</summary>", summary),
        String::new(),
        "```".to_string(),
        body.to_string(),
        "```".to_string(),
        "</details>".to_string(),
    ]
}

pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}
