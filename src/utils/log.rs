// src/utils/log.rs

//! Banner-style progress output on top of the `log` facade.
//!
//! Level filtering and timestamps come from whichever logger the binary
//! installs; these helpers only shape the messages.

/// Width of separator and header borders.
const RULE_WIDTH: usize = 60;

/// Log an info message
pub fn info(message: &str) {
    ::log::info!("{}", message);
}

/// Log a warning message
pub fn warn(message: &str) {
    ::log::warn!("{}", message);
}

/// Log a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    ::log::info!("{}", format_step(step_num, total, message));
}

/// Log a separator line
pub fn separator() {
    ::log::info!("{}", "─".repeat(RULE_WIDTH));
}

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(RULE_WIDTH);
    ::log::info!("{}", border);
    ::log::info!("  {}", title);
    ::log::info!("{}", border);
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    ::log::info!("    {}", message);
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    for line in format_summary(title, items) {
        ::log::info!("{}", line);
    }
}

fn format_step(step_num: usize, total: usize, message: &str) -> String {
    format!("[STEP {}/{}] {}", step_num, total, message)
}

fn format_summary(title: &str, items: &[(&str, String)]) -> Vec<String> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("[SUMMARY] {}", title));
    for (key, value) in items {
        lines.push(format!("    {}: {}", key, value));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_step() {
        assert_eq!(format_step(1, 3, "Discover"), "[STEP 1/3] Discover");
    }

    #[test]
    fn test_format_summary() {
        let lines = format_summary("Crawl Results", &[("Records", "2".to_string())]);
        assert_eq!(lines, vec!["[SUMMARY] Crawl Results", "    Records: 2"]);
    }
}
