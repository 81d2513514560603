//! Typesetter diagnostics
//!
//! Picks the lines worth showing out of a typesetting tool's console log:
//! TeX error lines (`! ...`) with their `l.<n>` context line, and warnings.

/// Upper bound on extracted lines
pub const MAX_DIAGNOSTIC_LINES: usize = 20;

/// Extract error and warning lines from typesetter output
pub fn typesetter_diagnostics(output: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut after_error = false;

    for line in output.lines() {
        let trimmed = line.trim_end();
        if trimmed.starts_with('!') {
            lines.push(trimmed.to_string());
            after_error = true;
        } else if after_error && trimmed.starts_with("l.") {
            lines.push(trimmed.to_string());
            after_error = false;
        } else if trimmed.contains("Warning:") {
            lines.push(trimmed.trim_start().to_string());
        }

        if lines.len() >= MAX_DIAGNOSTIC_LINES {
            break;
        }
    }

    lines
}

/// Last `n` non-empty lines of `text`
pub fn tail(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
