//! Source locations for reporting unmatched closers.

use std::fmt::Write;

/// A source location (line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number, in characters.
    pub column: usize,
}

/// Compute line and column from a byte offset in source.
#[must_use]
pub fn offset_to_location(source: &str, offset: usize) -> SourceLocation {
    let mut line = 1;
    let mut column = 1;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    SourceLocation { line, column }
}

/// Format a message at `location` with the offending source line underneath.
#[must_use]
pub fn render_snippet(source: &str, location: SourceLocation, message: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}:{}: {message}", location.line, location.column);

    let line = location
        .line
        .checked_sub(1)
        .and_then(|index| source.lines().nth(index));
    if let Some(line) = line {
        let _ = writeln!(output, "  |");
        let _ = writeln!(output, "{:>3} | {line}", location.line);
        let _ = writeln!(
            output,
            "  | {:>width$}^",
            "",
            width = location.column.saturating_sub(1)
        );
    }

    output.trim_end().to_string()
}
