//! Line-level brace checks used for editor-style auto indentation.
//!
//! Both checks ignore braces inside double-quoted strings. A quote preceded by
//! a backslash does not toggle the string state. [`split_at_cursor`] combines
//! them to break a `{|}` line into an opening, an indented body and a closer.

use crate::delim::count_char;

/// Walks a line, yielding characters outside double-quoted strings.
struct Unquoted<'a> {
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
    prev: Option<char>,
    in_string: bool,
}

impl<'a> Unquoted<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().enumerate(),
            prev: None,
            in_string: false,
        }
    }
}

impl Iterator for Unquoted<'_> {
    /// Char index and character.
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, c) = self.chars.next()?;
            let prev = self.prev.replace(c);
            if c == '"' && prev != Some('\\') {
                self.in_string = !self.in_string;
                continue;
            }
            if !self.in_string {
                return Some((index, c));
            }
        }
    }
}

/// Check whether a line holding braces closes every brace it opens.
///
/// Lines without any `{` or `}` are not compound statements.
#[must_use]
pub fn is_compound_statement(line: &str) -> bool {
    if count_char(line, '{') == 0 && count_char(line, '}') == 0 {
        return false;
    }

    let mut stack = Vec::new();
    for (_, c) in Unquoted::new(line) {
        match c {
            '{' => stack.push(c),
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                } else {
                    stack.push(c);
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}

/// Check whether `cursor` (a char index) sits directly inside a brace pair.
///
/// Any character other than a brace between the opening brace and the cursor
/// resets the depth, so only `{|}`-style positions qualify.
#[must_use]
pub fn is_inside_braces(line: &str, cursor: usize) -> bool {
    let mut depth = 0usize;

    for (index, c) in Unquoted::new(line) {
        if index >= cursor {
            break;
        }
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => depth = 0,
        }
    }

    depth > 0 && line.chars().skip(cursor).any(|c| c == '}')
}

/// Leading indentation of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    /// Leading tab characters.
    pub tabs: usize,
    /// Leading space characters.
    pub spaces: usize,
}

/// Count the leading tabs and leading spaces of a line.
#[must_use]
pub fn leading_indent(line: &str) -> Indent {
    Indent {
        tabs: line.chars().take_while(|&c| c == '\t').count(),
        spaces: line.chars().take_while(|&c| c == ' ').count(),
    }
}

/// Spaces added per nesting level when a line is indented with spaces.
const SPACE_INDENT_WIDTH: usize = 4;

/// A line broken apart at a cursor sitting inside a brace pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSplit {
    /// Everything before the cursor, ending with the opening brace.
    pub head: String,
    /// Text between the cursor and the closing brace, one level deeper.
    pub body: String,
    /// The closing brace and the rest of the line, at the original indent.
    pub tail: String,
}

/// Split `line` at `cursor` (a char index) the way an editor breaks `{|}` on
/// enter.
///
/// Returns `None` unless the line is a compound statement and the cursor is
/// directly inside a brace pair. Tab-indented lines nest by one tab, and
/// space-indented lines by four spaces.
#[must_use]
pub fn split_at_cursor(line: &str, cursor: usize) -> Option<LineSplit> {
    if !is_compound_statement(line) || !is_inside_braces(line, cursor) {
        return None;
    }

    let indent = leading_indent(line);
    let (outer, inner) = if indent.spaces > 0 {
        (
            " ".repeat(indent.spaces),
            " ".repeat(indent.spaces + SPACE_INDENT_WIDTH),
        )
    } else {
        ("\t".repeat(indent.tabs), "\t".repeat(indent.tabs + 1))
    };

    let head: String = line.chars().take(cursor).collect();
    let rest: String = line.chars().skip(cursor).collect();
    let close = rest.find('}')?;

    Some(LineSplit {
        head,
        body: format!("{inner}{}", rest[..close].trim()),
        tail: format!("{outer}{}", &rest[close..]),
    })
}
