//! Stack-matching brace counter.
//!
//! Only the open symbol pushes. Under the default [`CloserPolicy::Any`] every
//! other character, letters and digits included, is an attempt to close the
//! innermost pending brace: it pops when one is pending and is counted as an
//! unmatched closer otherwise.

use std::fmt::Write;

use tracing::{debug, trace as trace_event};

use crate::{CloserPolicy, Config};

/// Outcome of a single pass over some text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scan {
    /// Closers seen while no open symbol was pending.
    pub unmatched_closers: usize,
    /// Open symbols still on the stack when the text ended.
    pub pending_openers: usize,
    /// Peak stack depth during the pass.
    pub max_depth: usize,
    /// Byte offset of the first unmatched closer.
    pub first_unmatched: Option<usize>,
}

impl Scan {
    /// True if no closer went unmatched.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.unmatched_closers == 0
    }
}

/// What one character did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Push,
    Pop,
    Unmatched,
    Skip,
}

impl Step {
    const fn label(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Unmatched => "unmatched",
            Self::Skip => "skip",
        }
    }
}

/// The matching stack and mismatch counter for one pass.
struct Matcher<'a> {
    config: &'a Config,
    stack: Vec<char>,
    scan: Scan,
}

impl<'a> Matcher<'a> {
    const fn new(config: &'a Config) -> Self {
        Self {
            config,
            stack: Vec::new(),
            scan: Scan {
                unmatched_closers: 0,
                pending_openers: 0,
                max_depth: 0,
                first_unmatched: None,
            },
        }
    }

    fn step(&mut self, offset: usize, c: char) -> Step {
        if c == self.config.open {
            self.stack.push(c);
            self.scan.max_depth = self.scan.max_depth.max(self.stack.len());
            return Step::Push;
        }

        if self.config.closers == CloserPolicy::Brace && c != self.config.close {
            return Step::Skip;
        }

        if self.stack.last() == Some(&self.config.open) {
            self.stack.pop();
            Step::Pop
        } else {
            self.scan.unmatched_closers += 1;
            self.scan.first_unmatched.get_or_insert(offset);
            Step::Unmatched
        }
    }

    fn finish(mut self) -> Scan {
        self.scan.pending_openers = self.stack.len();
        self.scan
    }
}

/// Count the unmatched closers in `text` with the default configuration.
///
/// ```
/// assert_eq!(unbrace_core::count_unmatched_closers("}{}"), 1);
/// assert_eq!(unbrace_core::count_unmatched_closers("{a"), 0);
/// ```
#[must_use]
pub fn count_unmatched_closers(text: &str) -> usize {
    scan(text, &Config::default()).unmatched_closers
}

/// Run one matching pass over `text`.
#[must_use]
pub fn scan(text: &str, config: &Config) -> Scan {
    let mut matcher = Matcher::new(config);

    for (offset, c) in text.char_indices() {
        let step = matcher.step(offset, c);
        trace_event!(offset, ?c, step = step.label(), depth = matcher.stack.len());
    }

    let result = matcher.finish();
    debug!(
        len = text.len(),
        unmatched = result.unmatched_closers,
        pending = result.pending_openers,
        max_depth = result.max_depth,
        "scan finished"
    );
    result
}

/// Render the pass over `text` one character per line.
#[must_use]
pub fn trace(text: &str, config: &Config) -> String {
    let mut matcher = Matcher::new(config);
    let mut output = String::new();

    for (offset, c) in text.char_indices() {
        let step = matcher.step(offset, c);
        let _ = writeln!(
            output,
            "{offset:>5}  {c:<6?} {:<9}  unmatched={} depth={}",
            step.label(),
            matcher.scan.unmatched_closers,
            matcher.stack.len()
        );
    }

    let result = matcher.finish();
    let _ = write!(
        output,
        "total: {} unmatched, {} pending",
        result.unmatched_closers, result.pending_openers
    );
    output
}
