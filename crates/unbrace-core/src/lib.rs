//! Brace balance counting library.
//!
//! This library counts closing characters that have no pending opening brace,
//! along with a few line-level brace checks.

mod balance;
mod compound;
mod config;
mod delim;
mod location;

pub use balance::{Scan, count_unmatched_closers, scan, trace};
pub use compound::{
    Indent, LineSplit, is_compound_statement, is_inside_braces, leading_indent, split_at_cursor,
};
pub use config::{CloserPolicy, Config, ConfigError};
pub use delim::count_char;
pub use location::{SourceLocation, offset_to_location, render_snippet};
