//! Collapsible log group markers
//!
//! CI log viewers fold everything between a start and an end marker into
//! a collapsible section titled with the group name. Both markers are a
//! single newline-terminated line on stdout:
//!
//! ```text
//! ::group::Step 1
//! ...step output...
//! ::endgroup::
//! ```

use std::io::{self, Write};

/// Sentinel prefix of a group-start line; the group name follows
pub const GROUP_START: &str = "::group::";

/// Sentinel line that closes the current group
pub const GROUP_END: &str = "::endgroup::";

/// Write a group-start marker carrying the group name
pub fn start_group<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "{}{}", GROUP_START, name)
}

/// Write a group-end marker
pub fn end_group<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", GROUP_END)
}
