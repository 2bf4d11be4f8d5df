//! Byte-range extraction from a source buffer.

use std::ops::Range;

/// Return the exact text of `range` within `source`.
///
/// Ranges come from syntax nodes, so they always fall on character
/// boundaries. A range outside the buffer is a bug in the caller and panics.
pub fn extract(source: &str, range: Range<usize>) -> &str {
    &source[range]
}

/// True when only whitespace precedes `pos` on its line.
pub fn starts_line(source: &str, pos: usize) -> bool {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..pos].trim().is_empty()
}

/// True when `gap` is whitespace spanning at most one line break.
pub fn is_tight_gap(gap: &str) -> bool {
    gap.trim().is_empty() && gap.matches('\n').count() <= 1
}
