//! Coordinate system.
//!
//! The editor speaks zero-based `(line, character)`; the parser reports
//! one-based `(line, column)` with zero meaning "no source position". This
//! module is the only place that converts between the two or does range
//! arithmetic.

use grove_syntax::{SourcePosition, SourceRange};
use lsp_types::{Position, Range};
use std::cmp::Ordering;

/// Smallest valid parser coordinate.
pub const MIN_COORDINATE: u32 = 1;

/// Weight of one line in [`range_size`]. A node nested in a multi-line
/// parent always ranks smaller only while source lines stay shorter than the
/// weight; files with longer lines need a larger `multi_line_weight`.
pub const DEFAULT_MULTI_LINE_WEIGHT: i64 = 1000;

pub fn to_parser(position: Position) -> SourcePosition {
    SourcePosition::new(
        position.line.saturating_add(1),
        position.character.saturating_add(1),
    )
}

pub fn to_editor(position: SourcePosition) -> Option<Position> {
    if position.line < MIN_COORDINATE || position.column < MIN_COORDINATE {
        return None;
    }
    Some(Position::new(position.line - 1, position.column - 1))
}

pub fn to_editor_range(range: SourceRange) -> Option<Range> {
    if !is_valid(range) {
        return None;
    }
    Some(Range::new(to_editor(range.start())?, to_editor(range.end())?))
}

/// Both endpoints at or above the minimum coordinate and `end >= start`.
pub fn is_valid(range: SourceRange) -> bool {
    range.start_line >= MIN_COORDINATE
        && range.start_col >= MIN_COORDINATE
        && range.end_line >= MIN_COORDINATE
        && range.end_col >= MIN_COORDINATE
        && range.end() >= range.start()
}

/// Inclusive containment of an editor position. Invalid ranges contain
/// nothing.
pub fn contains(range: SourceRange, position: Position) -> bool {
    is_valid(range) && contains_source(range, to_parser(position))
}

fn contains_source(range: SourceRange, position: SourcePosition) -> bool {
    range.start() <= position && position <= range.end()
}

pub fn contains_range(outer: SourceRange, inner: SourceRange) -> bool {
    is_valid(outer)
        && is_valid(inner)
        && outer.start() <= inner.start()
        && inner.end() <= outer.end()
}

/// `lineSpan * weight + columnSpan` for multi-line ranges, otherwise the
/// column span.
pub fn range_size(range: SourceRange, weight: i64) -> i64 {
    let lines = i64::from(range.end_line) - i64::from(range.start_line);
    let columns = i64::from(range.end_col) - i64::from(range.start_col);
    if lines > 0 {
        lines * weight + columns
    } else {
        columns
    }
}

pub fn compare_size(a: SourceRange, b: SourceRange, weight: i64) -> Ordering {
    range_size(a, weight).cmp(&range_size(b, weight))
}
