//! Source location tracking
//!
//! Every AST node carries the range of source text it was read from. Fixes are
//! expressed against these ranges, so they must be exact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source position: row and column, both 1-indexed.
///
/// Columns count Unicode scalar values, not bytes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Location {
    pub row: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// The location `n` columns to the right on the same row.
    pub const fn shift(self, n: u32) -> Self {
        Self {
            row: self.row,
            column: self.column + n,
        }
    }

    /// The location `n` columns to the left on the same row.
    pub const fn unshift(self, n: u32) -> Self {
        Self {
            row: self.row,
            column: self.column.saturating_sub(n),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Source range: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

impl Range {
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Zero-width range at a single location (an insertion point).
    pub const fn point(location: Location) -> Self {
        Self {
            start: location,
            end: location,
        }
    }

    /// Range from `(start_row, start_column)` to `(end_row, end_column)`.
    pub const fn from_coords(start_row: u32, start_column: u32, end_row: u32, end_column: u32) -> Self {
        Self {
            start: Location::new(start_row, start_column),
            end: Location::new(end_row, end_column),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest range containing both.
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Smallest range containing every range in the iterator.
    pub fn merge_all(ranges: impl IntoIterator<Item = Range>) -> Option<Self> {
        ranges.into_iter().reduce(Range::merge)
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_location(&self, location: Location) -> bool {
        self.start <= location && location < self.end
    }

    /// Whether this range ends at or before `other` starts.
    pub fn is_before(&self, other: &Range) -> bool {
        self.end <= other.start
    }

    /// Whether this range starts at or after `other` ends.
    pub fn is_after(&self, other: &Range) -> bool {
        other.end <= self.start
    }

    /// Whether the two ranges share at least one character.
    ///
    /// A zero-width range overlaps another range only when it lies strictly
    /// inside it; touching boundaries never overlap.
    pub fn overlaps(&self, other: &Range) -> bool {
        if self.is_empty() {
            return other.start < self.start && self.start < other.end;
        }
        if other.is_empty() {
            return self.start < other.start && other.start < self.end;
        }
        self.start < other.end && other.start < self.end
    }

    /// Whether one range ends exactly where the other starts.
    pub fn is_adjacent(&self, other: &Range) -> bool {
        self.end == other.start || other.end == self.start
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A value together with the source range it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node<T> {
    pub value: T,
    pub range: Range,
}

impl<T> Node<T> {
    pub const fn new(value: T, range: Range) -> Self {
        Self { value, range }
    }

    /// Transform the inner value, keeping the range.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Node<U> {
        Node {
            value: f(self.value),
            range: self.range,
        }
    }

    pub fn as_ref(&self) -> Node<&T> {
        Node {
            value: &self.value,
            range: self.range,
        }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }

    pub const fn range(&self) -> Range {
        self.range
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
