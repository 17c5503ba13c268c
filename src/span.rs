//! Source segments
//!
//! A `Segment` is a half-open byte range into the source text a document
//! was parsed from. Nodes that were parsed from source report the segments
//! backing them; nodes created programmatically report none.

use std::fmt;

/// Half-open byte range `[start, end)` into source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Segment {
    /// Create a segment, swapping the bounds if given in reverse.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Length in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the segment covers no bytes
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `offset` falls inside this segment
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest segment covering both `self` and `other`
    pub fn join(self, other: Segment) -> Segment {
        Segment {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice `source` by this segment.
    ///
    /// Returns `None` if the segment runs past the end of `source` or does
    /// not fall on UTF-8 character boundaries.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<std::ops::Range<usize>> for Segment {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_normalizes_bounds() {
        let seg = Segment::new(10, 4);
        assert_eq!(seg.start, 4);
        assert_eq!(seg.end, 10);
        assert_eq!(seg.len(), 6);
    }

    #[test]
    fn test_segment_slice() {
        let src = "# Title\n\nbody";
        assert_eq!(Segment::new(2, 7).slice(src), Some("Title"));
        assert_eq!(Segment::new(9, 40).slice(src), None);
    }

    #[test]
    fn test_segment_slice_rejects_split_char() {
        let src = "héllo";
        // 'é' occupies bytes 1..3
        assert_eq!(Segment::new(0, 2).slice(src), None);
        assert_eq!(Segment::new(0, 3).slice(src), Some("hé"));
    }

    #[test]
    fn test_segment_join_and_contains() {
        let joined = Segment::new(3, 5).join(Segment::new(8, 12));
        assert_eq!(joined, Segment::new(3, 12));
        assert!(joined.contains(3));
        assert!(!joined.contains(12));
        assert!(Segment::new(4, 4).is_empty());
        assert_eq!(joined.to_string(), "3..12");
    }
}
