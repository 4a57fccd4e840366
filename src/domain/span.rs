//! Detected span model
//!
//! A [`Span`] is one labeled character range contributed by a recognizer.
//! Spans are immutable once created; overlap handling happens later in the
//! resolver, which produces the non-overlapping [`ResolvedSpans`] set.

use crate::domain::category::Category;
use serde::{Deserialize, Serialize};

/// Detection layer that produced a span
///
/// Order matters: when the resolver breaks a tie between overlapping spans
/// of equal confidence, the higher-priority method wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// ML-based NER capability
    MlModel,
    /// Context-aware pattern recognizer (regex + proximity keywords)
    CustomRecognizer,
    /// Strict regex fallback, no context
    FallbackRegex,
}

impl DetectionMethod {
    /// Tie-break priority; larger wins
    pub fn priority(&self) -> u8 {
        match self {
            Self::MlModel => 3,
            Self::CustomRecognizer => 2,
            Self::FallbackRegex => 1,
        }
    }

    /// Wire label, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MlModel => "ml_model",
            Self::CustomRecognizer => "custom_recognizer",
            Self::FallbackRegex => "fallback_regex",
        }
    }
}

/// One detected sensitive span
///
/// Offsets are byte offsets into the original text and must lie on UTF-8
/// character boundaries with `start < end <= text.len()`. Recognizers are
/// responsible for emitting valid offsets; the resolver re-validates them
/// before any text is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// Entity category
    pub category: Category,
    /// Confidence score in `[0.0, 1.0]`
    pub score: f32,
    /// Detection layer that produced this span
    pub method: DetectionMethod,
}

impl Span {
    /// Create a span, clamping the score into `[0.0, 1.0]`
    pub fn new(
        start: usize,
        end: usize,
        category: Category,
        score: f32,
        method: DetectionMethod,
    ) -> Self {
        Self {
            start,
            end,
            category,
            score: score.clamp(0.0, 1.0),
            method,
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when this span shares at least one byte with `other`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when this span shares at least one byte with the range
    /// `[start, end)`
    pub fn overlaps_range(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Validate the span against the text it was detected in
    pub fn is_valid_for(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}

/// Ordered, strictly non-overlapping span set
///
/// Only the resolver constructs these; for any two consecutive entries,
/// `spans[i].end <= spans[i + 1].start`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedSpans {
    spans: Vec<Span>,
}

impl ResolvedSpans {
    /// Wrap a list that is already sorted by start and non-overlapping
    ///
    /// Callers (the resolver and the pseudonym guard) are responsible for
    /// the ordering invariant; it is re-checked in debug builds.
    pub(crate) fn from_sorted(spans: Vec<Span>) -> Self {
        debug_assert!(spans.windows(2).all(|pair| pair[0].end <= pair[1].start));
        Self { spans }
    }

    /// Empty set
    pub fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[Span] {
        &self.spans
    }

    pub fn into_vec(self) -> Vec<Span> {
        self.spans
    }
}

impl<'a> IntoIterator for &'a ResolvedSpans {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
