//! Span conflict resolver
//!
//! Merges the raw candidate spans from all detection layers into one
//! ordered, non-overlapping span set. The algorithm is a greedy
//! interval sweep: deterministic and O(n log n). It is not globally optimal
//! for maximizing covered entity count; determinism and predictable
//! tie-breaking matter more here, since over-redaction is safe and
//! under-redaction is not.
//!
//! Tie-break order for overlapping candidates: higher score, then higher
//! method priority, then larger span length.

use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use crate::domain::span::{ResolvedSpans, Span};
use std::cmp::Ordering;

/// Resolve raw candidates into a non-overlapping ordered span set
///
/// Candidates are validated against `text` first; any span with offsets out
/// of bounds or off a character boundary fails resolution for the whole
/// request — the caller converts that into emergency redaction rather than
/// attempting partial output.
///
/// # Errors
///
/// Returns [`AegisError::Resolution`] when a candidate span is invalid for
/// the text.
pub fn resolve(candidates: Vec<Span>, text: &str) -> Result<ResolvedSpans> {
    for span in &candidates {
        if !span.is_valid_for(text) {
            return Err(AegisError::Resolution(format!(
                "candidate span {}..{} is invalid for text of length {}",
                span.start,
                span.end,
                text.len()
            )));
        }
    }

    if candidates.is_empty() {
        return Ok(ResolvedSpans::empty());
    }

    let mut sorted = candidates;
    sorted.sort_by(compare_candidates);

    let mut resolved: Vec<Span> = Vec::with_capacity(sorted.len());
    let mut current = sorted[0];

    for candidate in sorted.into_iter().skip(1) {
        if candidate.start < current.end {
            // Overlap: keep the stronger span
            if wins_over(&candidate, &current) {
                current = candidate;
            }
        } else {
            resolved.push(current);
            current = candidate;
        }
    }
    resolved.push(current);

    Ok(ResolvedSpans::from_sorted(resolved))
}

/// Sort order: start ascending, then score descending, then method priority
/// descending
fn compare_candidates(a: &Span, b: &Span) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| b.method.priority().cmp(&a.method.priority()))
}

/// Whether `challenger` displaces the current winning span it overlaps
fn wins_over(challenger: &Span, current: &Span) -> bool {
    match challenger.score.total_cmp(&current.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match challenger.method.priority().cmp(&current.method.priority()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => challenger.len() > current.len(),
        },
    }
}
