//! Pseudonym guard
//!
//! A caller-designated pseudonym is never redacted. Every occurrence of the
//! pseudonym in the text is located (case-insensitively, matching the
//! original service contract) and any resolved span overlapping an
//! occurrence — fully or partially — is dropped whole. Partial overlaps are
//! resolved conservatively: producing a malformed partial substitution is
//! worse than under-redacting a borderline overlap, so the whole span goes.
//! Conservative drops are logged for audit purposes.

use crate::domain::span::{ResolvedSpans, Span};

/// Remove resolved spans that overlap any pseudonym occurrence
///
/// Returns the input unchanged when no pseudonym is supplied or it is
/// empty. Ordering and non-overlap of the surviving spans are preserved
/// since filtering only removes elements.
pub fn filter(spans: ResolvedSpans, text: &str, pseudonym: Option<&str>) -> ResolvedSpans {
    let pseudonym = match pseudonym {
        Some(p) if !p.is_empty() => p,
        _ => return spans,
    };

    let occurrences = find_occurrences(text, pseudonym);
    if occurrences.is_empty() {
        return spans;
    }

    let mut dropped = 0usize;
    let kept: Vec<Span> = spans
        .into_vec()
        .into_iter()
        .filter(|span| {
            let protected = occurrences
                .iter()
                .any(|&(start, end)| span.overlaps_range(start, end));
            if protected {
                dropped += 1;
                tracing::info!(
                    start = span.start,
                    end = span.end,
                    category = %span.category,
                    "Dropping span overlapping pseudonym occurrence"
                );
            }
            !protected
        })
        .collect();

    if dropped > 0 {
        tracing::info!(dropped, "Pseudonym guard removed overlapping spans");
    }

    ResolvedSpans::from_sorted(kept)
}

/// Byte ranges of all case-insensitive occurrences of the pseudonym
fn find_occurrences(text: &str, pseudonym: &str) -> Vec<(usize, usize)> {
    let pattern = format!("(?i){}", regex::escape(pseudonym));
    let re = match regex::Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            // An uncompilable escaped literal should not happen; with no
            // occurrences found, spans stay and redaction proceeds
            tracing::warn!(error = %e, "Failed to compile pseudonym matcher");
            return Vec::new();
        }
    };

    re.find_iter(text).map(|m| (m.start(), m.end())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver;
    use crate::domain::category::Category;
    use crate::domain::span::DetectionMethod;

    fn resolved(spans: Vec<Span>, text: &str) -> ResolvedSpans {
        resolver::resolve(spans, text).unwrap()
    }

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            start,
            end,
            Category::Person,
            0.9,
            DetectionMethod::MlModel,
        )
    }

    #[test]
    fn test_no_pseudonym_passthrough() {
        let text = "John Smith was here";
        let spans = resolved(vec![span(0, 10)], text);
        let out = filter(spans, text, None);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_exact_match_dropped() {
        let text = "user123 logged in";
        let spans = resolved(vec![span(0, 7)], text);
        let out = filter(spans, text, Some("user123"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_case_insensitive_occurrences() {
        let text = "User123 and USER123 both appear";
        let spans = resolved(vec![span(0, 7), span(12, 19)], text);
        let out = filter(spans, text, Some("user123"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_partial_overlap_drops_whole_span() {
        // Detected span covers more than the pseudonym; conservative policy
        // drops the whole span rather than redacting a fragment
        let text = "prefix user123 suffix";
        let spans = resolved(vec![span(0, 14)], text);
        let out = filter(spans, text, Some("user123"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_overlapping_span_survives() {
        let text = "user123 met John Smith";
        let spans = resolved(vec![span(12, 22)], text);
        let out = filter(spans, text, Some("user123"));
        assert_eq!(out.len(), 1);
        assert_eq!(out.as_slice()[0].start, 12);
    }

    #[test]
    fn test_pseudonym_with_regex_metacharacters() {
        let text = "id(42) appears as id(42)";
        let spans = resolved(vec![span(0, 6)], text);
        let out = filter(spans, text, Some("id(42)"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_pseudonym_ignored() {
        let text = "John Smith";
        let spans = resolved(vec![span(0, 10)], text);
        let out = filter(spans, text, Some(""));
        assert_eq!(out.len(), 1);
    }
}
