//! Replacement engine
//!
//! Rewrites text by substituting each resolved span with its category's
//! generic token. Spans are consumed in reverse start order so earlier
//! replacements' offset shifts never invalidate later ones; the audit list
//! records pre-replacement coordinates throughout.

pub mod table;

pub use table::{ReplacementTable, DEFAULT_TOKEN};

use crate::domain::errors::AegisError;
use crate::domain::outcome::ReplacedSpan;
use crate::domain::result::Result;
use crate::domain::span::ResolvedSpans;

/// Applies category tokens to resolved spans
#[derive(Debug, Clone, Default)]
pub struct ReplacementEngine {
    table: ReplacementTable,
}

impl ReplacementEngine {
    /// Engine over the given table
    pub fn new(table: ReplacementTable) -> Self {
        Self { table }
    }

    /// The active replacement table
    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Rewrite `text`, replacing every resolved span with its token
    ///
    /// Returns the rewritten text plus the audit list ordered by original
    /// start offset. Total over all categories: an unmapped category gets
    /// the default token rather than passing original text through.
    ///
    /// # Errors
    ///
    /// Returns [`AegisError::Replacement`] when a span's offsets do not lie
    /// on character boundaries of the text; the caller converts this into
    /// emergency redaction.
    pub fn apply(&self, text: &str, spans: &ResolvedSpans) -> Result<(String, Vec<ReplacedSpan>)> {
        let mut result = text.to_string();
        let mut audit = Vec::with_capacity(spans.len());

        // Reverse start order: the suffix of `result` beyond each span is
        // already rewritten, the prefix still matches `text`
        for span in spans.iter().rev() {
            if !span.is_valid_for(text) {
                return Err(AegisError::Replacement(format!(
                    "span {}..{} is not a valid range of the input",
                    span.start, span.end
                )));
            }

            let token = self.table.token_for(span.category);
            let original = &text[span.start..span.end];
            result.replace_range(span.start..span.end, token);
            audit.push(ReplacedSpan::from_span(span, original, token));
        }

        audit.reverse();
        Ok((result, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver;
    use crate::domain::category::Category;
    use crate::domain::span::{DetectionMethod, Span};

    fn engine() -> ReplacementEngine {
        ReplacementEngine::new(ReplacementTable::builtin())
    }

    fn resolved(spans: Vec<Span>, text: &str) -> ResolvedSpans {
        resolver::resolve(spans, text).unwrap()
    }

    fn span(start: usize, end: usize, category: Category) -> Span {
        Span::new(start, end, category, 0.9, DetectionMethod::CustomRecognizer)
    }

    #[test]
    fn test_single_replacement() {
        let text = "SSN: 123-45-6789";
        let spans = resolved(vec![span(5, 16, Category::Ssn)], text);
        let (out, audit) = engine().apply(text, &spans).unwrap();
        assert_eq!(out, "SSN: identifier");
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].original, "123-45-6789");
        assert_eq!(audit[0].replacement, "identifier");
        assert_eq!(audit[0].start, 5);
        assert_eq!(audit[0].end, 16);
    }

    #[test]
    fn test_multiple_replacements_keep_original_offsets() {
        let text = "a@b.co and 123-45-6789";
        let spans = resolved(
            vec![
                span(0, 6, Category::EmailAddress),
                span(11, 22, Category::Ssn),
            ],
            text,
        );
        let (out, audit) = engine().apply(text, &spans).unwrap();
        assert_eq!(out, "email and identifier");
        // Audit offsets are in the pre-replacement coordinate system
        assert_eq!(audit[0].start, 0);
        assert_eq!(audit[0].end, 6);
        assert_eq!(audit[1].start, 11);
        assert_eq!(audit[1].end, 22);
    }

    #[test]
    fn test_unmapped_category_gets_default_token() {
        let text = "mystery value";
        let spans = resolved(vec![span(0, 7, Category::Other)], text);
        let (out, audit) = engine().apply(text, &spans).unwrap();
        assert_eq!(out, "entity value");
        assert_eq!(audit[0].replacement, DEFAULT_TOKEN);
    }

    #[test]
    fn test_replacement_longer_than_span() {
        let text = "x 12/01/1990 y";
        let spans = resolved(vec![span(2, 12, Category::DateOfBirth)], text);
        let (out, _) = engine().apply(text, &spans).unwrap();
        assert_eq!(out, "x date y");
    }

    #[test]
    fn test_empty_span_set_returns_text_unchanged() {
        let text = "nothing sensitive";
        let (out, audit) = engine()
            .apply(text, &ResolvedSpans::empty())
            .unwrap();
        assert_eq!(out, text);
        assert!(audit.is_empty());
    }

    #[test]
    fn test_invalid_boundary_is_replacement_failure() {
        let text = "héllo";
        // 1..2 lands inside the two-byte 'é'; bypass the resolver to reach
        // the engine's own validation
        let spans = ResolvedSpans::from_sorted(vec![span(1, 2, Category::Person)]);
        let result = engine().apply(text, &spans);
        assert!(matches!(result, Err(AegisError::Replacement(_))));
    }

    #[test]
    fn test_unicode_text_around_spans() {
        let text = "héllo user@example.com wörld";
        let start = text.find("user@").unwrap();
        let spans = resolved(vec![span(start, start + 16, Category::EmailAddress)], text);
        let (out, _) = engine().apply(text, &spans).unwrap();
        assert_eq!(out, "héllo email wörld");
    }
}
