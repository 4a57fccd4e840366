//! Context-aware pattern recognizer
//!
//! Regex rules with proximity-keyword confidence boosting. A raw hit's base
//! score is raised by the configured boost when one of the rule's keywords
//! occurs within the configured window on either side of the match; hits
//! whose final score stays below the score threshold are discarded.
//!
//! Numeric age matches are reclassified: a parsed value above
//! [`AGE_PROMOTION_THRESHOLD`] promotes the span from `AGE` to
//! `AGE_OVER_89`. The promotion is a compliance requirement and lives here
//! in code, not in the regex definitions.

use super::registry::{CompiledPattern, PatternRegistry};
use super::Recognizer;
use crate::config::DetectionConfig;
use crate::domain::category::Category;
use crate::domain::result::Result;
use crate::domain::span::{DetectionMethod, Span};
use async_trait::async_trait;

/// Ages strictly above this value are reclassified as `AGE_OVER_89`
pub const AGE_PROMOTION_THRESHOLD: u32 = 89;

/// Score assigned to promoted over-89 age spans
pub const AGE_OVER_89_SCORE: f32 = 0.95;

/// Context-aware pattern recognizer
pub struct PatternRecognizer {
    rules: Vec<CompiledPattern>,
    keyword_window: usize,
    keyword_boost: f32,
    score_threshold: f32,
}

impl PatternRecognizer {
    /// Build from a compiled registry and the detection configuration
    pub fn from_registry(registry: &PatternRegistry, config: &DetectionConfig) -> Self {
        Self {
            rules: registry.patterns().to_vec(),
            keyword_window: config.keyword_window,
            keyword_boost: config.keyword_boost,
            score_threshold: config.score_threshold,
        }
    }

    /// Number of loaded rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn detect_sync(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for rule in &self.rules {
            for caps in rule.regex.captures_iter(text) {
                let full = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                let extent = match rule.group {
                    Some(group) => match caps.get(group) {
                        Some(m) => m,
                        None => continue,
                    },
                    None => full,
                };
                if extent.start() == extent.end() {
                    continue;
                }

                let mut category = rule.category;
                let mut score = rule.score;

                if keyword_in_window(
                    text,
                    full.start(),
                    full.end(),
                    &rule.keywords,
                    self.keyword_window,
                ) {
                    score = (score + self.keyword_boost).min(1.0);
                }

                if rule.category == Category::Age {
                    if let Some(age) = caps.get(1).and_then(|g| g.as_str().parse::<u32>().ok()) {
                        if age > AGE_PROMOTION_THRESHOLD {
                            category = Category::AgeOver89;
                            score = score.max(AGE_OVER_89_SCORE);
                        }
                    }
                }

                if score < self.score_threshold {
                    continue;
                }

                spans.push(Span::new(
                    extent.start(),
                    extent.end(),
                    category,
                    score,
                    DetectionMethod::CustomRecognizer,
                ));
            }
        }

        spans
    }
}

#[async_trait]
impl Recognizer for PatternRecognizer {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn method(&self) -> DetectionMethod {
        DetectionMethod::CustomRecognizer
    }

    async fn detect(&self, text: &str, _language: &str) -> Result<Vec<Span>> {
        Ok(self.detect_sync(text))
    }
}

/// True when any keyword occurs within `window` bytes on either side of the
/// match
fn keyword_in_window(
    text: &str,
    match_start: usize,
    match_end: usize,
    keywords: &[String],
    window: usize,
) -> bool {
    if keywords.is_empty() {
        return false;
    }

    let before_start = floor_char_boundary(text, match_start.saturating_sub(window));
    let after_end = floor_char_boundary(text, match_end.saturating_add(window).min(text.len()));

    let before = text[before_start..match_start].to_lowercase();
    let after = text[match_end..after_end].to_lowercase();

    keywords
        .iter()
        .any(|kw| before.contains(kw.as_str()) || after.contains(kw.as_str()))
}

/// Largest character boundary at or below `idx`
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> PatternRecognizer {
        PatternRecognizer::from_registry(
            &PatternRegistry::embedded().unwrap(),
            &DetectionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_dob_with_context_uses_capture_group() {
        let spans = recognizer()
            .detect("DOB: 05/15/1980", "en")
            .await
            .unwrap();
        let dob = spans
            .iter()
            .find(|s| s.category == Category::DateOfBirth)
            .expect("date of birth detected");
        // Span covers only the date digits, not the "DOB: " prefix
        assert_eq!(&"DOB: 05/15/1980"[dob.start..dob.end], "05/15/1980");
        assert!(dob.score >= 0.9);
    }

    #[tokio::test]
    async fn test_bare_date_below_threshold_without_keyword() {
        let spans = recognizer()
            .detect("Appointment: 03/20/2024", "en")
            .await
            .unwrap();
        assert!(!spans.iter().any(|s| s.category == Category::DateOfBirth));
    }

    #[tokio::test]
    async fn test_keyword_boost_promotes_bare_date() {
        // "birth" within the window lifts the 0.6 base over the 0.7 threshold
        let spans = recognizer()
            .detect("birth recorded as 06/12/1975", "en")
            .await
            .unwrap();
        let dob = spans
            .iter()
            .find(|s| s.category == Category::DateOfBirth)
            .expect("boosted date detected");
        assert!((dob.score - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_age_promotion_over_89() {
        let spans = recognizer().detect("Age: 92", "en").await.unwrap();
        let age = spans
            .iter()
            .find(|s| s.category == Category::AgeOver89)
            .expect("promoted age span");
        assert!(age.score >= AGE_OVER_89_SCORE);
        assert!(!spans.iter().any(|s| s.category == Category::Age));
    }

    #[tokio::test]
    async fn test_age_under_90_stays_age() {
        let spans = recognizer().detect("Age: 45", "en").await.unwrap();
        assert!(spans.iter().any(|s| s.category == Category::Age));
        assert!(!spans.iter().any(|s| s.category == Category::AgeOver89));
    }

    #[tokio::test]
    async fn test_mrn_detection() {
        let spans = recognizer().detect("MRN#12345678", "en").await.unwrap();
        let mrn = spans
            .iter()
            .find(|s| s.category == Category::MedicalRecordNumber)
            .expect("mrn detected");
        assert_eq!(mrn.start, 0);
        assert_eq!(mrn.end, "MRN#12345678".len());
    }

    #[test]
    fn test_keyword_window_boundaries() {
        // keyword 'dob' sits exactly at the edge of a 30-byte window before
        // the match starting at offset 30
        let text = format!("dob{}12/01/1990", " ".repeat(27));
        assert!(keyword_in_window(&text, 30, 40, &["dob".to_string()], 30));
        assert!(!keyword_in_window(&text, 30, 40, &["dob".to_string()], 25));
    }

    #[test]
    fn test_floor_char_boundary_multibyte() {
        let text = "aé b";
        // offset 2 is inside 'é'
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 3), 3);
        assert_eq!(floor_char_boundary(text, 99), text.len());
    }
}
