//! Pattern library for the regex-based detection layers
//!
//! Both the context-aware pattern recognizer and the strict fallback
//! recognizer load their rules from one TOML document. The library is
//! embedded at compile time and can be replaced per deployment through
//! `detection.pattern_library`.

use crate::domain::category::Category;
use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use serde::Deserialize;
use std::path::Path;

/// Context-aware rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    /// Rule name, used in logs only
    name: String,
    /// Category label (wire form, e.g. `DATE_OF_BIRTH`)
    category: String,
    /// Regex applied to the input text
    regex: String,
    /// Proximity keywords that boost the confidence score
    #[serde(default)]
    keywords: Vec<String>,
    /// Base confidence before any keyword boost
    score: f32,
    /// Capture group to use as the span extent; whole match when unset
    #[serde(default)]
    group: Option<usize>,
}

/// Strict fallback rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct FallbackDefinition {
    name: String,
    category: String,
    regex: String,
    /// Explicit confidence; derived from the category tier when unset
    #[serde(default)]
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default, rename = "pattern")]
    patterns: Vec<PatternDefinition>,
    #[serde(default, rename = "fallback")]
    fallbacks: Vec<FallbackDefinition>,
}

/// Compiled context-aware rule
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub category: Category,
    pub regex: regex::Regex,
    /// Lowercased proximity keywords
    pub keywords: Vec<String>,
    pub score: f32,
    pub group: Option<usize>,
}

/// Compiled fallback rule
///
/// Fallback rules use `fancy-regex` because some of the original patterns
/// rely on look-ahead context (routing numbers, NPI, license plates).
#[derive(Debug, Clone)]
pub struct CompiledFallback {
    pub name: String,
    pub category: Category,
    pub regex: fancy_regex::Regex,
    pub score: f32,
}

/// Fallback confidence tier for a category
///
/// HIPAA-critical identifiers rank highest, SOC 2 credential/financial
/// identifiers next; everything else detects at baseline confidence.
pub fn fallback_confidence(category: Category) -> f32 {
    match category {
        Category::Ssn
        | Category::MedicalRecordNumber
        | Category::DateOfBirth
        | Category::AgeOver89
        | Category::HealthPlanNumber => 0.8,
        Category::CreditCard | Category::ApiKey | Category::Password => 0.75,
        _ => 0.5,
    }
}

/// Compiled pattern registry shared by the regex detection layers
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    fallbacks: Vec<CompiledFallback>,
}

impl PatternRegistry {
    /// Load and compile a registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AegisError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Compile a registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            AegisError::Configuration(format!("Failed to parse pattern library TOML: {}", e))
        })?;

        let mut patterns = Vec::with_capacity(library.patterns.len());
        for def in &library.patterns {
            let category = parse_category(&def.name, &def.category)?;
            let regex = regex::Regex::new(&def.regex).map_err(|e| {
                AegisError::Configuration(format!(
                    "Invalid regex in pattern '{}': {}",
                    def.name, e
                ))
            })?;
            patterns.push(CompiledPattern {
                name: def.name.clone(),
                category,
                regex,
                keywords: def.keywords.iter().map(|k| k.to_lowercase()).collect(),
                score: def.score.clamp(0.0, 1.0),
                group: def.group,
            });
        }

        let mut fallbacks = Vec::with_capacity(library.fallbacks.len());
        for def in &library.fallbacks {
            let category = parse_category(&def.name, &def.category)?;
            let regex = fancy_regex::Regex::new(&def.regex).map_err(|e| {
                AegisError::Configuration(format!(
                    "Invalid regex in fallback '{}': {}",
                    def.name, e
                ))
            })?;
            fallbacks.push(CompiledFallback {
                name: def.name.clone(),
                category,
                regex,
                score: def
                    .score
                    .unwrap_or_else(|| fallback_confidence(category))
                    .clamp(0.0, 1.0),
            });
        }

        if patterns.is_empty() && fallbacks.is_empty() {
            return Err(AegisError::Configuration(
                "Pattern library contains no rules".to_string(),
            ));
        }

        Ok(Self {
            patterns,
            fallbacks,
        })
    }

    /// Compile the embedded default library
    pub fn embedded() -> Result<Self> {
        Self::from_toml(include_str!("../../../patterns/recognizers.toml"))
    }

    /// Context-aware rules, in library order
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Fallback rules, in library order
    pub fn fallbacks(&self) -> &[CompiledFallback] {
        &self.fallbacks
    }
}

fn parse_category(rule_name: &str, label: &str) -> Result<Category> {
    Category::from_label(label).ok_or_else(|| {
        AegisError::Configuration(format!(
            "Unknown category '{}' in rule '{}'",
            label, rule_name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_compiles() {
        let registry = PatternRegistry::embedded().unwrap();
        assert!(!registry.patterns().is_empty());
        assert!(!registry.fallbacks().is_empty());
    }

    #[test]
    fn test_embedded_ssn_fallback() {
        let registry = PatternRegistry::embedded().unwrap();
        let ssn = registry
            .fallbacks()
            .iter()
            .find(|f| f.category == Category::Ssn)
            .expect("SSN fallback rule present");
        assert!(ssn.regex.is_match("123-45-6789").unwrap());
        assert_eq!(ssn.score, 0.8);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let toml = r#"
[[pattern]]
name = "bad"
category = "NOT_A_CATEGORY"
regex = "x"
score = 0.5
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let toml = r#"
[[pattern]]
name = "broken"
category = "SSN"
regex = "[unclosed"
score = 0.5
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_empty_library_rejected() {
        assert!(PatternRegistry::from_toml("").is_err());
    }

    #[test]
    fn test_fallback_confidence_tiers() {
        assert_eq!(fallback_confidence(Category::Ssn), 0.8);
        assert_eq!(fallback_confidence(Category::CreditCard), 0.75);
        assert_eq!(fallback_confidence(Category::EmailAddress), 0.5);
    }
}
