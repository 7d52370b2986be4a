//! Heading vocabulary: the skip and major pattern tables.
//!
//! The tables are plain data. The built-in set is tuned for automotive
//! encyclopedia articles; another domain can supply its own through
//! [`VocabularyConfig`] without touching the classifier or the accumulator.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Patterns that disqualify a line from being a heading.
///
/// Matched case-insensitively anywhere in the text unless anchored.
const AUTOMOTIVE_SKIP: &[(&str, &str)] = &[
    // Citation and reference markers
    ("citation", r"\bpages?\s+\d+"),
    ("citation", r"^\s*pp?\.\s*\d+"),
    ("citation", r"\bfig(ure)?s?\.?\s*\d+"),
    ("citation", r"^see\s+(page|fig|figure|section|chapter|note|table)\b"),
    ("citation", r"\bibid\b"),
    ("citation", r"\bet\s+al\b"),
    ("citation", r"\bcitation needed\b"),
    ("citation", r"^\[\d+\]"),
    // Numeric, punctuation and very short tokens
    ("noise", r"^\d+$"),
    ("noise", r"^[^\p{L}]+$"),
    ("noise", r"^.{1,4}$"),
    // Wikipedia metadata
    ("wiki", r"\bwikipedia\b"),
    ("wiki", r"\bretrieved\b"),
    ("wiki", r"\barchived\b"),
    ("wiki", r"\bisbn\b"),
    // Calendar
    (
        "month",
        r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\b",
    ),
    ("date", r"\b\d{1,2}/\d{1,2}/\d{2,4}\b"),
    ("date", r"\b\d{4}-\d{2}-\d{2}\b"),
    // URLs
    ("url", r"https?://"),
    ("url", r"\bwww\."),
    ("url", r"\.(com|org|net|edu|gov)\b"),
    // Technical units
    ("unit", r"\b(cc|hp|bhp|kw|rpm|mph|km/h|nm|mpg|lb[-\s]?ft)\b"),
    // Drivetrain and fuel
    (
        "drivetrain",
        r"\b(automatic|manual|awd|4wd|fwd|rwd|4x4|cvt|gasoline|petrol|diesel|turbodiesel|lpg|cng)\b",
    ),
    // Currency amounts
    ("currency", r"[$€£¥]\s*\d"),
    ("currency", r"\b(us\$|usd|eur|gbp|jpy)\s*\d"),
    ("currency", r"\b\d[\d,.]*\s*(usd|eur|gbp|jpy|dollars|euros)\b"),
];

/// Patterns that mark a line as a major section heading.
///
/// Matched case-insensitively at the start of the text.
const AUTOMOTIVE_MAJOR: &[(&str, &str)] = &[
    (
        "section",
        r"^(contents|introduction|overview|summary|background|history|design|development|engineering|engines?|powertrains?|transmissions?|chassis|suspension|styling|interior|exterior|specifications|technical specifications|technical data|dimensions|performance|models?|variants?|versions?|trim levels?|production|manufacturing|assembly|safety|crash tests?|awards|reception|reviews|sales|marketing|motorsports?|racing|competition|legacy|recalls?|facelifts?|concepts?|prototypes?|successor|predecessor|gallery)\b",
    ),
    (
        "back_matter",
        r"^(see also|notes|references|citations|sources|bibliography|further reading|external links)\b",
    ),
    (
        "generation",
        r"^(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth)\s+generation\b",
    ),
    ("generation", r"^\d{1,2}(st|nd|rd|th)\s+generation\b"),
    ("generation", r"^generation\s+\d+\b"),
    ("mark", r"^(mark|mk\.?)\s*([ivx]+|\d+)\b"),
    ("numbered", r"^\d{1,2}(\.\d{1,2})*\.?\s+\p{L}"),
    ("year_range", r"^(19|20)\d{2}\s*[-–—]\s*((19|20)\d{2}|present)\b"),
];

/// A compiled pattern with the label of the rule family it belongs to.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Rule family (e.g. "citation", "generation")
    pub label: String,
    /// Compiled, case-insensitive pattern
    pub regex: Regex,
}

impl PatternRule {
    /// Compile a case-insensitive rule.
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            label: label.into(),
            regex,
        })
    }

    /// Check whether the rule matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Serializable form of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule family
    #[serde(default)]
    pub label: String,
    /// Regular expression source
    pub pattern: String,
}

/// Serializable form of a vocabulary, e.g. loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Disqualifying patterns
    #[serde(default)]
    pub skip: Vec<RuleConfig>,
    /// Major heading patterns
    #[serde(default)]
    pub major: Vec<RuleConfig>,
}

/// Ordered skip and major pattern tables consumed by the classifier.
#[derive(Debug, Clone)]
pub struct HeadingVocabulary {
    skip: Vec<PatternRule>,
    major: Vec<PatternRule>,
}

impl HeadingVocabulary {
    /// The built-in vocabulary for automotive encyclopedia articles.
    pub fn automotive() -> Self {
        Self::from_tables(AUTOMOTIVE_SKIP, AUTOMOTIVE_MAJOR)
            .expect("built-in heading patterns are valid")
    }

    /// Compile a vocabulary from `(label, pattern)` tables.
    pub fn from_tables(skip: &[(&str, &str)], major: &[(&str, &str)]) -> Result<Self> {
        let compile = |rules: &[(&str, &str)]| -> Result<Vec<PatternRule>> {
            rules
                .iter()
                .map(|(label, pattern)| PatternRule::new(*label, pattern))
                .collect()
        };
        Ok(Self {
            skip: compile(skip)?,
            major: compile(major)?,
        })
    }

    /// Compile a vocabulary from its serializable form.
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        let compile = |rules: &[RuleConfig]| -> Result<Vec<PatternRule>> {
            rules
                .iter()
                .map(|rule| PatternRule::new(rule.label.as_str(), &rule.pattern))
                .collect()
        };
        Ok(Self {
            skip: compile(&config.skip)?,
            major: compile(&config.major)?,
        })
    }

    /// Parse and compile a JSON vocabulary.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: VocabularyConfig = serde_json::from_str(json)
            .map_err(|e| Error::InvalidOptions(format!("vocabulary JSON: {}", e)))?;
        Self::from_config(&config)
    }

    /// The built-in tables in serializable form.
    pub fn automotive_config() -> VocabularyConfig {
        let to_rules = |rules: &[(&str, &str)]| -> Vec<RuleConfig> {
            rules
                .iter()
                .map(|(label, pattern)| RuleConfig {
                    label: label.to_string(),
                    pattern: pattern.to_string(),
                })
                .collect()
        };
        VocabularyConfig {
            skip: to_rules(AUTOMOTIVE_SKIP),
            major: to_rules(AUTOMOTIVE_MAJOR),
        }
    }

    /// First skip rule matching `text`, if any.
    pub fn skip_match(&self, text: &str) -> Option<&PatternRule> {
        self.skip.iter().find(|rule| rule.is_match(text))
    }

    /// First major rule matching `text`, if any.
    pub fn major_match(&self, text: &str) -> Option<&PatternRule> {
        self.major.iter().find(|rule| rule.is_match(text))
    }

    /// Skip rules in evaluation order.
    pub fn skip_rules(&self) -> &[PatternRule] {
        &self.skip
    }

    /// Major rules in evaluation order.
    pub fn major_rules(&self) -> &[PatternRule] {
        &self.major
    }
}

impl Default for HeadingVocabulary {
    fn default() -> Self {
        Self::automotive()
    }
}
