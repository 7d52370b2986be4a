//! Major heading classification.

use regex::Regex;

use super::profile::FontProfile;
use super::vocabulary::HeadingVocabulary;

/// Shortest text (in characters) that can be a heading.
pub const MIN_HEADING_CHARS: usize = 5;
/// Longest text (in characters) that can be a heading.
pub const MAX_HEADING_CHARS: usize = 100;
/// Share of capitalized words for multi-word text to count as title case.
pub const TITLE_CASE_RATIO: f32 = 0.6;
/// Extra margin over the threshold required for non-vocabulary headings.
pub const TITLE_CASE_SIZE_MARGIN: f32 = 1.2;

/// Why a line was or was not accepted as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Shorter than [`MIN_HEADING_CHARS`] or longer than [`MAX_HEADING_CHARS`]
    BadLength,
    /// Only digits, periods, brackets, parentheses, whitespace and dashes
    NumericOnly,
    /// Matched a skip pattern
    Skipped,
    /// Smaller than the heading threshold
    TooSmall,
    /// Large enough but neither vocabulary nor large title-case text
    NotHeading,
    /// Accepted through a major pattern
    MajorPattern,
    /// Accepted as title-case text above the stricter size bar
    TitleCase,
}

impl Verdict {
    /// Whether the verdict accepts the line.
    pub fn is_heading(self) -> bool {
        matches!(self, Verdict::MajorPattern | Verdict::TitleCase)
    }
}

/// Decides which lines are major section headings.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    vocabulary: HeadingVocabulary,
    numeric_only: Regex,
}

impl HeadingClassifier {
    /// Create a classifier over a vocabulary.
    pub fn new(vocabulary: HeadingVocabulary) -> Self {
        Self {
            vocabulary,
            numeric_only: Regex::new(r"^[\d.\[\]()\s\-–—]+$").expect("static pattern is valid"),
        }
    }

    /// The vocabulary in use.
    pub fn vocabulary(&self) -> &HeadingVocabulary {
        &self.vocabulary
    }

    /// Check whether a line is a major heading.
    pub fn is_major_heading(&self, text: &str, font_size: f32, profile: &FontProfile) -> bool {
        self.classify(text, font_size, profile).is_heading()
    }

    /// Run the full decision sequence and report which step decided.
    pub fn classify(&self, text: &str, font_size: f32, profile: &FontProfile) -> Verdict {
        let len = text.chars().count();
        if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
            return Verdict::BadLength;
        }

        if self.numeric_only.is_match(text) {
            return Verdict::NumericOnly;
        }

        if let Some(rule) = self.vocabulary.skip_match(text) {
            log::trace!("'{}' skipped by {} rule", text, rule.label);
            return Verdict::Skipped;
        }

        if font_size < profile.heading_threshold {
            return Verdict::TooSmall;
        }

        if self.vocabulary.major_match(text).is_some() {
            return Verdict::MajorPattern;
        }

        if is_title_case(text) && font_size >= profile.heading_threshold * TITLE_CASE_SIZE_MARGIN
        {
            return Verdict::TitleCase;
        }

        Verdict::NotHeading
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(HeadingVocabulary::default())
    }
}

/// Title case: most words capitalized, or a capitalized single word.
pub fn is_title_case(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 1 {
        let capitalized = words.iter().filter(|w| starts_uppercase(w)).count();
        capitalized as f32 / words.len() as f32 >= TITLE_CASE_RATIO
    } else {
        starts_uppercase(text)
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FontProfile {
        FontProfile {
            body_font: 10.0,
            heading_threshold: 15.0,
            font_distribution: vec![(10.0, 100)],
        }
    }

    #[test]
    fn test_vocabulary_heading_at_threshold() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        assert!(classifier.is_major_heading("History", 15.0, &profile));
        assert!(classifier.is_major_heading("History", 20.0, &profile));
        assert_eq!(
            classifier.classify("History", 14.9, &profile),
            Verdict::TooSmall
        );
    }

    #[test]
    fn test_monotonic_in_font_size() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        for tenth in 0..400 {
            let size = tenth as f32 / 10.0;
            assert_eq!(
                classifier.is_major_heading("Design", size, &profile),
                size >= profile.heading_threshold,
                "size {}",
                size
            );
        }
    }

    #[test]
    fn test_length_bounds() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        assert_eq!(
            classifier.classify("Cars", 40.0, &profile),
            Verdict::BadLength
        );
        let long = format!("History {}", "x".repeat(100));
        assert_eq!(classifier.classify(&long, 40.0, &profile), Verdict::BadLength);
        // Exactly at the bounds is allowed through the length check.
        assert!(classifier.is_major_heading("Sales", 20.0, &profile));
        let edge = format!("History {}", "y".repeat(92));
        assert_eq!(edge.chars().count(), 100);
        assert!(classifier.is_major_heading(&edge, 20.0, &profile));
    }

    #[test]
    fn test_numeric_only_rejected() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        assert_eq!(
            classifier.classify("1990 – 1995", 30.0, &profile),
            Verdict::NumericOnly
        );
        assert_eq!(
            classifier.classify("[12] (3)", 30.0, &profile),
            Verdict::NumericOnly
        );
    }

    #[test]
    fn test_skip_patterns_override_vocabulary() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        assert_eq!(
            classifier.classify("History of the 300 hp engine", 30.0, &profile),
            Verdict::Skipped
        );
    }

    #[test]
    fn test_title_case_needs_extra_margin() {
        let classifier = HeadingClassifier::default();
        let profile = profile();
        // 15 <= size < 18 clears the threshold but not the title-case bar.
        assert_eq!(
            classifier.classify("Pininfarina Collaboration", 16.0, &profile),
            Verdict::NotHeading
        );
        assert_eq!(
            classifier.classify("Pininfarina Collaboration", 20.0, &profile),
            Verdict::TitleCase
        );
        assert_eq!(
            classifier.classify("the quiet years after", 30.0, &profile),
            Verdict::NotHeading
        );
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("Racing Heritage"));
        assert!(is_title_case("Racing Heritage of Italy")); // 3 of 4
        assert!(!is_title_case("life of the Founder")); // 1 of 4
        assert!(is_title_case("Zagato"));
        assert!(!is_title_case("zagato"));
        assert!(!is_title_case(""));
    }
}
