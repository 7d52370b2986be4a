//! Segmentation output: chunks and the per-document report.

use serde::{Deserialize, Serialize};

use crate::segment::FontProfile;

/// Count words the way every threshold in the pipeline counts them.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A titled unit of output text, bounded by the word budget where the
/// paragraph structure allows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Section title (heading text, merged title, or "Introduction")
    pub title: String,
    /// Body text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// What the accumulator did with an accepted heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingOutcome {
    /// The heading opened a new section.
    Started,
    /// The pending section was too short; the heading was folded into its title.
    Merged,
}

/// A line the classifier accepted as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedHeading {
    /// Heading text
    pub text: String,
    /// Font size of the heading line
    pub font_size: f32,
    /// How the heading was applied
    pub outcome: HeadingOutcome,
}

/// Everything one segmentation run produced.
///
/// `chunks` is the result; the remaining fields are diagnostics and never
/// influence it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentReport {
    /// Final chunk sequence
    pub chunks: Vec<Chunk>,
    /// Font profile of the document
    pub profile: FontProfile,
    /// Every accepted heading in document order
    pub headings: Vec<DetectedHeading>,
    /// Number of lines analyzed
    pub line_count: usize,
}

impl SegmentReport {
    /// Consume the report and keep only the chunks.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Total words across all chunks.
    pub fn total_words(&self) -> usize {
        self.chunks.iter().map(Chunk::word_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_heading_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&HeadingOutcome::Merged).unwrap();
        assert_eq!(json, "\"merged\"");
    }
}
