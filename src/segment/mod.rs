//! Heading detection and section segmentation.
//!
//! ```text
//! Line[]  ->  FontProfile  ->  classify each line  ->  accumulate  ->  split
//!            (one scan)        HeadingClassifier       SectionAccumulator
//! ```

mod accumulator;
mod classifier;
mod options;
mod profile;
mod splitter;
mod vocabulary;

pub use accumulator::{AccumulatorState, SectionAccumulator, Transition, DEFAULT_TITLE};
pub use classifier::{
    is_title_case, HeadingClassifier, Verdict, MAX_HEADING_CHARS, MIN_HEADING_CHARS,
    TITLE_CASE_RATIO, TITLE_CASE_SIZE_MARGIN,
};
pub use options::{
    PageSelection, SegmentOptions, DEFAULT_FONT_THRESHOLD_RATIO, DEFAULT_MAX_WORDS_PER_CHUNK,
    DEFAULT_MIN_FONT_SIZE, DEFAULT_MIN_SECTION_WORDS,
};
pub use profile::{FontProfile, DISTRIBUTION_SUMMARY_LEN};
pub use splitter::{SectionSplitter, PARAGRAPH_SEPARATOR};
pub use vocabulary::{HeadingVocabulary, PatternRule, RuleConfig, VocabularyConfig};

use crate::error::Result;
use crate::model::{Line, SegmentReport};

/// Runs the full segmentation pipeline over a line sequence.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    classifier: HeadingClassifier,
    options: SegmentOptions,
}

impl Segmenter {
    /// Create a segmenter with the built-in vocabulary.
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            classifier: HeadingClassifier::default(),
            options,
        }
    }

    /// Create a segmenter with a custom vocabulary.
    pub fn with_vocabulary(options: SegmentOptions, vocabulary: HeadingVocabulary) -> Self {
        Self {
            classifier: HeadingClassifier::new(vocabulary),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Profile the lines, classify them, and group them into chunks.
    pub fn segment(&self, lines: &[Line]) -> Result<SegmentReport> {
        self.options.validate()?;

        let profile = FontProfile::analyze(lines, self.options.font_threshold_ratio)?;
        profile.log_summary();

        let mut accumulator = SectionAccumulator::new(
            self.options.min_section_words,
            SectionSplitter::new(self.options.max_words_per_chunk),
        );

        for line in lines {
            if self
                .classifier
                .is_major_heading(&line.text, line.font_size, &profile)
            {
                accumulator.push_heading(&line.text, line.font_size);
            } else {
                accumulator.push_body(&line.text);
            }
        }

        let (chunks, headings) = accumulator.finish();
        log::info!(
            "Detected {} headings, produced {} chunks from {} lines",
            headings.len(),
            chunks.len(),
            lines.len()
        );

        Ok(SegmentReport {
            chunks,
            profile,
            headings,
            line_count: lines.len(),
        })
    }
}

/// Segment a line sequence with the built-in vocabulary.
pub fn segment_lines(lines: &[Line], options: &SegmentOptions) -> Result<SegmentReport> {
    Segmenter::new(options.clone()).segment(lines)
}
