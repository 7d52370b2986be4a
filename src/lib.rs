//! # sectionize
//!
//! Heading detection and section chunking for PDF documents.
//!
//! Every line of a document is classified as a heading or body text from its
//! font size relative to the document's dominant body font and from its
//! lexical shape. Body text between headings becomes titled sections, short
//! sections are merged forward, and oversized sections are split at
//! paragraph breaks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sectionize::extract_sections;
//!
//! fn main() -> sectionize::Result<()> {
//!     for chunk in extract_sections("ferrari.pdf")? {
//!         println!("{}: {} words", chunk.title, chunk.word_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`source`]: reads `(text, font size)` lines from a document
//! - [`segment`]: font profile, heading classifier, accumulator, splitter
//! - [`render`]: JSON and Markdown output

pub mod error;
pub mod model;
pub mod render;
pub mod segment;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{word_count, Chunk, DetectedHeading, HeadingOutcome, Line, SegmentReport, Span};
pub use render::JsonFormat;
pub use segment::{
    segment_lines, FontProfile, HeadingClassifier, HeadingVocabulary, PageSelection,
    SegmentOptions, Segmenter, VocabularyConfig,
};
pub use source::{extract_lines, LineSource, MemoryLineSource, PdfLineSource};

use std::path::Path;

/// Split a PDF file into titled chunks with default options.
///
/// # Example
///
/// ```no_run
/// use sectionize::extract_sections;
///
/// let chunks = extract_sections("document.pdf").unwrap();
/// println!("{} chunks", chunks.len());
/// ```
pub fn extract_sections<P: AsRef<Path>>(path: P) -> Result<Vec<Chunk>> {
    extract_sections_with_options(path, &SegmentOptions::default())
}

/// Split a PDF file into titled chunks with custom options.
///
/// # Example
///
/// ```no_run
/// use sectionize::{extract_sections_with_options, SegmentOptions};
///
/// let options = SegmentOptions::new()
///     .with_max_words_per_chunk(400)
///     .with_min_section_words(50);
/// let chunks = extract_sections_with_options("document.pdf", &options).unwrap();
/// ```
pub fn extract_sections_with_options<P: AsRef<Path>>(
    path: P,
    options: &SegmentOptions,
) -> Result<Vec<Chunk>> {
    segment_file(path, options).map(SegmentReport::into_chunks)
}

/// Segment a PDF file and return chunks together with diagnostics.
pub fn segment_file<P: AsRef<Path>>(path: P, options: &SegmentOptions) -> Result<SegmentReport> {
    Sectionizer::new()
        .with_options(options.clone())
        .run(path)
}

/// Builder for segmenting documents.
///
/// # Example
///
/// ```no_run
/// use sectionize::{PageSelection, Sectionizer};
///
/// let report = Sectionizer::new()
///     .with_max_words(500)
///     .with_pages(PageSelection::Range(1..=20))
///     .run("document.pdf")?;
/// println!("body font {:.1}pt", report.profile.body_font);
/// # Ok::<(), sectionize::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sectionizer {
    options: SegmentOptions,
    vocabulary: Option<HeadingVocabulary>,
}

impl Sectionizer {
    /// Create a builder with default options and the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the minimum span font size.
    pub fn with_min_font_size(mut self, size: f32) -> Self {
        self.options = self.options.with_min_font_size(size);
        self
    }

    /// Set the per-chunk word budget.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.options = self.options.with_max_words_per_chunk(words);
        self
    }

    /// Set the minimum words for a section to stand alone.
    pub fn with_min_section_words(mut self, words: usize) -> Self {
        self.options = self.options.with_min_section_words(words);
        self
    }

    /// Set the heading threshold ratio.
    pub fn with_font_ratio(mut self, ratio: f32) -> Self {
        self.options = self.options.with_font_threshold_ratio(ratio);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Use a custom heading vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: HeadingVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// The options in use.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Segment a PDF file.
    pub fn run<P: AsRef<Path>>(self, path: P) -> Result<SegmentReport> {
        self.options.validate()?;
        let source = PdfLineSource::open(path)?;
        self.run_source(source)
    }

    /// Segment a PDF held in memory.
    pub fn run_bytes(self, data: &[u8]) -> Result<SegmentReport> {
        self.options.validate()?;
        let source = PdfLineSource::from_bytes(data)?;
        self.run_source(source)
    }

    /// Segment any line source. The source is released before segmentation.
    pub fn run_source<S: LineSource>(self, source: S) -> Result<SegmentReport> {
        self.options.validate()?;
        let lines = extract_lines(source, self.options.min_font_size, &self.options.pages)?;
        self.segmenter().segment(&lines)
    }

    fn segmenter(self) -> Segmenter {
        match self.vocabulary {
            Some(vocabulary) => Segmenter::with_vocabulary(self.options, vocabulary),
            None => Segmenter::new(self.options),
        }
    }
}
