//! Segmentation options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Default minimum visible span size in points.
pub const DEFAULT_MIN_FONT_SIZE: f32 = 6.0;
/// Default word budget per chunk.
pub const DEFAULT_MAX_WORDS_PER_CHUNK: usize = 800;
/// Default minimum body size for a section to stand alone.
pub const DEFAULT_MIN_SECTION_WORDS: usize = 100;
/// Default multiplier from body font to heading threshold.
pub const DEFAULT_FONT_THRESHOLD_RATIO: f32 = 1.5;

/// Options for segmenting a document into chunks.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Spans smaller than this are invisible to the whole pipeline
    pub min_font_size: f32,

    /// Word budget enforced by the splitter
    pub max_words_per_chunk: usize,

    /// Minimum body words for a section to be emitted on its own
    pub min_section_words: usize,

    /// Heading threshold as a multiple of the body font size
    pub font_threshold_ratio: f32,

    /// Which pages to read from the source
    pub pages: PageSelection,
}

impl SegmentOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum visible font size.
    pub fn with_min_font_size(mut self, size: f32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the chunk word budget.
    pub fn with_max_words_per_chunk(mut self, words: usize) -> Self {
        self.max_words_per_chunk = words;
        self
    }

    /// Set the minimum section size in words.
    pub fn with_min_section_words(mut self, words: usize) -> Self {
        self.min_section_words = words;
        self
    }

    /// Set the heading threshold ratio.
    pub fn with_font_threshold_ratio(mut self, ratio: f32) -> Self {
        self.font_threshold_ratio = ratio;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Check that every option is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.min_font_size.is_finite() || self.min_font_size < 0.0 {
            return Err(Error::InvalidOptions(format!(
                "min_font_size must be a non-negative number, got {}",
                self.min_font_size
            )));
        }
        if !self.font_threshold_ratio.is_finite() || self.font_threshold_ratio <= 0.0 {
            return Err(Error::InvalidOptions(format!(
                "font_threshold_ratio must be positive, got {}",
                self.font_threshold_ratio
            )));
        }
        if self.max_words_per_chunk == 0 {
            return Err(Error::InvalidOptions(
                "max_words_per_chunk must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_words_per_chunk: DEFAULT_MAX_WORDS_PER_CHUNK,
            min_section_words: DEFAULT_MIN_SECTION_WORDS,
            font_threshold_ratio: DEFAULT_FONT_THRESHOLD_RATIO,
            pages: PageSelection::All,
        }
    }
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Read all pages
    #[default]
    All,
    /// Read a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Read specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid start page")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid end page")?;
                if start > end {
                    return Err(format!("Range start {} is after end {}", start, end));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid page number")?;
                pages.extend(start..=end);
            } else {
                pages.push(part.parse().map_err(|_| "Invalid page number")?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
