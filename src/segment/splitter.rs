//! Paragraph-greedy splitting of oversized sections.

use regex::Regex;

use crate::model::{word_count, Chunk};

/// Separator placed between paragraphs that share a chunk.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits sections that exceed a word budget at paragraph boundaries.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    max_words: usize,
    paragraph_break: Regex,
}

impl SectionSplitter {
    /// Create a splitter with a word budget per chunk.
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words,
            paragraph_break: Regex::new(r"\n\s*\n").expect("static pattern is valid"),
        }
    }

    /// Word budget per chunk.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Split one section into one or more chunks.
    ///
    /// Under-budget text comes back untouched. Otherwise paragraphs are
    /// packed greedily; a buffer is flushed only when it is non-empty and the
    /// next paragraph would push it over budget, so a single paragraph larger
    /// than the budget is emitted whole.
    pub fn split(&self, title: &str, text: &str) -> Vec<Chunk> {
        if word_count(text) <= self.max_words {
            return vec![Chunk::new(title, text)];
        }

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_words = 0;

        for paragraph in self.paragraph_break.split(text) {
            let paragraph_words = word_count(paragraph);
            if !buffer.is_empty() && buffer_words + paragraph_words > self.max_words {
                chunks.push(Chunk::new(
                    part_title(title, chunks.len() + 1),
                    std::mem::take(&mut buffer),
                ));
                buffer_words = 0;
            }

            if !buffer.is_empty() {
                buffer.push_str(PARAGRAPH_SEPARATOR);
            }
            buffer.push_str(paragraph);
            buffer_words += paragraph_words;
        }

        if !buffer.is_empty() {
            chunks.push(Chunk::new(part_title(title, chunks.len() + 1), buffer));
        }

        log::debug!("Split '{}' into {} chunks", title, chunks.len());
        chunks
    }
}

/// Title of the `part`-th chunk of a section (1-based).
fn part_title(title: &str, part: usize) -> String {
    if part == 1 {
        title.to_string()
    } else {
        format!("{} (Part {})", title, part)
    }
}
