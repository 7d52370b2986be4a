//! In-memory line source for pre-extracted documents.

use crate::error::{Error, Result};
use crate::model::Span;

use super::LineSource;

/// Pages of span lines held in memory.
///
/// Useful when another extractor already produced spans with sizes, or to
/// feed the segmenter from JSON.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    pages: Vec<Vec<Vec<Span>>>,
}

impl MemoryLineSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from pages of span lines.
    pub fn from_pages(pages: Vec<Vec<Vec<Span>>>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn add_page(&mut self, lines: Vec<Vec<Span>>) {
        self.pages.push(lines);
    }

    /// Append a page where every line is a single span.
    pub fn add_simple_page<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        self.pages.push(
            lines
                .into_iter()
                .map(|(text, size)| vec![Span::new(text, size)])
                .collect(),
        );
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

impl LineSource for MemoryLineSource {
    fn pages(&self) -> Vec<u32> {
        (1..=self.page_count()).collect()
    }

    fn page_lines(&self, page: u32) -> Result<Vec<Vec<Span>>> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_one_based() {
        let mut source = MemoryLineSource::new();
        source.add_simple_page([("first", 10.0)]);
        source.add_simple_page([("second", 10.0)]);

        assert_eq!(source.pages(), vec![1, 2]);
        assert_eq!(
            source.page_lines(2).unwrap(),
            vec![vec![Span::new("second", 10.0)]]
        );
    }

    #[test]
    fn test_out_of_range_page() {
        let source = MemoryLineSource::from_pages(vec![vec![]]);
        assert!(matches!(
            source.page_lines(0),
            Err(Error::PageOutOfRange(0, 1))
        ));
        assert!(matches!(
            source.page_lines(5),
            Err(Error::PageOutOfRange(5, 1))
        ));
    }
}
