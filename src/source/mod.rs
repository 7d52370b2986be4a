//! Document line sources.
//!
//! A [`LineSource`] hands out, page by page, the spans of every visual line.
//! [`extract_lines`] applies the minimum font size filter and flattens the
//! pages into one ordered [`Line`] sequence.

mod memory;
mod pdf;

pub use memory::MemoryLineSource;
pub use pdf::PdfLineSource;

use crate::error::Result;
use crate::model::{Line, Span};
use crate::segment::PageSelection;

/// A document that can be read as lines of spans.
pub trait LineSource {
    /// Page numbers in reading order (1-based).
    fn pages(&self) -> Vec<u32>;

    /// The lines of one page, each as its spans in reading order.
    fn page_lines(&self, page: u32) -> Result<Vec<Vec<Span>>>;
}

/// Read every selected page of `source` into a flat line sequence.
///
/// The source is taken by value and dropped before this returns, on success
/// and on error alike, so the underlying document is always released.
pub fn extract_lines<S: LineSource>(
    source: S,
    min_font_size: f32,
    pages: &PageSelection,
) -> Result<Vec<Line>> {
    let mut lines = Vec::new();

    for page in source.pages() {
        if !pages.includes(page) {
            continue;
        }

        let page_lines = source.page_lines(page)?;
        let before = lines.len();
        lines.extend(
            page_lines
                .iter()
                .filter_map(|spans| Line::from_spans(spans, min_font_size)),
        );
        log::debug!("Page {}: {} lines", page, lines.len() - before);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Source that records when it is dropped and can fail on a given page.
    struct TrackedSource {
        failing_page: Option<u32>,
        dropped: Rc<Cell<bool>>,
    }

    impl LineSource for TrackedSource {
        fn pages(&self) -> Vec<u32> {
            vec![1, 2, 3]
        }

        fn page_lines(&self, page: u32) -> Result<Vec<Vec<Span>>> {
            if self.failing_page == Some(page) {
                return Err(Error::PdfParse(format!("page {} is damaged", page)));
            }
            Ok(vec![
                vec![Span::new(format!("Page {} body", page), 10.0)],
                vec![Span::new("footnote", 4.0)],
            ])
        }
    }

    impl Drop for TrackedSource {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    #[test]
    fn test_extract_lines_flattens_pages() {
        let dropped = Rc::new(Cell::new(false));
        let source = TrackedSource {
            failing_page: None,
            dropped: dropped.clone(),
        };
        let lines = extract_lines(source, 6.0, &PageSelection::All).unwrap();
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Page 1 body", "Page 2 body", "Page 3 body"]);
        assert!(dropped.get());
    }

    #[test]
    fn test_extract_lines_respects_page_selection() {
        let source = TrackedSource {
            failing_page: None,
            dropped: Rc::new(Cell::new(false)),
        };
        let lines = extract_lines(source, 6.0, &PageSelection::Pages(vec![2])).unwrap();
        assert_eq!(lines, vec![Line::new("Page 2 body", 10.0)]);
    }

    #[test]
    fn test_source_released_on_error() {
        let dropped = Rc::new(Cell::new(false));
        let source = TrackedSource {
            failing_page: Some(2),
            dropped: dropped.clone(),
        };
        let result = extract_lines(source, 6.0, &PageSelection::All);
        assert!(matches!(result, Err(Error::PdfParse(_))));
        assert!(dropped.get());
    }
}
