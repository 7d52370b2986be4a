//! Spans and lines as delivered by a line source.

use serde::{Deserialize, Serialize};

/// A run of text sharing one font size, as reported by the document parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// One visually distinct line of the document.
///
/// `font_size` is the largest span size that survived the minimum font size
/// filter; `text` is already trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Trimmed line text
    pub text: String,
    /// Maximum visible span size in points
    pub font_size: f32,
}

impl Line {
    /// Create a new line.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Collapse the spans of one visual line.
    ///
    /// Spans smaller than `min_font_size` are invisible: their text is not
    /// concatenated and their size does not count. Returns `None` when
    /// nothing visible remains.
    pub fn from_spans(spans: &[Span], min_font_size: f32) -> Option<Self> {
        let mut text = String::new();
        let mut max_size: f32 = 0.0;

        for span in spans.iter().filter(|s| s.size >= min_font_size) {
            text.push_str(&span.text);
            max_size = max_size.max(span.size);
        }

        let text = text.trim();
        if text.is_empty() || max_size <= 0.0 {
            return None;
        }

        Some(Self::new(text, max_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spans_concatenates_visible_spans() {
        let spans = vec![
            Span::new("Engine ", 12.0),
            Span::new("[1]", 4.0),
            Span::new("layout", 14.0),
        ];
        let line = Line::from_spans(&spans, 6.0).unwrap();
        assert_eq!(line.text, "Engine layout");
        assert_eq!(line.font_size, 14.0);
    }

    #[test]
    fn test_from_spans_drops_invisible_line() {
        let spans = vec![Span::new("tiny footnote", 5.0)];
        assert!(Line::from_spans(&spans, 6.0).is_none());
    }

    #[test]
    fn test_from_spans_drops_blank_line() {
        let spans = vec![Span::new("   ", 12.0), Span::new("\t", 12.0)];
        assert!(Line::from_spans(&spans, 6.0).is_none());
    }

    #[test]
    fn test_from_spans_zero_size() {
        let spans = vec![Span::new("ghost", 0.0)];
        assert!(Line::from_spans(&spans, 0.0).is_none());
    }
}
