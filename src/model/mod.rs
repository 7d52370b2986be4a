//! Data types shared by line sources, the segmenter, and renderers.

mod chunk;
mod line;

pub use chunk::{word_count, Chunk, DetectedHeading, HeadingOutcome, SegmentReport};
pub use line::{Line, Span};
