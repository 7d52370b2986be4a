//! Single-pass section accumulation.
//!
//! Lines arrive in document order, already classified. The accumulator keeps
//! the section being built in an explicit state and reports every step as a
//! [`Transition`], so the merge-vs-finalize decision can be observed directly.

use crate::model::{word_count, Chunk, DetectedHeading, HeadingOutcome};

use super::splitter::SectionSplitter;

/// Title of the content that precedes the first heading.
pub const DEFAULT_TITLE: &str = "Introduction";

/// Section under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorState {
    /// A title is set but no body text has been seen under it.
    NoPendingSection { title: String },
    /// Body text is pending under `title`.
    AccumulatingUnderTitle { title: String, text: String },
}

impl AccumulatorState {
    /// The current title.
    pub fn title(&self) -> &str {
        match self {
            AccumulatorState::NoPendingSection { title }
            | AccumulatorState::AccumulatingUnderTitle { title, .. } => title,
        }
    }
}

/// The effect of feeding one line to the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Body text was appended to the pending section.
    Appended,
    /// A heading replaced a title that had no body text.
    Retitled,
    /// The pending section was emitted as `chunks` and a new one started.
    Finalized { chunks: usize },
    /// The pending section was too short; the heading was merged into it.
    Merged,
}

/// Builds sections from classified lines.
#[derive(Debug)]
pub struct SectionAccumulator {
    state: AccumulatorState,
    min_section_words: usize,
    splitter: SectionSplitter,
    chunks: Vec<Chunk>,
    headings: Vec<DetectedHeading>,
}

impl SectionAccumulator {
    /// Create an accumulator in its initial state.
    pub fn new(min_section_words: usize, splitter: SectionSplitter) -> Self {
        Self {
            state: AccumulatorState::NoPendingSection {
                title: DEFAULT_TITLE.to_string(),
            },
            min_section_words,
            splitter,
            chunks: Vec::new(),
            headings: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    /// Chunks emitted so far.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Feed a line the classifier accepted as a heading.
    pub fn push_heading(&mut self, heading: &str, font_size: f32) -> Transition {
        let state = std::mem::replace(
            &mut self.state,
            AccumulatorState::NoPendingSection {
                title: heading.to_string(),
            },
        );

        let transition = match state {
            AccumulatorState::NoPendingSection { .. } => Transition::Retitled,
            AccumulatorState::AccumulatingUnderTitle { title, text } => {
                if word_count(&text) >= self.min_section_words {
                    let chunks = self.finalize(&title, &text);
                    Transition::Finalized { chunks }
                } else {
                    let merged = format!("{} - {}", title, heading);
                    log::debug!("Merging short section into '{}'", merged);
                    let mut text = text;
                    text.push_str(heading);
                    text.push('\n');
                    self.state = AccumulatorState::AccumulatingUnderTitle {
                        title: merged,
                        text,
                    };
                    Transition::Merged
                }
            }
        };

        let outcome = if transition == Transition::Merged {
            HeadingOutcome::Merged
        } else {
            HeadingOutcome::Started
        };
        log::debug!("Heading ({:.1}pt, {:?}): {}", font_size, outcome, heading);
        self.headings.push(DetectedHeading {
            text: heading.to_string(),
            font_size,
            outcome,
        });

        transition
    }

    /// Feed a body line.
    pub fn push_body(&mut self, line: &str) -> Transition {
        if let AccumulatorState::AccumulatingUnderTitle { text, .. } = &mut self.state {
            text.push_str(line);
            text.push('\n');
        } else {
            self.state = AccumulatorState::AccumulatingUnderTitle {
                title: self.state.title().to_string(),
                text: format!("{}\n", line),
            };
        }
        Transition::Appended
    }

    /// Flush the last section and return chunks and detected headings.
    ///
    /// A trailing section shorter than the minimum is dropped.
    pub fn finish(mut self) -> (Vec<Chunk>, Vec<DetectedHeading>) {
        let state = std::mem::replace(
            &mut self.state,
            AccumulatorState::NoPendingSection {
                title: String::new(),
            },
        );
        if let AccumulatorState::AccumulatingUnderTitle { title, text } = state {
            let words = word_count(&text);
            if words >= self.min_section_words {
                self.finalize(&title, &text);
            } else {
                log::debug!("Dropping trailing section '{}' ({} words)", title, words);
            }
        }
        (self.chunks, self.headings)
    }

    fn finalize(&mut self, title: &str, text: &str) -> usize {
        let chunks = self.splitter.split(title, text);
        let count = chunks.len();
        self.chunks.extend(chunks);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn accumulator(min_words: usize) -> SectionAccumulator {
        SectionAccumulator::new(min_words, SectionSplitter::new(800))
    }

    #[test]
    fn test_initial_state_is_introduction() {
        let acc = accumulator(100);
        assert_eq!(
            acc.state(),
            &AccumulatorState::NoPendingSection {
                title: "Introduction".to_string()
            }
        );
    }

    #[test]
    fn test_back_to_back_headings_retitle() {
        let mut acc = accumulator(100);
        assert_eq!(acc.push_heading("History", 20.0), Transition::Retitled);
        assert_eq!(acc.push_heading("Design", 20.0), Transition::Retitled);
        assert_eq!(acc.state().title(), "Design");

        let (chunks, headings) = acc.finish();
        assert!(chunks.is_empty());
        assert_eq!(headings.len(), 2);
        assert!(headings
            .iter()
            .all(|h| h.outcome == HeadingOutcome::Started));
    }

    #[test]
    fn test_long_section_is_finalized() {
        let mut acc = accumulator(100);
        acc.push_heading("History", 20.0);
        acc.push_body(&words(120));
        assert_eq!(
            acc.push_heading("Design", 20.0),
            Transition::Finalized { chunks: 1 }
        );
        assert_eq!(acc.chunks()[0].title, "History");
        assert_eq!(acc.chunks()[0].text, format!("{}\n", words(120)));
    }

    #[test]
    fn test_short_section_is_merged() {
        let mut acc = accumulator(100);
        acc.push_heading("History", 20.0);
        acc.push_body(&words(50));
        assert_eq!(acc.push_heading("Design", 20.0), Transition::Merged);
        assert_eq!(
            acc.state(),
            &AccumulatorState::AccumulatingUnderTitle {
                title: "History - Design".to_string(),
                text: format!("{}\nDesign\n", words(50)),
            }
        );
    }

    #[test]
    fn test_merge_chain_is_unbounded() {
        let mut acc = accumulator(100);
        acc.push_body("intro line");
        for heading in ["Alpha Part", "Beta Part", "Gamma Part"] {
            assert_eq!(acc.push_heading(heading, 20.0), Transition::Merged);
        }
        assert_eq!(
            acc.state().title(),
            "Introduction - Alpha Part - Beta Part - Gamma Part"
        );
    }

    #[test]
    fn test_boundary_word_count_is_kept() {
        let mut acc = accumulator(100);
        acc.push_body(&words(100));
        let (chunks, _) = acc.finish();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Introduction");
    }

    #[test]
    fn test_short_trailing_section_is_dropped() {
        let mut acc = accumulator(100);
        acc.push_body(&words(99));
        let (chunks, _) = acc.finish();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_finalize_runs_splitter() {
        let mut acc = SectionAccumulator::new(1, SectionSplitter::new(10));
        acc.push_heading("Racing", 20.0);
        acc.push_body(&words(8));
        acc.push_body("");
        acc.push_body(&words(8));
        assert_eq!(
            acc.push_heading("Reception", 20.0),
            Transition::Finalized { chunks: 2 }
        );
        assert_eq!(acc.chunks()[1].title, "Racing (Part 2)");
    }
}
