//! Font profile analysis: body font and heading threshold.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Line;

/// Number of distribution entries reported in diagnostics.
pub const DISTRIBUTION_SUMMARY_LEN: usize = 10;

/// Font statistics for heading detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontProfile {
    /// Most frequent (rounded) line font size
    pub body_font: f32,
    /// Minimum size for a heading candidate
    pub heading_threshold: f32,
    /// (size, count) pairs, most frequent first; ties keep first-seen order
    pub font_distribution: Vec<(f32, usize)>,
}

impl FontProfile {
    /// Scan all lines once and derive the profile.
    ///
    /// Fails with [`Error::NoExtractableText`] when `lines` is empty, since
    /// there is no body font to find.
    pub fn analyze(lines: &[Line], font_threshold_ratio: f32) -> Result<Self> {
        // Sizes keyed at 0.1pt precision, kept in first-seen order.
        let mut histogram: Vec<(i32, usize)> = Vec::new();
        let mut slots: HashMap<i32, usize> = HashMap::new();

        for line in lines {
            // Half-way sizes round to the even tenth.
            let key = (line.font_size * 10.0).round_ties_even() as i32;
            match slots.get(&key) {
                Some(&slot) => histogram[slot].1 += 1,
                None => {
                    slots.insert(key, histogram.len());
                    histogram.push((key, 1));
                }
            }
        }

        let mut body: Option<(i32, usize)> = None;
        for &(key, count) in &histogram {
            if body.map_or(true, |(_, best)| count > best) {
                body = Some((key, count));
            }
        }
        let (body_key, _) = body.ok_or(Error::NoExtractableText)?;
        let body_font = body_key as f32 / 10.0;

        // Stable sort: equal counts stay in first-seen order.
        histogram.sort_by(|a, b| b.1.cmp(&a.1));
        let font_distribution = histogram
            .into_iter()
            .map(|(key, count)| (key as f32 / 10.0, count))
            .collect();

        Ok(Self {
            body_font,
            heading_threshold: body_font * font_threshold_ratio,
            font_distribution,
        })
    }

    /// The most frequent sizes, for diagnostics.
    pub fn top_sizes(&self) -> &[(f32, usize)] {
        let len = self.font_distribution.len().min(DISTRIBUTION_SUMMARY_LEN);
        &self.font_distribution[..len]
    }

    /// Log the profile summary.
    pub fn log_summary(&self) {
        log::info!(
            "Font analysis: body font {:.1}pt, heading threshold {:.1}pt",
            self.body_font,
            self.heading_threshold
        );
        for (size, count) in self.top_sizes() {
            log::debug!("  {:.1}pt: {} lines", size, count);
        }
    }
}
