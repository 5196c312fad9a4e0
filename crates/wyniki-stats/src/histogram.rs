use std::ops::Range;

/// Upper bound on the computed bin count.
///
/// The unit-bin formula assumes bounded, near-integer score scales (exam
/// scores live on 0-100 per subject, 0-300 for the composite). The clamp
/// keeps a malformed or wildly-scaled column from allocating an absurd
/// number of bins.
pub const MAX_BINS: usize = 4096;

/// A frequency histogram over one score column.
///
/// Bins are unit-width and span the observed value range, matching how the
/// distribution charts are drawn: one bar per score point between the
/// lowest and highest observed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHistogram {
    /// The bins comprising the histogram, in ascending value order.
    pub bins: Vec<ScoreBin>,
}

/// A single bin in a score histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f32>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl ScoreHistogram {
    /// Builds a histogram with unit-width bins spanning the observed range.
    ///
    /// The bin count is `floor(max - min) + 1`, clamped to `1..=MAX_BINS`.
    /// When the clamp applies the bins widen evenly so the range stays
    /// covered. Every input value lands in exactly one bin.
    ///
    /// Returns `None` for empty input; the caller renders a placeholder
    /// instead of a chart.
    ///
    /// # Examples
    ///
    /// ```
    /// use wyniki_stats::histogram::ScoreHistogram;
    ///
    /// let histogram = ScoreHistogram::unit_bins(&[40.0, 70.0, 100.0]).unwrap();
    /// assert_eq!(histogram.bins.len(), 61);
    /// ```
    #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn unit_bins(values: &[f32]) -> Option<Self> {
        let min = values.iter().copied().reduce(f32::min)?;
        let max = values.iter().copied().reduce(f32::max)?;

        let span = max - min;
        let computed = if span.is_finite() && span >= 0.0 {
            span.floor() as usize + 1
        } else {
            1
        };
        let num_bins = computed.clamp(1, MAX_BINS);
        #[expect(clippy::cast_precision_loss)]
        let bin_width = if computed <= MAX_BINS {
            1.0
        } else {
            span / (num_bins as f32)
        };

        #[expect(clippy::cast_precision_loss)]
        let mut bins = (0..num_bins)
            .map(|bin_idx| ScoreBin {
                range: (min + (bin_idx as f32) * bin_width)
                    ..(min + ((bin_idx + 1) as f32) * bin_width),
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in values {
            let idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Some(Self { bins })
    }

    /// Index of the bin containing `reference`.
    ///
    /// A reference outside the observed range clamps to the first or last
    /// bin so the marker always lands on a drawn bar.
    #[must_use]
    pub fn marker_bin(&self, reference: f32) -> Option<usize> {
        let first = self.bins.first()?;
        if reference < first.range.start {
            return Some(0);
        }
        for (idx, bin) in self.bins.iter().enumerate() {
            if bin.range.contains(&reference) {
                return Some(idx);
            }
        }
        Some(self.bins.len() - 1)
    }

    /// Largest bin count, used to scale chart bars.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}
