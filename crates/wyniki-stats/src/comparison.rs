/// Result of comparing one school's score against a population column.
///
/// `total` is the size of the column snapshot the comparison ran over.
/// Callers decide what that snapshot is: per-subject comparisons pass only
/// the schools that have a value for the subject, while the composite-score
/// comparison passes the whole population (the composite is always defined
/// because missing subject scores contribute zero). The two denominators
/// are intentionally different.
///
/// # Examples
///
/// ```
/// use wyniki_stats::comparison::Comparison;
///
/// let scores = [50.0, 60.0, 70.0];
/// let comparison = Comparison::against(&scores, 60.0).unwrap();
/// assert_eq!(comparison.higher, 1);
/// assert!((comparison.percentage() - 33.333_332).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// Number of scores strictly greater than the reference value.
    pub higher: usize,
    /// Number of scores in the compared snapshot.
    pub total: usize,
}

impl Comparison {
    /// Counts how many `values` are strictly greater than `reference`.
    ///
    /// Ties do not count as higher. Returns `None` when `values` is empty,
    /// so the percentage can never divide by zero.
    #[must_use]
    pub fn against(values: &[f32], reference: f32) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let higher = values.iter().filter(|&&v| v > reference).count();
        Some(Self {
            higher,
            total: values.len(),
        })
    }

    /// Share of the snapshot that scored higher, in percent.
    ///
    /// Always within `[0, 100]`; `total` is non-zero by construction.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage(&self) -> f32 {
        (self.higher as f32) / (self.total as f32) * 100.0
    }
}
