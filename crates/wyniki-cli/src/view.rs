//! Pure view-model construction.
//!
//! `ViewModel::build` is the whole render pipeline: given the immutable
//! population and the current selection it recomputes every panel from
//! scratch. Selector changes in the UI replace the previous view model
//! wholesale, so no panel can go stale, and identical selections always
//! produce identical output.

use wyniki_dataset::{MetricKind, Population, Subject};
use wyniki_stats::{comparison::Comparison, histogram::ScoreHistogram};

/// The user's current choice: which metric to read and which school row to
/// compare. Transient; rebuilt on every interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub metric: MetricKind,
    /// Row index into the population.
    pub school: usize,
}

impl Selection {
    /// Resolves the initial selection from the configured target school.
    ///
    /// Falls back to the first row when the target label is absent and
    /// returns a warning message for the UI to display.
    #[must_use]
    pub fn initial(population: &Population, target_label: &str) -> (Self, Option<String>) {
        match population.find_by_label(target_label) {
            Some(school) => (
                Self {
                    metric: MetricKind::default(),
                    school,
                },
                None,
            ),
            None => (
                Self {
                    metric: MetricKind::default(),
                    school: 0,
                },
                Some(format!(
                    "School '{target_label}' not found. Using the first available school."
                )),
            ),
        }
    }
}

/// Data behind one histogram chart: bins plus the reference-value marker.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionChart {
    pub title: String,
    /// Metric-dependent x-axis label.
    pub x_label: String,
    /// Fixed y-axis label.
    pub y_label: &'static str,
    pub histogram: ScoreHistogram,
    /// Index of the bin the selected school's value falls in.
    pub marker_bin: usize,
    /// Marker annotation, reference value formatted to two decimals.
    pub marker_label: String,
}

impl DistributionChart {
    fn new(values: &[f32], reference: f32, title: String, metric: MetricKind) -> Option<Self> {
        let histogram = ScoreHistogram::unit_bins(values)?;
        let marker_bin = histogram.marker_bin(reference)?;
        Some(Self {
            title,
            x_label: format!("{} score", metric.display_name()),
            y_label: "Number of schools",
            histogram,
            marker_bin,
            marker_label: format!("Selected school: {reference:.2}"),
        })
    }
}

/// One subject's panel: metric value, comparison sentence, histogram.
///
/// All three fields are `None` together when the selected school has no
/// value for this subject; the UI renders "no data" placeholders instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPanel {
    pub subject: Subject,
    pub value: Option<f32>,
    pub comparison: Option<Comparison>,
    pub chart: Option<DistributionChart>,
}

/// The composite-score panel.
///
/// The score is always defined (missing subjects contribute zero), so the
/// comparison runs over the full population rather than the non-missing
/// subset the subject panels use. The asymmetry is deliberate: it matches
/// the published behavior of the reports this tool reproduces.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePanel {
    pub score: f32,
    pub comparison: Option<Comparison>,
    pub chart: Option<DistributionChart>,
}

/// Everything the screen draws for one `(metric, school)` selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub school_label: String,
    pub metric: MetricKind,
    pub subjects: [SubjectPanel; 3],
    pub composite: CompositePanel,
}

impl ViewModel {
    /// Builds the full view for one selection.
    ///
    /// # Panics
    ///
    /// Panics if `selection.school` is out of bounds; the UI only ever
    /// selects rows that exist.
    #[must_use]
    pub fn build(population: &Population, selection: &Selection) -> Self {
        let record = population
            .get(selection.school)
            .expect("selection points at an existing school row");
        let metric = selection.metric;

        let subjects = Subject::ALL.map(|subject| {
            let value = record.score(subject, metric);
            let (comparison, chart) = match value {
                Some(reference) => {
                    let scores = population.subject_scores(subject, metric);
                    (
                        Comparison::against(&scores, reference),
                        DistributionChart::new(
                            &scores,
                            reference,
                            format!("{} score distribution", subject.display_name()),
                            metric,
                        ),
                    )
                }
                None => (None, None),
            };
            SubjectPanel {
                subject,
                value,
                comparison,
                chart,
            }
        });

        let composite_scores = population.composite_scores(metric);
        let composite_reference = record.composite_score(metric);
        let composite = CompositePanel {
            score: composite_reference,
            comparison: Comparison::against(&composite_scores, composite_reference),
            chart: DistributionChart::new(
                &composite_scores,
                composite_reference,
                format!(
                    "Composite score distribution ({})",
                    metric.display_name().to_lowercase()
                ),
                metric,
            ),
        };

        Self {
            school_label: record.display_label(),
            metric,
            subjects,
            composite,
        }
    }
}

#[cfg(test)]
mod tests {
    use wyniki_dataset::SchoolRecord;

    use super::*;

    fn school(name: &str, scores: [Option<f32>; 3]) -> SchoolRecord {
        SchoolRecord {
            district: "Warszawa".to_string(),
            school_name: name.to_string(),
            settlement: "Warszawa".to_string(),
            mean_polski: scores[0],
            median_polski: None,
            mean_matematyka: scores[1],
            median_matematyka: None,
            mean_angielski: scores[2],
            median_angielski: None,
        }
    }

    #[test]
    fn test_comparison_counts_for_middle_school() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(50.0), None, None]),
            school("SP 2", [Some(60.0), None, None]),
            school("SP 3", [Some(70.0), None, None]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 2 - Warszawa");
        let view = ViewModel::build(&population, &selection);

        let polish = &view.subjects[0];
        let comparison = polish.comparison.unwrap();
        assert_eq!(comparison.higher, 1);
        assert_eq!(comparison.total, 3);
        assert!((comparison.percentage() - 100.0 / 3.0).abs() < 0.05);
    }

    #[test]
    fn test_missing_subject_yields_no_data_panel() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(80.0), None, Some(90.0)]),
            school("SP 2", [Some(70.0), Some(65.0), Some(75.0)]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 1 - Warszawa");
        let view = ViewModel::build(&population, &selection);

        let math = &view.subjects[1];
        assert_eq!(math.value, None);
        assert_eq!(math.comparison, None);
        assert_eq!(math.chart, None);

        // Missing subjects count as zero in the composite.
        assert_eq!(view.composite.score, 170.0);
    }

    #[test]
    fn test_target_not_found_falls_back_with_warning() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(10.0), None, None]),
            school("SP 2", [Some(20.0), None, None]),
            school("SP 3", [Some(30.0), None, None]),
            school("SP 4", [Some(40.0), None, None]),
            school("SP 5", [Some(50.0), None, None]),
        ]);
        let (selection, warning) = Selection::initial(&population, "SP 398 - Warszawa");
        assert_eq!(selection.school, 0);
        assert!(warning.is_some());

        let view = ViewModel::build(&population, &selection);
        assert_eq!(view.school_label, "SP 1 - Warszawa");
    }

    #[test]
    fn test_composite_denominator_is_full_population() {
        // Only two schools have Math data, but the composite comparison
        // still runs over all three rows.
        let population = Population::from_records(vec![
            school("SP 1", [Some(50.0), Some(50.0), None]),
            school("SP 2", [Some(60.0), None, None]),
            school("SP 3", [Some(70.0), Some(55.0), None]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 1 - Warszawa");
        let view = ViewModel::build(&population, &selection);

        assert_eq!(view.subjects[1].comparison.unwrap().total, 2);
        assert_eq!(view.composite.comparison.unwrap().total, 3);
    }

    #[test]
    fn test_empty_subject_column_has_no_comparison() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(50.0), None, None]),
            school("SP 2", [Some(60.0), None, None]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 1 - Warszawa");
        let view = ViewModel::build(&population, &selection);

        // English is missing for the selected school: panel is "no data"
        // rather than a zero-denominator comparison.
        assert_eq!(view.subjects[2].comparison, None);
        assert_eq!(view.subjects[2].chart, None);
    }

    #[test]
    fn test_identical_selection_builds_identical_view() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(52.5), Some(61.0), Some(70.25)]),
            school("SP 2", [Some(48.0), Some(55.5), Some(81.0)]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 2 - Warszawa");

        let first = ViewModel::build(&population, &selection);
        let second = ViewModel::build(&population, &selection);
        assert_eq!(first, second);
    }

    #[test]
    fn test_marker_annotation_has_two_decimals() {
        let population = Population::from_records(vec![
            school("SP 1", [Some(55.0), None, None]),
            school("SP 2", [Some(60.5), None, None]),
        ]);
        let (selection, _) = Selection::initial(&population, "SP 2 - Warszawa");
        let view = ViewModel::build(&population, &selection);

        let chart = view.subjects[0].chart.as_ref().unwrap();
        assert_eq!(chart.marker_label, "Selected school: 60.50");
        assert_eq!(chart.y_label, "Number of schools");
        assert_eq!(chart.x_label, "Mean score");
    }

    #[test]
    fn test_metric_kind_switches_columns() {
        let mut a = school("SP 1", [Some(50.0), None, None]);
        a.median_polski = Some(40.0);
        let mut b = school("SP 2", [Some(60.0), None, None]);
        b.median_polski = Some(80.0);
        let population = Population::from_records(vec![a, b]);

        let selection = Selection {
            metric: MetricKind::Median,
            school: 0,
        };
        let view = ViewModel::build(&population, &selection);
        assert_eq!(view.subjects[0].value, Some(40.0));
        assert_eq!(view.subjects[0].comparison.unwrap().higher, 1);
    }
}
