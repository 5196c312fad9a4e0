use std::{fs::File, io, path::Path, slice};

use crate::record::{MetricKind, SchoolRecord, Subject};

/// The results file could not be turned into a population.
///
/// Both variants are terminal: the caller reports the message and stops
/// before any UI is built.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("results file unavailable: {path}: {source}")]
    Unavailable { path: String, source: io::Error },
    #[display("results file malformed: {path}: {source}")]
    Malformed { path: String, source: csv::Error },
}

/// All school records belonging to one locality.
///
/// Read-only after construction. Row order is the file order; it fixes the
/// selector ordering and the fallback default selection.
#[derive(Debug, Clone)]
pub struct Population {
    records: Vec<SchoolRecord>,
}

impl Population {
    /// Parses CSV rows from `reader`, keeping only rows whose district
    /// exactly equals `locality`.
    pub fn from_reader<R>(reader: R, locality: &str) -> Result<Self, csv::Error>
    where
        R: io::Read,
    {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = vec![];
        for row in csv_reader.deserialize() {
            let record: SchoolRecord = row?;
            if record.district == locality {
                records.push(record);
            }
        }
        Ok(Self { records })
    }

    /// Loads and filters the results file at `path`.
    pub fn load(path: &Path, locality: &str) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Unavailable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(io::BufReader::new(file), locality).map_err(|source| {
            DatasetError::Malformed {
                path: path.display().to_string(),
                source,
            }
        })
    }

    /// Builds a population directly from records (used by tests and tools).
    #[must_use]
    pub fn from_records(records: Vec<SchoolRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, SchoolRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SchoolRecord> {
        self.records.get(index)
    }

    /// Row index of the first record whose display label equals `label`.
    ///
    /// Labels can collide in the source data; the first match wins.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.display_label() == label)
    }

    /// Non-missing scores for one subject under one metric kind.
    ///
    /// This is the per-subject comparison snapshot: schools without data
    /// for the subject are excluded, so the denominator varies per subject.
    #[must_use]
    pub fn subject_scores(&self, subject: Subject, kind: MetricKind) -> Vec<f32> {
        self.records
            .iter()
            .filter_map(|record| record.score(subject, kind))
            .collect()
    }

    /// Composite score for every record, in row order.
    ///
    /// Missing subject scores contribute zero, so this column is always
    /// fully populated and the composite comparison runs over the whole
    /// population.
    #[must_use]
    pub fn composite_scores(&self, kind: MetricKind) -> Vec<f32> {
        self.records
            .iter()
            .map(|record| record.composite_score(kind))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a SchoolRecord;
    type IntoIter = slice::Iter<'a, SchoolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "powiat - nazwa,Nazwa szkoły,Miejscowość,mean_polski,median_polski,mean_matematyka,median_matematyka,mean_angielski,median_angielski";

    fn population_from(rows: &[&str], locality: &str) -> Population {
        let csv = format!("{HEADER}\n{}\n", rows.join("\n"));
        Population::from_reader(csv.as_bytes(), locality).unwrap()
    }

    #[test]
    fn test_locality_filter_is_exact_match() {
        let population = population_from(
            &[
                "Warszawa,SP 1,Warszawa,50,51,52,53,54,55",
                "Kraków,SP 2,Kraków,60,61,62,63,64,65",
                "Warszawa Zachodnia,SP 3,Ożarów,70,71,72,73,74,75",
            ],
            "Warszawa",
        );
        assert_eq!(population.len(), 1);
        assert_eq!(population.records()[0].school_name, "SP 1");
    }

    #[test]
    fn test_empty_fields_are_missing_not_zero() {
        let population = population_from(
            &["Warszawa,SP 1,Warszawa,80,,,,90,"],
            "Warszawa",
        );
        let record = &population.records()[0];
        assert_eq!(record.score(Subject::Polish, MetricKind::Mean), Some(80.0));
        assert_eq!(record.score(Subject::Polish, MetricKind::Median), None);
        assert_eq!(record.score(Subject::Math, MetricKind::Mean), None);
        assert_eq!(record.score(Subject::English, MetricKind::Mean), Some(90.0));
        assert_eq!(record.composite_score(MetricKind::Mean), 170.0);
    }

    #[test]
    fn test_find_by_label_first_match_wins_on_collision() {
        let population = population_from(
            &[
                "Warszawa,SP 1,Warszawa,10,10,10,10,10,10",
                "Warszawa,SP 1,Warszawa,20,20,20,20,20,20",
            ],
            "Warszawa",
        );
        let idx = population.find_by_label("SP 1 - Warszawa").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(
            population.records()[idx].score(Subject::Polish, MetricKind::Mean),
            Some(10.0)
        );
    }

    #[test]
    fn test_find_by_label_missing() {
        let population =
            population_from(&["Warszawa,SP 1,Warszawa,10,10,10,10,10,10"], "Warszawa");
        assert_eq!(population.find_by_label("SP 999 - Warszawa"), None);
    }

    #[test]
    fn test_subject_scores_exclude_missing() {
        let population = population_from(
            &[
                "Warszawa,SP 1,Warszawa,50,,,,,",
                "Warszawa,SP 2,Warszawa,60,,,,,",
                "Warszawa,SP 3,Warszawa,,,,,,",
            ],
            "Warszawa",
        );
        let scores = population.subject_scores(Subject::Polish, MetricKind::Mean);
        assert_eq!(scores, vec![50.0, 60.0]);
        assert!(
            population
                .subject_scores(Subject::Math, MetricKind::Mean)
                .is_empty()
        );
    }

    #[test]
    fn test_composite_scores_cover_full_population() {
        let population = population_from(
            &[
                "Warszawa,SP 1,Warszawa,50,,60,,70,",
                "Warszawa,SP 2,Warszawa,,,,,,",
            ],
            "Warszawa",
        );
        let scores = population.composite_scores(MetricKind::Mean);
        assert_eq!(scores, vec![180.0, 0.0]);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let csv = format!("{HEADER}\nWarszawa,SP 1,Warszawa,abc,,,,,\n");
        assert!(Population::from_reader(csv.as_bytes(), "Warszawa").is_err());
    }
}
