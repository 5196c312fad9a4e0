use serde::Deserialize;

/// The three exam subjects published in the results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// Polish language (`*_polski` columns).
    Polish,
    /// Mathematics (`*_matematyka` columns).
    Math,
    /// English language (`*_angielski` columns).
    English,
}

impl Subject {
    /// All subjects, in panel display order.
    pub const ALL: [Self; 3] = [Self::Polish, Self::Math, Self::English];

    /// Panel title for this subject.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Polish => "Polish language",
            Self::Math => "Mathematics",
            Self::English => "English language",
        }
    }
}

/// Which per-subject statistic to read: the school's mean or median score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricKind {
    #[default]
    Mean,
    Median,
}

impl MetricKind {
    /// Both kinds, in selector display order.
    pub const ALL: [Self; 2] = [Self::Mean, Self::Median];

    /// Selector label for this metric kind.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Median => "Median",
        }
    }

    /// The other metric kind.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Mean => Self::Median,
            Self::Median => Self::Mean,
        }
    }
}

/// One row of the results file: a single school with its per-subject score
/// statistics.
///
/// Score fields are `Option<f32>` because the source data leaves columns
/// empty for schools without enough exam takers; an empty field is missing,
/// never zero. Field access goes through [`score`](Self::score) so subject
/// and metric stay typed instead of string-keyed column names.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRecord {
    /// District ("powiat") the school belongs to; the locality filter key.
    #[serde(rename = "powiat - nazwa")]
    pub district: String,
    /// Official school name.
    #[serde(rename = "Nazwa szkoły")]
    pub school_name: String,
    /// Settlement (town/city) the school is in.
    #[serde(rename = "Miejscowość")]
    pub settlement: String,
    pub mean_polski: Option<f32>,
    pub median_polski: Option<f32>,
    pub mean_matematyka: Option<f32>,
    pub median_matematyka: Option<f32>,
    pub mean_angielski: Option<f32>,
    pub median_angielski: Option<f32>,
}

impl SchoolRecord {
    /// The score statistic for one subject under one metric kind.
    #[must_use]
    pub fn score(&self, subject: Subject, kind: MetricKind) -> Option<f32> {
        match (kind, subject) {
            (MetricKind::Mean, Subject::Polish) => self.mean_polski,
            (MetricKind::Mean, Subject::Math) => self.mean_matematyka,
            (MetricKind::Mean, Subject::English) => self.mean_angielski,
            (MetricKind::Median, Subject::Polish) => self.median_polski,
            (MetricKind::Median, Subject::Math) => self.median_matematyka,
            (MetricKind::Median, Subject::English) => self.median_angielski,
        }
    }

    /// Label shown in the school selector: `"{name} - {settlement}"`.
    ///
    /// Labels are not guaranteed unique in the source data; lookups take
    /// the first matching row.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.school_name, self.settlement)
    }

    /// Composite score: sum of the three subject scores under `kind`, with
    /// missing scores contributing zero.
    ///
    /// Always finite; a school with no data at all scores 0. Note the
    /// zero-substitution here differs from the comparison denominators,
    /// which drop missing rows instead.
    #[must_use]
    pub fn composite_score(&self, kind: MetricKind) -> f32 {
        Subject::ALL
            .iter()
            .map(|&subject| self.score(subject, kind).unwrap_or(0.0))
            .sum()
    }
}
