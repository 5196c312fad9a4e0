//! Exam-results dataset for the school results browser.
//!
//! This crate loads the published exam-results CSV, filters it to one
//! locality, and exposes a typed, read-only view of the rows.
//!
//! # Overview
//!
//! The dataset is a one-time input: it is parsed at process start, filtered
//! to the configured locality, and then held immutably for the process
//! lifetime. All derived values (composite scores, display labels) are
//! recomputed from the records on demand rather than mutated in place.
//!
//! # Data Structure
//!
//! ```text
//! Population
//! └─ records: Vec<SchoolRecord>
//!     ├─ district / school name / settlement
//!     └─ per subject (Polish, Math, English)
//!         └─ per metric kind (Mean, Median)
//!             └─ Option<f32> score (empty CSV field = missing, not zero)
//! ```
//!
//! # Modules
//!
//! - [`record`]: Typed rows and the subject/metric axes
//! - [`population`]: Locality-filtered record set and column extraction
//! - [`cache`]: Process-wide one-time load with restart-only invalidation

pub use self::{
    population::{DatasetError, Population},
    record::{MetricKind, SchoolRecord, Subject},
};

pub mod cache;
pub mod population;
pub mod record;
