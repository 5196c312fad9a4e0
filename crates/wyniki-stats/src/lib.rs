//! Statistical building blocks for the school results browser.
//!
//! This crate provides the two computations the UI is built on:
//!
//! - **Percentile comparison**: count how many schools in a population
//!   scored strictly higher than a reference value
//! - **Histogram construction**: unit-width frequency bins over a score
//!   column, with lookup of the bin containing a reference value
//!
//! # Modules
//!
//! - [`comparison`]: Strictly-greater counting over a score column
//! - [`histogram`]: Unit-width score histograms for distribution charts
//!
//! # Examples
//!
//! ## Comparing a school against the population
//!
//! ```
//! use wyniki_stats::comparison::Comparison;
//!
//! let scores = [50.0, 60.0, 70.0];
//! let comparison = Comparison::against(&scores, 60.0).unwrap();
//! assert_eq!(comparison.higher, 1);
//! assert_eq!(comparison.total, 3);
//! ```
//!
//! ## Building a score distribution
//!
//! ```
//! use wyniki_stats::histogram::ScoreHistogram;
//!
//! let scores = [40.0, 55.0, 55.5, 100.0];
//! let histogram = ScoreHistogram::unit_bins(&scores).unwrap();
//! assert_eq!(histogram.bins.len(), 61);
//! ```

pub mod comparison;
pub mod histogram;
