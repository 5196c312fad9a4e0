//! Process-wide population cache.
//!
//! The results file is parsed at most once per process. The first
//! successful load fills a [`OnceLock`] and every later call returns the
//! same `&'static Population`, so selector changes in the UI never re-read
//! the file. Invalidation is restart-only. Failed loads are not cached and
//! may be retried.

use std::{path::Path, sync::OnceLock};

use crate::population::{DatasetError, Population};

static POPULATION: OnceLock<Population> = OnceLock::new();

/// Returns the cached population, loading it from `path` on first call.
///
/// The lock guards concurrent first access: if two threads race here, both
/// get the same winning population. Arguments are only consulted on the
/// initializing call; the cache is keyed by process lifetime, not by path.
pub fn population(path: &Path, locality: &str) -> Result<&'static Population, DatasetError> {
    if let Some(population) = POPULATION.get() {
        return Ok(population);
    }
    let loaded = Population::load(path, locality)?;
    Ok(POPULATION.get_or_init(|| loaded))
}
