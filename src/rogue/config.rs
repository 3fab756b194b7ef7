//! Run configuration of the rogue search.

use std::collections::BTreeSet;

/// Default number of rogues to remove.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Configuration of a [RogueSearch](crate::rogue::RogueSearch), fixed before
/// the search starts.
///
/// # Example
/// ```
/// use roguewick::rogue::RogueConfig;
///
/// let config = RogueConfig::default()
///     .with_iterations(3)
///     .with_guarded(["Apteryx_owenii", "Apteryx_haastii"])
///     .with_threads(4);
/// assert_eq!(config.iterations(), 3);
/// assert!(config.is_guarded("Apteryx_owenii"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RogueConfig {
    iterations: usize,
    guarded: BTreeSet<String>,
    threads: Option<usize>,
}

impl Default for RogueConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            guarded: BTreeSet::new(),
            threads: None,
        }
    }
}

impl RogueConfig {
    /// Sets the number of rogues to remove; `0` removes nothing.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Adds taxon names that must never be removed.
    pub fn with_guarded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guarded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the number of worker threads used to score candidates.
    ///
    /// `1` scores on the calling thread. Without this setting, the global
    /// rayon pool is used.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn guarded(&self) -> &BTreeSet<String> {
        &self.guarded
    }

    pub fn is_guarded(&self, name: &str) -> bool {
        self.guarded.contains(name)
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

/// Splits a comma-delimited list of taxon names.
///
/// Surrounding whitespace is trimmed and empty entries are dropped.
///
/// # Example
/// ```
/// use roguewick::rogue::parse_guard_list;
///
/// assert_eq!(parse_guard_list(" A, B ,,C "), vec!["A", "B", "C"]);
/// assert!(parse_guard_list("").is_empty());
/// ```
pub fn parse_guard_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
