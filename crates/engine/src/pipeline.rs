use std::time::{Duration, Instant};

/// Stages of a filter call for which we record timings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Splitting the query into uppercased tokens.
    Tokenize,
    /// Building the items index, if it was still pending.
    Index,
    /// Matching every indexed item.
    Match,
    /// Applying the same-order policy.
    Rank,
}

/// Timing metrics collected during a filter call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMetrics {
    pub tokenize_time: Option<Duration>,
    /// Only set when this call built the index.
    pub index_time: Option<Duration>,
    pub match_time: Option<Duration>,
    pub rank_time: Option<Duration>,
    /// Items considered by the match stage.
    pub candidates: usize,
    /// Matches returned after ranking.
    pub matches: usize,
}

impl FilterMetrics {
    /// Total time across all measured stages.
    pub fn total(&self) -> Duration {
        self.tokenize_time.unwrap_or_default()
            + self.index_time.unwrap_or_default()
            + self.match_time.unwrap_or_default()
            + self.rank_time.unwrap_or_default()
    }
}

/// Strategy trait for timing behavior.
///
/// Implementations decide whether to measure stages and how to store metrics.
pub trait Timer {
    /// Run `f`, optionally measuring and recording the duration for `stage`.
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R;

    /// Record result counts; ignored by timers that keep no metrics.
    fn record_counts(&mut self, _candidates: usize, _matches: usize) {}

    /// Return metrics if timing is enabled.
    fn metrics(&self) -> Option<&FilterMetrics> {
        None
    }
}

/// Timer implementation that does nothing
#[derive(Debug, Default)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    #[inline]
    fn measure<F, R>(&mut self, _stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}

/// Timer implementation that collects `FilterMetrics`.
#[derive(Debug, Default)]
pub struct MetricsTimer {
    metrics: FilterMetrics,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metrics(self) -> FilterMetrics {
        self.metrics
    }
}

impl Timer for MetricsTimer {
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match stage {
            Stage::Tokenize => self.metrics.tokenize_time = Some(elapsed),
            Stage::Index => self.metrics.index_time = Some(elapsed),
            Stage::Match => self.metrics.match_time = Some(elapsed),
            Stage::Rank => self.metrics.rank_time = Some(elapsed),
        }

        result
    }

    fn record_counts(&mut self, candidates: usize, matches: usize) {
        self.metrics.candidates = candidates;
        self.metrics.matches = matches;
    }

    fn metrics(&self) -> Option<&FilterMetrics> {
        Some(&self.metrics)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
