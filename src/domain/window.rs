// Window buffer - rolling time axis and per-series value buffers
use super::axis::{compute_domain_x, compute_domain_y, AxisDomain};
use super::errors::EngineError;
use super::sample::Batch;
use serde::Serialize;
use std::collections::HashSet;

/// Buffered values of one series, parallel to [`WindowState::time`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBuffer {
    pub id: String,
    pub values: Vec<f64>,
}

/// Why an append left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    EmptyBatch,
    NotANumber,
    Duplicate,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedAppend {
    pub prior_domain_x: AxisDomain,
    /// Forward move of the latest timestamp.
    pub delta: f64,
    pub appended: usize,
    pub trimmed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppendOutcome {
    Unchanged(NoOpReason),
    Applied(AppliedAppend),
}

/// The live window: one shared time axis, one value buffer per series and the
/// domains derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    window_duration: f64,
    time: Vec<f64>,
    series: Vec<SeriesBuffer>,
    domain_x: AxisDomain,
    domain_y: AxisDomain,
    transition_ms: f64,
}

impl WindowState {
    /// Builds a fresh window from the first non-empty delivery. The seed's
    /// series set is fixed for the lifetime of the window.
    ///
    /// The whole seed is kept and covered by the Y domain; the first append
    /// trims it to the window.
    pub fn bootstrap(window_duration: f64, seed: Batch) -> Result<Self, EngineError> {
        if seed.is_empty() {
            return Err(EngineError::EmptySeed);
        }
        seed.check_shape()?;
        seed.check_ordering()?;

        let domain_x =
            compute_domain_x(&seed.time, window_duration).ok_or(EngineError::EmptySeed)?;
        let series = seed
            .series
            .into_iter()
            .map(|s| SeriesBuffer {
                id: s.id,
                values: s.values,
            })
            .collect();

        let mut state = Self {
            window_duration,
            time: seed.time,
            series,
            domain_x,
            domain_y: AxisDomain::new(0.0, 0.0),
            transition_ms: 0.0,
        };
        state.refresh_domain_y();
        Ok(state)
    }

    /// Appends a delivery and trims the buffers to the new window.
    ///
    /// A delivery whose latest timestamp does not move the window forward is a
    /// no-op. Samples the window already holds are skipped.
    pub fn append(&mut self, batch: &Batch) -> Result<AppendOutcome, EngineError> {
        let Some(&incoming_latest) = batch.time.last() else {
            return Ok(AppendOutcome::Unchanged(NoOpReason::EmptyBatch));
        };
        self.check_series(batch)?;

        let delta = incoming_latest - self.latest();
        if delta.is_nan() {
            return Ok(AppendOutcome::Unchanged(NoOpReason::NotANumber));
        }
        if delta == 0.0 {
            return Ok(AppendOutcome::Unchanged(NoOpReason::Duplicate));
        }
        if delta < 0.0 {
            return Ok(AppendOutcome::Unchanged(NoOpReason::Stale));
        }
        batch.check_ordering()?;

        let latest = self.latest();
        let start = batch.time.partition_point(|&t| t <= latest);
        if start > 0 {
            tracing::debug!("Skipping {} already buffered samples", start);
        }

        self.time.extend_from_slice(&batch.time[start..]);
        for buffer in &mut self.series {
            // check_series guarantees every id is present
            if let Some(values) = batch.values_for(&buffer.id) {
                buffer.values.extend_from_slice(&values[start..]);
            }
        }

        let prior_domain_x = self.domain_x;
        if let Some(domain_x) = compute_domain_x(&self.time, self.window_duration) {
            self.domain_x = domain_x;
        }
        let trimmed = self.trim();
        self.refresh_domain_y();

        Ok(AppendOutcome::Applied(AppliedAppend {
            prior_domain_x,
            delta,
            appended: batch.len() - start,
            trimmed,
        }))
    }

    /// Drops samples left of the window, keeping the last one at or before the
    /// lower edge so lines reach the left border.
    fn trim(&mut self) -> usize {
        let cutoff = self.domain_x.lo;
        let first_inside = self.time.partition_point(|&t| t < cutoff);
        let keep_from = match self.time.get(first_inside) {
            Some(&t) if t == cutoff => first_inside,
            _ => first_inside.saturating_sub(1),
        };
        if keep_from == 0 {
            return 0;
        }

        self.time.drain(..keep_from);
        for buffer in &mut self.series {
            buffer.values.drain(..keep_from);
        }
        keep_from
    }

    fn refresh_domain_y(&mut self) {
        if let Some(domain_y) = compute_domain_y(self.series.iter().map(|s| s.values.as_slice())) {
            self.domain_y = domain_y;
        }
    }

    /// The batch is well shaped and carries exactly the window's series.
    pub fn check_series(&self, batch: &Batch) -> Result<(), EngineError> {
        batch.check_shape()?;

        let known: HashSet<&str> = self.series.iter().map(|s| s.id.as_str()).collect();
        let incoming: HashSet<&str> = batch.ids().collect();
        if known == incoming {
            return Ok(());
        }

        let mut missing: Vec<String> = known.difference(&incoming).map(|s| s.to_string()).collect();
        let mut unexpected: Vec<String> =
            incoming.difference(&known).map(|s| s.to_string()).collect();
        missing.sort();
        unexpected.sort();
        Err(EngineError::SeriesMismatch {
            missing,
            unexpected,
        })
    }

    fn latest(&self) -> f64 {
        self.time.last().copied().unwrap_or(f64::NAN)
    }

    pub fn record_transition(&mut self, transition_ms: f64) {
        self.transition_ms = transition_ms;
    }

    pub fn window_duration(&self) -> f64 {
        self.window_duration
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn series(&self) -> &[SeriesBuffer] {
        &self.series
    }

    pub fn values_for(&self, id: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.values.as_slice())
    }

    pub fn domain_x(&self) -> AxisDomain {
        self.domain_x
    }

    pub fn domain_y(&self) -> AxisDomain {
        self.domain_y
    }

    pub fn transition_ms(&self) -> f64 {
        self.transition_ms
    }
}
