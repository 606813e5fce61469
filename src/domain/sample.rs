// Sample model - time-aligned series batches
use super::errors::EngineError;
use std::collections::HashSet;

/// One observation of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Values of a single series, aligned index-by-index with a shared time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValues {
    pub id: String,
    pub values: Vec<f64>,
}

impl SeriesValues {
    pub fn new(id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// Builds the value column from full samples. Timestamps are dropped,
    /// the batch-level time axis is authoritative.
    pub fn from_samples(id: impl Into<String>, samples: &[Sample]) -> Self {
        Self::new(id, samples.iter().map(|s| s.value).collect())
    }
}

/// A delivery from the ingestion side: one time axis shared by every series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    pub time: Vec<f64>,
    pub series: Vec<SeriesValues>,
}

impl Batch {
    pub fn new(time: Vec<f64>, series: Vec<SeriesValues>) -> Self {
        Self { time, series }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.id.as_str())
    }

    pub fn values_for(&self, id: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.values.as_slice())
    }

    /// Every series appears once and carries one value per timestamp.
    pub fn check_shape(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::with_capacity(self.series.len());
        for series in &self.series {
            if !seen.insert(series.id.as_str()) {
                return Err(EngineError::DuplicateSeries(series.id.clone()));
            }
            if series.values.len() != self.time.len() {
                return Err(EngineError::LengthMismatch {
                    id: series.id.clone(),
                    expected: self.time.len(),
                    actual: series.values.len(),
                });
            }
        }
        Ok(())
    }

    /// Rejects non-finite timestamps and timestamps that do not strictly increase.
    pub fn check_ordering(&self) -> Result<(), EngineError> {
        if let Some(index) = self.time.iter().position(|t| !t.is_finite()) {
            return Err(EngineError::NonFiniteTime {
                index,
                value: self.time[index],
            });
        }
        for (index, pair) in self.time.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(EngineError::NonIncreasingTime {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(())
    }

    /// The single-tick batch at `index`, used for per-sample replay.
    pub fn tick(&self, index: usize) -> Option<Batch> {
        let time = *self.time.get(index)?;
        let series = self
            .series
            .iter()
            .map(|s| SeriesValues::new(s.id.clone(), s.values.get(index).copied().into_iter().collect()))
            .collect();
        Some(Batch::new(vec![time], series))
    }
}
