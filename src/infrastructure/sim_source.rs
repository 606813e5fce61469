// Simulated data source - phase-shifted sine waves for running without a backend
use crate::application::data_source::DataSource;
use crate::domain::sample::{Batch, SeriesValues};
use async_trait::async_trait;
use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const FREQUENCY_HZ: f64 = 0.2;

#[derive(Debug)]
pub struct SimSource {
    series: Vec<String>,
    sample_period: f64,
    samples_per_fetch: usize,
    warmup_fetches: u64,
    fetches: AtomicU64,
}

impl SimSource {
    pub fn new(
        series: Vec<String>,
        sample_period: f64,
        samples_per_fetch: usize,
        warmup_fetches: u64,
    ) -> Self {
        Self {
            series,
            sample_period,
            samples_per_fetch: samples_per_fetch.max(1),
            warmup_fetches,
            fetches: AtomicU64::new(0),
        }
    }

    fn value(&self, index: usize, t: f64) -> f64 {
        let phase = TAU * index as f64 / self.series.len().max(1) as f64;
        (index + 1) as f64 * (TAU * FREQUENCY_HZ * t + phase).sin()
    }
}

#[async_trait]
impl DataSource for SimSource {
    async fn fetch(&self, _interval: Duration) -> anyhow::Result<Batch> {
        let fetch = self.fetches.fetch_add(1, Ordering::SeqCst);
        if fetch < self.warmup_fetches {
            return Ok(Batch::default());
        }

        let first_tick = (fetch - self.warmup_fetches) as usize * self.samples_per_fetch;
        let time: Vec<f64> = (first_tick..first_tick + self.samples_per_fetch)
            .map(|tick| tick as f64 * self.sample_period)
            .collect();

        let series = self
            .series
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let values = time.iter().map(|&t| self.value(index, t)).collect();
                SeriesValues::new(id.clone(), values)
            })
            .collect();

        Ok(Batch::new(time, series))
    }
}
