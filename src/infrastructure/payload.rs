// Wire payload - JSON delivered by the ingestion endpoint
use crate::domain::sample::{Batch, Sample, SeriesValues};
use serde::{Deserialize, Serialize};

/// `{ "time": [...], "points": [{ "id": ..., "values": [{ "date": ..., "value": ... }] }] }`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WirePayload {
    #[serde(default)]
    pub time: Vec<f64>,
    #[serde(default)]
    pub points: Vec<WireSeries>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WireSeries {
    pub id: String,
    #[serde(default)]
    pub values: Vec<WirePoint>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WirePoint {
    pub date: f64,
    pub value: f64,
}

impl From<WirePoint> for Sample {
    fn from(point: WirePoint) -> Self {
        Sample::new(point.date, point.value)
    }
}

impl WirePayload {
    pub fn into_batch(self) -> Batch {
        let series = self
            .points
            .into_iter()
            .map(|s| {
                let samples: Vec<Sample> = s.values.into_iter().map(Sample::from).collect();
                SeriesValues::from_samples(s.id, &samples)
            })
            .collect();
        Batch::new(self.time, series)
    }
}
