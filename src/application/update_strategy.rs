// Update strategies - how a fetched payload is applied to the window
use crate::domain::errors::EngineError;
use crate::domain::sample::Batch;
use crate::domain::scroll::{plan_shift, ShiftPlan};
use crate::domain::settings::WindowSettings;
use crate::domain::window::{AppendOutcome, WindowState};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Batch,
    PerSample,
}

pub trait UpdateStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Applies `batch` to `state`, calling `emit` once per applied append.
    /// Returns the number of applied appends.
    fn apply(
        &self,
        state: &mut WindowState,
        batch: &Batch,
        settings: &WindowSettings,
        emit: &mut dyn FnMut(&WindowState, ShiftPlan),
    ) -> Result<usize, EngineError>;
}

pub fn strategy_for(kind: StrategyKind) -> Box<dyn UpdateStrategy> {
    match kind {
        StrategyKind::Batch => Box::new(BatchUpdate),
        StrategyKind::PerSample => Box::new(PerSampleUpdate),
    }
}

/// Appends a whole payload at once and animates over the polling interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchUpdate;

impl UpdateStrategy for BatchUpdate {
    fn name(&self) -> &'static str {
        "batch"
    }

    fn apply(
        &self,
        state: &mut WindowState,
        batch: &Batch,
        settings: &WindowSettings,
        emit: &mut dyn FnMut(&WindowState, ShiftPlan),
    ) -> Result<usize, EngineError> {
        apply_one(state, batch, settings.interval_ms(), settings, emit)
    }
}

/// Replays every timestamp of a payload as its own append.
///
/// Each replayed tick animates over `dx / n` of the payload's forward move,
/// where `dx` is measured in timestamp units and read as milliseconds. This
/// only lines up with the polling cadence when timestamps are milliseconds and
/// samples are evenly spaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerSampleUpdate;

impl UpdateStrategy for PerSampleUpdate {
    fn name(&self) -> &'static str {
        "per_sample"
    }

    fn apply(
        &self,
        state: &mut WindowState,
        batch: &Batch,
        settings: &WindowSettings,
        emit: &mut dyn FnMut(&WindowState, ShiftPlan),
    ) -> Result<usize, EngineError> {
        let Some(&incoming_latest) = batch.time.last() else {
            return Ok(0);
        };
        // validate up front so a bad payload is not half applied
        state.check_series(batch)?;
        batch.check_ordering()?;

        let latest = state.time().last().copied().unwrap_or(f64::NAN);
        let dx = incoming_latest - latest;
        if !(dx > 0.0) {
            tracing::debug!("Per-sample update skipped, forward move is {}", dx);
            return Ok(0);
        }

        let tick_interval_ms = dx / batch.len() as f64;
        let mut applied = 0;
        for index in 0..batch.len() {
            if let Some(tick) = batch.tick(index) {
                applied += apply_one(state, &tick, tick_interval_ms, settings, emit)?;
            }
        }
        Ok(applied)
    }
}

fn apply_one(
    state: &mut WindowState,
    batch: &Batch,
    tick_interval_ms: f64,
    settings: &WindowSettings,
    emit: &mut dyn FnMut(&WindowState, ShiftPlan),
) -> Result<usize, EngineError> {
    match state.append(batch)? {
        AppendOutcome::Applied(applied) => {
            let plan = plan_shift(
                applied.prior_domain_x,
                state.domain_x(),
                tick_interval_ms,
                settings.transition_fraction(),
            );
            state.record_transition(plan.duration_ms);
            tracing::debug!(
                "Applied {} samples (trimmed {}), window now [{}, {}]",
                applied.appended,
                applied.trimmed,
                state.domain_x().lo,
                state.domain_x().hi
            );
            emit(state, plan);
            Ok(1)
        }
        AppendOutcome::Unchanged(reason) => {
            tracing::debug!("Append left the window unchanged: {:?}", reason);
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::axis::AxisDomain;
    use crate::domain::sample::SeriesValues;
    use std::time::Duration;

    fn settings() -> WindowSettings {
        WindowSettings::new(3000.0, Duration::from_millis(1000), 0.95).unwrap()
    }

    fn seeded() -> WindowState {
        WindowState::bootstrap(
            3000.0,
            Batch::new(
                vec![0.0, 1000.0, 2000.0, 3000.0],
                vec![SeriesValues::new("a", vec![0.0, 1.0, -1.0, 0.0])],
            ),
        )
        .unwrap()
    }

    fn payload(time: Vec<f64>, values: Vec<f64>) -> Batch {
        Batch::new(time, vec![SeriesValues::new("a", values)])
    }

    #[test]
    fn test_default_strategy_is_batch() {
        assert_eq!(StrategyKind::default(), StrategyKind::Batch);
        assert_eq!(strategy_for(StrategyKind::default()).name(), "batch");
    }

    #[test]
    fn test_batch_update_emits_once() {
        let mut state = seeded();
        let mut plans = Vec::new();
        let applied = BatchUpdate
            .apply(
                &mut state,
                &payload(vec![4000.0, 5000.0], vec![1.0, 2.0]),
                &settings(),
                &mut |_, plan| plans.push(plan),
            )
            .unwrap();

        assert_eq!(applied, 1);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].start_offset, 4000.0);
        assert_eq!(plans[0].end_offset, 2000.0);
        assert_eq!(plans[0].duration_ms, 950.0);
        assert_eq!(state.transition_ms(), 950.0);
        assert_eq!(state.domain_x(), AxisDomain::new(2000.0, 5000.0));
    }

    #[test]
    fn test_batch_update_duplicate_emits_nothing() {
        let mut state = seeded();
        let before = state.clone();
        let mut emitted = 0;
        let applied = BatchUpdate
            .apply(
                &mut state,
                &payload(vec![3000.0], vec![0.0]),
                &settings(),
                &mut |_, _| emitted += 1,
            )
            .unwrap();

        assert_eq!(applied, 0);
        assert_eq!(emitted, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_per_sample_update_slices_transition() {
        let mut state = seeded();
        let mut frames = Vec::new();
        let applied = PerSampleUpdate
            .apply(
                &mut state,
                &payload(vec![4000.0, 5000.0], vec![1.0, 2.0]),
                &settings(),
                &mut |s, plan| frames.push((s.domain_x(), plan)),
            )
            .unwrap();

        // dx = 2000 over two ticks
        assert_eq!(applied, 2);
        assert_eq!(frames[0].0, AxisDomain::new(1000.0, 4000.0));
        assert_eq!(frames[1].0, AxisDomain::new(2000.0, 5000.0));
        assert_eq!(frames[0].1.duration_ms, 950.0);
        assert_eq!(frames[1].1.start_offset, 3000.0);
        assert_eq!(state.time(), &[2000.0, 3000.0, 4000.0, 5000.0]);
    }

    #[test]
    fn test_per_sample_update_rejects_mismatch_before_applying() {
        let mut state = seeded();
        let before = state.clone();
        let bad = Batch::new(
            vec![4000.0, 5000.0],
            vec![
                SeriesValues::new("a", vec![1.0, 2.0]),
                SeriesValues::new("b", vec![1.0, 2.0]),
            ],
        );

        let err = PerSampleUpdate
            .apply(&mut state, &bad, &settings(), &mut |_, _| {})
            .unwrap_err();
        assert!(matches!(err, EngineError::SeriesMismatch { .. }));
        assert_eq!(state, before);
    }
}
