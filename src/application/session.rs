// Scope session - bootstrap vs. incremental update state machine
use crate::application::renderer::RenderFrame;
use crate::application::update_strategy::UpdateStrategy;
use crate::domain::errors::EngineError;
use crate::domain::sample::Batch;
use crate::domain::settings::WindowSettings;
use crate::domain::viewport::Viewport;
use crate::domain::window::WindowState;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Streaming,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Streaming => "streaming",
        };
        f.write_str(name)
    }
}

/// Owns the window for one viewing session and turns payloads into frames.
pub struct ScopeSession {
    settings: WindowSettings,
    viewport: Viewport,
    strategy: Box<dyn UpdateStrategy>,
    window: Option<WindowState>,
    phase: Phase,
    next_sequence: u64,
}

impl ScopeSession {
    pub fn new(
        settings: WindowSettings,
        viewport: Viewport,
        strategy: Box<dyn UpdateStrategy>,
    ) -> Self {
        Self {
            settings,
            viewport,
            strategy,
            window: None,
            phase: Phase::Uninitialized,
            next_sequence: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    pub fn window(&self) -> Option<&WindowState> {
        self.window.as_ref()
    }

    /// Feeds one fetched payload through the session and returns the frames to
    /// render. A failed payload leaves the window exactly as it was.
    pub fn ingest(&mut self, batch: Batch) -> Result<Vec<RenderFrame>, EngineError> {
        match self.phase {
            Phase::Uninitialized => self.bootstrap(batch),
            Phase::Streaming => self.update(&batch),
        }
    }

    fn bootstrap(&mut self, batch: Batch) -> Result<Vec<RenderFrame>, EngineError> {
        if batch.is_empty() {
            tracing::info!("No data available. Will try again...");
            return Ok(Vec::new());
        }

        let series_count = batch.series.len();
        let window = WindowState::bootstrap(self.settings.window_duration(), batch)?;
        tracing::info!(
            "Window bootstrapped with {} series, {} samples, domain [{}, {}]",
            series_count,
            window.time().len(),
            window.domain_x().lo,
            window.domain_x().hi
        );

        let frame = RenderFrame::capture(self.take_sequence(), &window, None, &self.viewport);
        self.window = Some(window);
        // bootstrapping is a single step, the next tick already streams
        self.phase = Phase::Streaming;
        Ok(vec![frame])
    }

    fn update(&mut self, batch: &Batch) -> Result<Vec<RenderFrame>, EngineError> {
        let Some(window) = self.window.as_mut() else {
            return Ok(Vec::new());
        };

        let viewport = self.viewport;
        let mut sequence = self.next_sequence;
        let mut frames = Vec::new();
        self.strategy
            .apply(window, batch, &self.settings, &mut |state, plan| {
                frames.push(RenderFrame::capture(sequence, state, Some(plan), &viewport));
                sequence += 1;
            })?;
        self.next_sequence = sequence;
        Ok(frames)
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
