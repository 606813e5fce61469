// Update scheduler - periodic ingestion driving a scope session
use crate::application::data_source::DataSource;
use crate::application::renderer::Renderer;
use crate::application::session::{Phase, ScopeSession};
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub struct Scheduler {
    source: Arc<dyn DataSource>,
    renderer: Arc<dyn Renderer>,
    session: ScopeSession,
}

/// Running polling task. Dropping the handle also ends the loop.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    phase: watch::Receiver<Phase>,
    task: JoinHandle<()>,
}

impl Scheduler {
    pub fn new(
        source: Arc<dyn DataSource>,
        renderer: Arc<dyn Renderer>,
        session: ScopeSession,
    ) -> Self {
        Self {
            source,
            renderer,
            session,
        }
    }

    /// Spawns the polling loop on the current runtime.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (phase_tx, phase_rx) = watch::channel(self.session.phase());
        let task = tokio::spawn(self.run(shutdown_rx, phase_tx));

        SchedulerHandle {
            shutdown: shutdown_tx,
            phase: phase_rx,
            task,
        }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>, phase: watch::Sender<Phase>) {
        let period = self.session.settings().interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("Getting data loop started (every {:?})", period);

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = shutdown.changed() => break,
                rendered = self.poll_once() => {
                    tracing::debug!("Cycle rendered {} frames", rendered);
                }
            }

            let current = self.session.phase();
            phase.send_if_modified(|previous| {
                if *previous == current {
                    return false;
                }
                tracing::info!("Scope phase {} -> {}", previous, current);
                *previous = current;
                true
            });
        }

        tracing::info!("Getting data loop stopped");
    }

    /// Runs one fetch/apply/render cycle. Failures are logged and contained to
    /// this cycle.
    pub async fn poll_once(&mut self) -> usize {
        let period = self.session.settings().interval();
        let batch = match self.source.fetch(period).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!("Fetching samples failed: {:#}", e);
                return 0;
            }
        };

        match self.session.ingest(batch) {
            Ok(frames) => {
                let rendered = frames.len();
                for frame in frames {
                    self.renderer.render(frame);
                }
                rendered
            }
            Err(e) => {
                tracing::warn!("Rejected payload: {}", e);
                0
            }
        }
    }

    pub fn session(&self) -> &ScopeSession {
        &self.session
    }
}

impl SchedulerHandle {
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn phase_receiver(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Stops polling and waits for the task to finish.
    pub async fn stop(self) -> anyhow::Result<()> {
        // the loop also exits if the receiver is already gone
        let _ = self.shutdown.send(true);
        self.task.await.context("Scheduler task failed")
    }
}
