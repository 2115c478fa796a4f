//! Fixed-rate frame loop.
//!
//! One spawned task owns the scene, the compositor and the sink. Each tick
//! reads the conversational state once, steps the scene, composes a frame,
//! publishes it and sleeps for whatever is left of the frame interval.
//! Overruns start the next tick immediately; nothing is skipped or caught up.
//! Cancellation is only observed at the sleep, so a tick always finishes.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use orb_core::{ConversationState, OrbConfig, OrbScene, RandomSource, StateCell};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::asset::OverlayImage;
use crate::compositor::Compositor;
use crate::error::{RenderError, Result};
use crate::sink::FrameSink;

/// Cloneable writer for the conversational state. Never blocks.
#[derive(Clone, Debug, Default)]
pub struct StateHandle(Arc<StateCell>);

impl StateHandle {
    pub fn new(state: ConversationState) -> Self {
        Self(Arc::new(StateCell::new(state)))
    }

    pub fn set(&self, state: ConversationState) {
        self.0.set(state);
    }

    pub fn get(&self) -> ConversationState {
        self.0.get()
    }
}

/// Everything the loop task owns exclusively while running.
struct Worker {
    scene: OrbScene,
    compositor: Compositor,
    sink: Box<dyn FrameSink>,
    rng: Box<dyn RandomSource + Send>,
}

impl Worker {
    fn tick(&mut self, state: ConversationState) -> Result<()> {
        let motion = self.scene.step(state, self.rng.as_mut());
        let frame = self.compositor.compose(&self.scene, &motion)?;
        self.sink.publish(frame)
    }
}

type LoopOutcome = (Worker, Result<()>);

pub struct OrbEngine {
    state: StateHandle,
    interval: Duration,
    token: CancellationToken,
    frames: Arc<AtomicU64>,
    worker: Option<Worker>,
    task: Option<JoinHandle<LoopOutcome>>,
}

impl OrbEngine {
    pub fn new(config: &OrbConfig, overlay: OverlayImage, sink: impl FrameSink + 'static) -> Result<Self> {
        config.validate()?;
        let worker = Worker {
            scene: OrbScene::new(config),
            compositor: Compositor::new(config, overlay),
            sink: Box::new(sink),
            rng: Box::new(SmallRng::from_os_rng()),
        };
        Ok(Self {
            state: StateHandle::default(),
            interval: config.frame_interval(),
            token: CancellationToken::new(),
            frames: Arc::new(AtomicU64::new(0)),
            worker: Some(worker),
            task: None,
        })
    }

    /// Replace the random source used for burst spawning.
    ///
    /// The running loop task owns the current source, so a call made between
    /// [`start`] and [`stop`] is ignored and `rng` is dropped. Call it before
    /// starting or after stopping.
    ///
    /// [`start`]: OrbEngine::start
    /// [`stop`]: OrbEngine::stop
    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        if let Some(worker) = self.worker.as_mut() {
            worker.rng = Box::new(rng);
        }
        self
    }

    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    /// Read by the next tick. Valid whether running or not.
    pub fn set_state(&self, state: ConversationState) {
        self.state.set(state);
    }

    pub fn state(&self) -> ConversationState {
        self.state.get()
    }

    pub fn frame_interval(&self) -> Duration {
        self.interval
    }

    /// Frames handed to the sink since construction.
    pub fn frames_emitted(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// True while the loop task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Scene state, available while stopped.
    pub fn scene(&self) -> Option<&OrbScene> {
        self.worker.as_ref().map(|w| &w.scene)
    }

    /// Spawn the frame loop. No-op while a loop task exists, including one
    /// that already exited on error and has not been reaped by [`stop`].
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// [`stop`]: OrbEngine::stop
    pub fn start(&mut self) -> Result<()> {
        if self.task.is_some() {
            return Ok(());
        }
        let worker = self
            .worker
            .take()
            .ok_or_else(|| RenderError::Task("frame loop state was lost in a panic".to_string()))?;

        let task = tokio::spawn(run_loop(
            worker,
            self.state.clone(),
            self.token.clone(),
            self.interval,
            Arc::clone(&self.frames),
        ));
        self.task = Some(task);
        info!(
            "orb frame loop started at {:.1} fps",
            1.0 / self.interval.as_secs_f64()
        );
        Ok(())
    }

    /// Request exit and wait for the in-flight tick. Once this returns no
    /// further frame reaches the sink. Returns the error that ended the loop
    /// early, if any. No-op when stopped.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        self.token.cancel();
        let joined = task.await;
        self.token = CancellationToken::new();

        match joined {
            Ok((worker, result)) => {
                self.worker = Some(worker);
                info!(
                    "orb frame loop stopped after {} frames",
                    self.frames_emitted()
                );
                result
            }
            Err(e) => Err(RenderError::Task(e.to_string())),
        }
    }

    /// Resolves once the running loop exits, by [`stop`] or by a fatal
    /// error. Resolves immediately when nothing is running.
    ///
    /// [`stop`]: OrbEngine::stop
    pub fn closed(&self) -> impl Future<Output = ()> + Send + use<> {
        let token = self.task.is_some().then(|| self.token.clone());
        async move {
            if let Some(token) = token {
                token.cancelled().await;
            }
        }
    }
}

impl Drop for OrbEngine {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_loop(
    mut worker: Worker,
    state: StateHandle,
    token: CancellationToken,
    interval: Duration,
    frames: Arc<AtomicU64>,
) -> LoopOutcome {
    let result = loop {
        if token.is_cancelled() {
            break Ok(());
        }
        let started = Instant::now();

        if let Err(e) = worker.tick(state.get()) {
            error!("frame loop tick failed: {e}");
            break Err(e);
        }
        frames.fetch_add(1, Ordering::Relaxed);

        let elapsed = started.elapsed();
        let delay = interval.saturating_sub(elapsed);
        if delay.is_zero() {
            debug!("tick overran frame budget: {elapsed:?} > {interval:?}");
        }

        tokio::select! {
            _ = token.cancelled() => break Ok(()),
            _ = tokio::time::sleep(delay) => {}
        }
    };
    // Wake anyone waiting in `closed()` when the loop ends on its own.
    token.cancel();
    (worker, result)
}
