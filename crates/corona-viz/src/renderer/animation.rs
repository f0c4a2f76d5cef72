//! Animation loop state machine.
//!
//! The host calls `frame` once per display refresh and keeps doing so while it
//! returns `Schedule::Next`. Once the loop is stopped, either through `stop`,
//! a cancelled `LoopHandle` or a lost render target, `frame` never draws again.

use corona_api::{Canvas, ParameterSet, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::corona::CoronaScene;
use super::mapper::Mapper;
use crate::utils::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Not mounted yet
    Idle,
    /// Drawing with live signal updates
    Running,
    /// Drawing the last known signal, updates ignored
    Paused,
    /// Torn down, terminal
    Stopped,
}

impl LoopState {
    pub fn label(self) -> &'static str {
        match self {
            LoopState::Idle => "idle",
            LoopState::Running => "live",
            LoopState::Paused => "paused",
            LoopState::Stopped => "stopped",
        }
    }

    /// Whether the host should keep asking for frames
    pub fn wants_frames(self) -> bool {
        matches!(self, LoopState::Running | LoopState::Paused)
    }
}

/// What the host should do after a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Next,
    Stop,
}

/// Cancellation token shared between the loop and whoever tears it down
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoopHandle {
    /// Cancel the loop. Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct AnimationLoop {
    state: LoopState,
    handle: LoopHandle,
    scene: CoronaScene,
    viewport: Option<Viewport>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(scene: CoronaScene) -> Self {
        Self {
            state: LoopState::Idle,
            handle: LoopHandle::default(),
            scene,
            viewport: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn scene(&self) -> &CoronaScene {
        &self.scene
    }

    /// Frames painted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mount with the initial viewport and begin running
    pub fn start(&mut self, viewport: Viewport) -> bool {
        self.sync_cancel();
        if self.state != LoopState::Idle {
            return false;
        }
        self.resize(viewport);
        self.transition(LoopState::Running);
        true
    }

    /// Freeze the signal; frames keep drawing
    pub fn pause(&mut self) -> bool {
        self.sync_cancel();
        if self.state != LoopState::Running {
            return false;
        }
        self.transition(LoopState::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        self.sync_cancel();
        if self.state != LoopState::Paused {
            return false;
        }
        self.transition(LoopState::Running);
        true
    }

    /// Flip between live and paused, returning the resulting state
    pub fn toggle_live(&mut self) -> LoopState {
        match self.state {
            LoopState::Running => {
                self.pause();
            }
            LoopState::Paused => {
                self.resume();
            }
            _ => {}
        }
        self.state
    }

    /// Tear down. Returns true the first time only.
    pub fn stop(&mut self) -> bool {
        let cancelled = self.handle.cancel();
        if self.state != LoopState::Stopped {
            self.transition(LoopState::Stopped);
        }
        cancelled
    }

    /// The render target went away; stop instead of failing in the host
    pub fn surface_lost(&mut self, reason: &str) {
        if self.state.wants_frames() {
            log::warn!("Render target lost ({}), stopping animation", reason);
        }
        self.stop();
    }

    /// Apply a new viewport before the next frame draws
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.scene.resize_grain(viewport.backing_size());
        self.viewport = Some(viewport);
    }

    /// Replace the current signal. Ignored unless running live.
    pub fn push_signal(&mut self, signal: Signal) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.scene.set_signal(signal);
        true
    }

    /// Replace the knobs. Applies while paused too, only the signal freezes.
    pub fn set_knobs(&mut self, knobs: ParameterSet) {
        if self.state != LoopState::Stopped {
            self.scene.set_knobs(knobs);
        }
    }

    pub fn set_mapper(&mut self, mapper: Mapper) {
        if self.state != LoopState::Stopped {
            self.scene.set_mapper(mapper);
        }
    }

    /// Paint one frame and tell the host whether to schedule another
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Schedule {
        self.sync_cancel();
        if !self.state.wants_frames() {
            return Schedule::Stop;
        }

        if let Err(e) = canvas.status() {
            self.surface_lost(&e.to_string());
            return Schedule::Stop;
        }

        if let Some(viewport) = self.viewport.filter(|v| !v.is_empty()) {
            self.scene.paint(canvas, viewport.bounds());
            self.frames += 1;
        }

        // Teardown may have happened while painting
        self.sync_cancel();
        if self.state.wants_frames() {
            Schedule::Next
        } else {
            Schedule::Stop
        }
    }

    fn sync_cancel(&mut self) {
        if self.handle.is_cancelled() && self.state != LoopState::Stopped {
            self.transition(LoopState::Stopped);
        }
    }

    fn transition(&mut self, next: LoopState) {
        log::info!("Animation {} -> {}", self.state.label(), next.label());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingCanvas;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn animation() -> AnimationLoop {
        let knobs = ParameterSet {
            base_particles: 20.0,
            particle_amp: 40.0,
            grain: false,
            ..ParameterSet::default()
        };
        AnimationLoop::new(CoronaScene::new(
            Mapper::default(),
            knobs,
            StdRng::seed_from_u64(31),
        ))
    }

    fn viewport() -> Viewport {
        Viewport::new(640.0, 480.0, 1.0)
    }

    #[test]
    fn test_idle_until_started() {
        let mut anim = animation();
        let mut canvas = RecordingCanvas::default();
        assert_eq!(anim.state(), LoopState::Idle);
        assert_eq!(anim.frame(&mut canvas), Schedule::Stop);
        assert!(canvas.ops.is_empty());

        assert!(anim.start(viewport()));
        assert_eq!(anim.state(), LoopState::Running);
        assert!(!anim.start(viewport()));
        assert_eq!(anim.frame(&mut canvas), Schedule::Next);
        assert!(!canvas.ops.is_empty());
    }

    #[test]
    fn test_pause_freezes_signal_but_keeps_drawing() {
        let mut anim = animation();
        anim.start(viewport());
        let frozen = *anim.scene().signal();

        assert!(anim.pause());
        assert!(!anim.push_signal(Signal::new(Duration::from_secs(1), 0.9, 0.9, 0.9, 0.9)));
        assert_eq!(*anim.scene().signal(), frozen);

        let mut canvas = RecordingCanvas::default();
        assert_eq!(anim.frame(&mut canvas), Schedule::Next);
        assert_eq!(anim.frames(), 1);

        assert!(anim.resume());
        let live = Signal::new(Duration::from_secs(2), 0.1, 0.2, 0.3, 0.4);
        assert!(anim.push_signal(live));
        assert_eq!(*anim.scene().signal(), live);
    }

    #[test]
    fn test_toggle_live() {
        let mut anim = animation();
        assert_eq!(anim.toggle_live(), LoopState::Idle);
        anim.start(viewport());
        assert_eq!(anim.toggle_live(), LoopState::Paused);
        assert_eq!(anim.toggle_live(), LoopState::Running);
    }

    #[test]
    fn test_knobs_apply_while_paused() {
        let mut anim = animation();
        anim.start(viewport());
        anim.pause();
        let knobs = ParameterSet {
            base_particles: 5.0,
            particle_amp: 0.0,
            ..anim.scene().knobs().clone()
        };
        anim.set_knobs(knobs);
        assert_eq!(anim.scene().population().len(), 5);
    }

    #[test]
    fn test_stop_is_terminal_and_once() {
        let mut anim = animation();
        anim.start(viewport());
        assert!(anim.stop());
        assert!(!anim.stop());
        assert_eq!(anim.state(), LoopState::Stopped);
        assert!(!anim.resume());
        assert!(!anim.start(viewport()));

        let mut canvas = RecordingCanvas::default();
        assert_eq!(anim.frame(&mut canvas), Schedule::Stop);
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_external_cancel_prevents_drawing() {
        let mut anim = animation();
        anim.start(viewport());
        let handle = anim.handle();
        assert!(handle.cancel());
        assert!(!handle.cancel());

        let mut canvas = RecordingCanvas::default();
        assert_eq!(anim.frame(&mut canvas), Schedule::Stop);
        assert!(canvas.ops.is_empty());
        assert_eq!(anim.state(), LoopState::Stopped);
        assert!(!anim.stop());
    }

    #[test]
    fn test_lost_surface_stops_loop() {
        let mut anim = animation();
        anim.start(viewport());
        let mut canvas = RecordingCanvas {
            lost: true,
            ..RecordingCanvas::default()
        };
        assert_eq!(anim.frame(&mut canvas), Schedule::Stop);
        assert_eq!(anim.state(), LoopState::Stopped);
        assert!(canvas.ops.is_empty());

        canvas.lost = false;
        assert_eq!(anim.frame(&mut canvas), Schedule::Stop);
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_zero_viewport_skips_painting() {
        let mut anim = animation();
        anim.start(Viewport::new(0.0, 0.0, 1.0));
        let mut canvas = RecordingCanvas::default();
        assert_eq!(anim.frame(&mut canvas), Schedule::Next);
        assert!(canvas.ops.is_empty());

        anim.resize(viewport());
        anim.frame(&mut canvas);
        assert!(!canvas.ops.is_empty());
    }

    #[test]
    fn test_resize_sizes_grain_to_backing() {
        let mut anim = animation();
        anim.start(Viewport::new(300.0, 200.0, 2.0));
        assert_eq!(anim.scene().grain().size(), [600, 400]);
        anim.resize(Viewport::new(100.0, 50.0, 1.0));
        assert_eq!(anim.scene().grain().size(), [100, 50]);
    }
}
