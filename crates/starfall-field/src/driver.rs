//! Animation driver: start/stop control around the starfield frame loop.

use std::time::Duration;

use starfall_core::{InputEvent, Variant, Viewport};

use crate::constants::{DEFAULT_FPS, SPACE_CANVAS};
use crate::parallax::PointerState;
use crate::state::Starfield;
use crate::surface::Canvas;

/// A mountable surface as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInfo {
    /// Current viewport of the surface.
    pub viewport: Viewport,
    /// Whether the surface can be drawn on.
    pub has_context: bool,
}

/// The environment the starfield runs in.
pub trait Host {
    /// Look up a drawable surface by key.
    fn surface(&self, key: &str) -> Option<SurfaceInfo>;

    /// Whether the user asked for non-essential animation to be suppressed.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Result of [`Animator::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The loop is running.
    Running,
    /// The loop was already running; nothing changed.
    AlreadyRunning,
    /// Reduced motion requested; the loop was not started.
    ReducedMotion,
    /// No surface is mounted under the lookup key.
    MissingSurface,
    /// The surface exists but cannot be drawn on.
    NoContext,
}

impl StartOutcome {
    pub fn is_running(self) -> bool {
        matches!(self, StartOutcome::Running | StartOutcome::AlreadyRunning)
    }
}

/// Schedules at most one pending frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: (1000 / u64::from(fps.max(1))).max(1),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Replace any pending frame with one due at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64) {
        self.next_due_ms = Some(due_ms);
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms.is_some_and(|due| now_ms >= due)
    }

    /// Time left until the pending frame, zero when overdue.
    pub fn time_until(&self, now_ms: u64) -> Option<Duration> {
        self.next_due_ms
            .map(|due| Duration::from_millis(due.saturating_sub(now_ms)))
    }
}

/// Drives a [`Starfield`] on a canvas: simulate then render once per frame.
#[derive(Debug)]
pub struct Animator<C> {
    field: Starfield,
    canvas: C,
    clock: FrameClock,
    /// Whether input listeners are registered.
    listening: bool,
    frames_drawn: u64,
}

impl<C: Canvas> Animator<C> {
    pub fn new(field: Starfield, canvas: C, fps: u32) -> Self {
        Self {
            field,
            canvas,
            clock: FrameClock::new(fps),
            listening: false,
            frames_drawn: 0,
        }
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Whether a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.clock.is_pending()
    }

    /// Set up the surface, register listeners and schedule the first frame.
    ///
    /// Environmental problems leave the animator idle; the outcome says why.
    pub fn start(&mut self, host: &impl Host, now_ms: u64) -> StartOutcome {
        if self.is_running() {
            return StartOutcome::AlreadyRunning;
        }
        if host.prefers_reduced_motion() {
            log::info!("reduced motion requested, starfield disabled");
            return StartOutcome::ReducedMotion;
        }
        let Some(info) = host.surface(SPACE_CANVAS) else {
            log::info!("no surface mounted at {SPACE_CANVAS:?}, starfield disabled");
            return StartOutcome::MissingSurface;
        };
        if !info.has_context {
            log::warn!("surface {SPACE_CANVAS:?} has no drawing context, starfield disabled");
            return StartOutcome::NoContext;
        }

        self.field.resize(info.viewport, &mut self.canvas);
        self.field.set_pointer(PointerState::Neutral);
        self.listening = true;
        self.clock.schedule(now_ms);
        log::info!(
            "starfield started: {} variant, {} stars, {}ms frames",
            self.field.variant().name(),
            self.field.stars().len(),
            self.clock.interval_ms(),
        );
        StartOutcome::Running
    }

    /// Cancel the pending frame and deregister listeners.
    pub fn stop(&mut self) {
        if self.is_running() || self.listening {
            log::info!("starfield stopped after {} frames", self.frames_drawn);
        }
        self.clock.cancel();
        self.listening = false;
    }

    /// Feed an input event. Returns whether a listener consumed it.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.listening {
            return false;
        }
        match event {
            InputEvent::Resize(viewport) => self.field.resize(viewport, &mut self.canvas),
            InputEvent::PointerMove(p) => self.field.set_pointer(PointerState::At(p)),
            InputEvent::PointerLeave => self.field.set_pointer(PointerState::Neutral),
        }
        true
    }

    /// Run the pending frame if it is due. Returns whether a frame was drawn.
    pub fn on_frame(&mut self, now_ms: u64) -> bool {
        if !self.clock.is_due(now_ms) {
            return false;
        }
        self.field.simulate(now_ms);
        self.field.render(&mut self.canvas);
        self.frames_drawn += 1;
        self.clock.schedule(now_ms + self.clock.interval_ms());
        true
    }

    /// Time until the next frame, `None` when stopped.
    pub fn next_frame_in(&self, now_ms: u64) -> Option<Duration> {
        self.clock.time_until(now_ms)
    }

    /// Switch the star generation policy, regenerating the field.
    pub fn set_variant(&mut self, variant: Variant) {
        self.field.set_variant(variant, &mut self.canvas);
    }

    /// Repaint the current state without advancing it.
    pub fn redraw(&mut self) {
        self.field.render(&mut self.canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawCall, RecordingCanvas};
    use starfall_core::Point;

    struct FakeHost {
        surface: Option<SurfaceInfo>,
        reduced_motion: bool,
    }

    impl FakeHost {
        fn ready() -> Self {
            Self {
                surface: Some(SurfaceInfo {
                    viewport: Viewport::new(800.0, 600.0, 1.0),
                    has_context: true,
                }),
                reduced_motion: false,
            }
        }
    }

    impl Host for FakeHost {
        fn surface(&self, key: &str) -> Option<SurfaceInfo> {
            if key == SPACE_CANVAS { self.surface } else { None }
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion
        }
    }

    fn animator() -> Animator<RecordingCanvas> {
        Animator::new(
            Starfield::new(Variant::Flat, 42),
            RecordingCanvas::default(),
            60,
        )
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.interval_ms(), 16);
        assert!(!clock.is_due(100));
        clock.schedule(100);
        assert!(!clock.is_due(99));
        assert!(clock.is_due(100));
        assert_eq!(clock.time_until(90), Some(Duration::from_millis(10)));
        assert_eq!(clock.time_until(150), Some(Duration::ZERO));
        clock.cancel();
        assert_eq!(clock.time_until(90), None);
        assert_eq!(FrameClock::default().interval_ms(), 16);
        assert_eq!(FrameClock::new(0).interval_ms(), 1000);
        assert_eq!(FrameClock::new(5000).interval_ms(), 1);
    }

    #[test]
    fn test_start_runs_frames() {
        let mut animator = animator();
        assert_eq!(animator.start(&FakeHost::ready(), 0), StartOutcome::Running);
        assert!(animator.is_running());
        assert!(animator.on_frame(0));
        assert!(!animator.on_frame(10));
        assert!(animator.on_frame(16));
        assert_eq!(animator.frames_drawn(), 2);
        assert_eq!(animator.field().ticks(), 2);
        assert_eq!(animator.next_frame_in(20), Some(Duration::from_millis(12)));
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut animator = animator();
        let host = FakeHost::ready();
        assert_eq!(animator.start(&host, 0), StartOutcome::Running);
        let calls = animator.canvas().calls.len();
        assert_eq!(animator.start(&host, 5), StartOutcome::AlreadyRunning);
        assert_eq!(animator.canvas().calls.len(), calls);
    }

    #[test]
    fn test_reduced_motion_never_starts() {
        let mut animator = animator();
        let host = FakeHost {
            reduced_motion: true,
            ..FakeHost::ready()
        };
        assert_eq!(animator.start(&host, 0), StartOutcome::ReducedMotion);
        assert!(!animator.is_running());
        assert!(!animator.on_frame(1000));
        assert!(!animator.handle_event(InputEvent::PointerLeave));
        assert!(animator.canvas().calls.is_empty());
    }

    #[test]
    fn test_missing_surface_or_context_aborts_silently() {
        let mut animator = animator();
        let missing = FakeHost {
            surface: None,
            reduced_motion: false,
        };
        assert_eq!(animator.start(&missing, 0), StartOutcome::MissingSurface);

        let no_context = FakeHost {
            surface: Some(SurfaceInfo {
                viewport: Viewport::new(10.0, 10.0, 1.0),
                has_context: false,
            }),
            reduced_motion: false,
        };
        assert_eq!(animator.start(&no_context, 0), StartOutcome::NoContext);
        assert!(!animator.is_running());
        assert!(animator.canvas().calls.is_empty());
        assert!(!StartOutcome::NoContext.is_running());
    }

    #[test]
    fn test_stop_cancels_frames_and_listeners() {
        let mut animator = animator();
        animator.start(&FakeHost::ready(), 0);
        assert!(animator.on_frame(0));
        animator.stop();

        let calls = animator.canvas().calls.len();
        for t in 1..100 {
            assert!(!animator.on_frame(t * 16));
        }
        assert_eq!(animator.canvas().calls.len(), calls);
        assert_eq!(animator.next_frame_in(0), None);

        assert!(!animator.handle_event(InputEvent::PointerMove(Point::new(5.0, 5.0))));
        assert_eq!(animator.field().pointer(), PointerState::Neutral);
        assert!(!animator.handle_event(InputEvent::Resize(Viewport::new(5.0, 5.0, 1.0))));
        assert_eq!(animator.field().surface().width(), 800.0);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut animator = animator();
        let host = FakeHost::ready();
        animator.start(&host, 0);
        animator.stop();
        assert_eq!(animator.start(&host, 500), StartOutcome::Running);
        assert!(animator.on_frame(500));
    }

    #[test]
    fn test_events_reach_field() {
        let mut animator = animator();
        animator.start(&FakeHost::ready(), 0);

        assert!(animator.handle_event(InputEvent::PointerMove(Point::new(1.0, 2.0))));
        assert_eq!(
            animator.field().pointer(),
            PointerState::At(Point::new(1.0, 2.0))
        );
        assert!(animator.handle_event(InputEvent::PointerLeave));
        assert_eq!(animator.field().pointer(), PointerState::Neutral);

        assert!(animator.handle_event(InputEvent::Resize(Viewport::new(100.0, 100.0, 1.0))));
        assert_eq!(animator.field().surface().width(), 100.0);
    }

    #[test]
    fn test_set_variant() {
        let mut animator = animator();
        animator.start(&FakeHost::ready(), 0);
        animator.set_variant(Variant::Depth);
        assert_eq!(animator.field().variant(), Variant::Depth);
        assert_eq!(animator.field().surface().width(), 800.0);
        assert!(animator.on_frame(0));
    }

    #[test]
    fn test_redraw_renders_without_simulating() {
        let mut animator = animator();
        animator.start(&FakeHost::ready(), 0);
        animator.stop();
        let calls = animator.canvas().calls.len();

        animator.redraw();
        assert_eq!(animator.canvas().calls[calls], DrawCall::Clear);
        assert!(animator.canvas().calls.len() > calls + 1);
        assert_eq!(animator.field().ticks(), 0);
        assert_eq!(animator.frames_drawn(), 0);
    }
}
