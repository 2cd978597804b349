use log::{debug, info, warn};

use crate::config::SnapConfig;
use super::backdrop::{backdrop_shift, Backdrop};
use super::cooldown::{CooldownGuard, CooldownWindow};
use super::geometry::{GeometryTracker, LayoutProbe, SectionGeometry};
use super::intent::{Direction, InputEvent, IntentDetector};
use super::player::{FrameStyles, Landing, Tick, TransitionPlan, TransitionPlayer};
use super::zone::{classify, within_reach};

// Everything the controller does to the page goes through here.
pub trait Viewport: LayoutProbe {
    fn lock(&mut self, at: f64);

    fn apply(&mut self, styles: &FrameStyles);

    // Hands the visuals of `plan` to a native animation engine when one is
    // available. Returns `false` to have frames applied through `apply`.
    fn begin_native(&mut self, _plan: &TransitionPlan) -> bool {
        false
    }

    fn reset(&mut self);

    fn release_to(&mut self, y: f64);

    fn viewport_height(&self) -> f64;

    fn shift_backdrop(&mut self, _px: i32) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Ignored,
    Started(TransitionPlan),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Started(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Idle,
    Continue,
    Landed(Landing),
}

pub struct SnapController<V> {
    config: SnapConfig,
    viewport: V,
    state: ViewportState,
    tracker: GeometryTracker,
    detector: IntentDetector,
    guard: CooldownGuard,
    player: TransitionPlayer,
    backdrop: Backdrop,
    native_visuals: bool,
    refresh_pending: bool,
    disabled: bool,
}

impl<V: Viewport> SnapController<V> {
    pub fn new(config: SnapConfig, viewport: V, reduced_motion: bool) -> Self {
        let scroll_y = viewport.scroll_offset();
        let mut controller = Self {
            detector: IntentDetector::new(&config),
            guard: CooldownGuard::new(config.cooldown_ms),
            player: TransitionPlayer::new(&config),
            config,
            viewport,
            state: ViewportState { scroll_y, animating: false },
            tracker: GeometryTracker::new(),
            backdrop: Backdrop::default(),
            native_visuals: false,
            refresh_pending: false,
            disabled: reduced_motion,
        };
        if reduced_motion {
            info!("Reduced motion requested, hero snap stays idle");
        } else {
            controller.refresh();
            controller.on_scroll();
        }
        controller
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn geometry(&self) -> Option<SectionGeometry> {
        self.tracker.current()
    }

    pub fn is_active(&self) -> bool {
        !self.disabled && self.tracker.is_active()
    }

    pub fn cooldown(&self, direction: Direction) -> Option<CooldownWindow> {
        self.guard.active(direction)
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    // Re-measures the layout. Mid-transition the pinned page would give
    // skewed numbers, so the refresh waits for the landing.
    pub fn refresh(&mut self) {
        if self.disabled {
            return;
        }
        if self.player.is_animating() {
            debug!("Deferring geometry refresh until transition lands");
            self.refresh_pending = true;
            return;
        }
        self.refresh_pending = false;
        if self.tracker.refresh(&self.viewport).is_none() {
            debug!("Hero geometry unavailable, hero snap inactive");
        }
    }

    pub fn on_scroll(&mut self) {
        if self.disabled || self.player.is_animating() {
            return;
        }
        self.state.scroll_y = self.viewport.scroll_offset();
        let Some(geometry) = self.tracker.current() else {
            return;
        };
        let shift = backdrop_shift(
            self.state.scroll_y,
            &geometry,
            self.viewport.viewport_height(),
            self.config.backdrop_ratio,
        );
        if let Some(shift) = self.backdrop.update(shift) {
            self.viewport.shift_backdrop(shift);
        }
    }

    // Feeds one input event through the detector and, when zone, cooldown
    // and exclusivity all agree, starts a transition.
    pub fn handle_input(&mut self, event: &InputEvent, now: f64) -> Verdict {
        if self.disabled {
            return Verdict::Ignored;
        }
        let Some(intent) = self.detector.detect(event) else {
            return Verdict::Ignored;
        };
        if self.player.is_animating() {
            return Verdict::Ignored;
        }
        let Some(geometry) = self.tracker.current() else {
            return Verdict::Ignored;
        };

        self.state.scroll_y = self.viewport.scroll_offset();
        let scroll_y = self.state.scroll_y;
        let direction = intent.direction;
        let tolerance = self.config.tolerance(geometry.hero_height);

        if !classify(scroll_y, &geometry, tolerance).licenses(direction) {
            return Verdict::Ignored;
        }
        let viewport_height = self.viewport.viewport_height();
        if !within_reach(scroll_y, &geometry, direction, viewport_height, self.config.retreat_reach_ratio) {
            return Verdict::Ignored;
        }
        if self.guard.is_suppressed(direction, now) {
            debug!("{:?} suppressed by cooldown", direction);
            return Verdict::Ignored;
        }

        let destination = match direction {
            Direction::Advance => geometry.second_top,
            Direction::Retreat => geometry.hero_top,
        };
        let Some(plan) = self.player.start(direction, scroll_y, destination, now) else {
            return Verdict::Ignored;
        };

        self.detector.consume_gesture();
        self.viewport.lock(scroll_y);
        self.native_visuals = self.viewport.begin_native(&plan);
        self.state.animating = true;
        info!(
            "Hero snap {:?} from {} to {} (magnitude {})",
            direction, scroll_y, destination, intent.magnitude
        );
        Verdict::Started(plan)
    }

    pub fn on_frame(&mut self, now: f64) -> FrameOutcome {
        match self.player.tick(now) {
            Tick::Idle => FrameOutcome::Idle,
            Tick::Frame { scroll_y, styles } => {
                self.state.scroll_y = scroll_y;
                if !self.native_visuals {
                    self.viewport.apply(&styles);
                }
                FrameOutcome::Continue
            }
            Tick::Landed(landing) => {
                self.land(landing, now);
                FrameOutcome::Landed(landing)
            }
        }
    }

    pub fn on_deadline(&mut self, generation: u64, now: f64) -> Option<Landing> {
        let landing = self.player.expire(generation)?;
        warn!("Hero snap frame clock stalled, forcing {:?} landing", landing.direction);
        self.land(landing, now);
        Some(landing)
    }

    // Lands anything in flight so the page is never left pinned.
    pub fn shutdown(&mut self, now: f64) -> Option<Landing> {
        let landing = self.player.finish_now()?;
        self.land(landing, now);
        Some(landing)
    }

    fn land(&mut self, landing: Landing, now: f64) {
        self.viewport.reset();
        self.viewport.release_to(landing.destination);
        self.native_visuals = false;
        self.state = ViewportState { scroll_y: landing.destination, animating: false };
        self.guard.record_completion(landing.direction, now);
        self.backdrop.forget();
        debug!("Hero snap landed at {}", landing.destination);

        if self.refresh_pending {
            self.refresh();
        }
        self.on_scroll();
    }
}
