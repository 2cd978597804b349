use crate::config::SnapConfig;
use super::intent::Direction;

pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub translate_y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl ElementStyle {
    pub const NEUTRAL: ElementStyle = ElementStyle { translate_y: 0.0, scale: 1.0, opacity: 1.0 };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    pub fn transform_css(&self) -> String {
        format!("translate3d(0px, {:.2}px, 0px) scale({:.4})", self.translate_y, self.scale)
    }

    pub fn opacity_css(&self) -> String {
        format!("{:.4}", self.opacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyles {
    pub hero: ElementStyle,
    pub second: ElementStyle,
}

impl FrameStyles {
    pub const NEUTRAL: FrameStyles = FrameStyles {
        hero: ElementStyle::NEUTRAL,
        second: ElementStyle::NEUTRAL,
    };
}

// One transition, fixed at start. Geometry changes while it plays do not
// move its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    pub generation: u64,
    pub direction: Direction,
    pub from: f64,
    pub to: f64,
    pub started_at: f64,
    pub duration_ms: f64,
    // Hard bound after which the transition lands whatever the frame clock says.
    pub deadline_at: f64,
    pub leave_parallax: f64,
    pub leave_scale: f64,
}

impl TransitionPlan {
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn scroll_at(&self, eased: f64) -> f64 {
        self.from + (self.to - self.from) * eased
    }

    // Styles for an eased progress value. Neutral at 0; at 1 the entering
    // element sits where the landing jump will put it.
    pub fn styles_at(&self, eased: f64) -> FrameStyles {
        let shift = -(self.to - self.from) * eased;
        let entering = ElementStyle { translate_y: shift, scale: 1.0, opacity: 1.0 };
        let leaving = ElementStyle {
            translate_y: shift * self.leave_parallax,
            scale: 1.0 - self.leave_scale * eased,
            opacity: 1.0 - eased,
        };
        match self.direction {
            Direction::Advance => FrameStyles { hero: leaving, second: entering },
            Direction::Retreat => FrameStyles { hero: entering, second: leaving },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub direction: Direction,
    pub destination: f64,
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Idle,
    Frame { scroll_y: f64, styles: FrameStyles },
    Landed(Landing),
}

// `Idle -> Animating -> Idle`. Only one plan exists at a time.
#[derive(Debug)]
pub struct TransitionPlayer {
    duration_ms: f64,
    deadline_ms: f64,
    leave_parallax: f64,
    leave_scale: f64,
    current: Option<TransitionPlan>,
    last_eased: f64,
    generation: u64,
}

impl TransitionPlayer {
    pub fn new(config: &SnapConfig) -> Self {
        Self {
            duration_ms: config.duration_ms,
            deadline_ms: config.deadline_ms(),
            leave_parallax: config.leave_parallax,
            leave_scale: config.leave_scale,
            current: None,
            last_eased: 0.0,
            generation: 0,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&TransitionPlan> {
        self.current.as_ref()
    }

    pub fn start(&mut self, direction: Direction, from: f64, to: f64, now: f64) -> Option<TransitionPlan> {
        if self.current.is_some() {
            return None;
        }
        self.generation += 1;
        self.last_eased = 0.0;
        let plan = TransitionPlan {
            generation: self.generation,
            direction,
            from,
            to,
            started_at: now,
            duration_ms: self.duration_ms,
            deadline_at: now + self.deadline_ms,
            leave_parallax: self.leave_parallax,
            leave_scale: self.leave_scale,
        };
        self.current = Some(plan);
        Some(plan)
    }

    // Advances the clock. Progress never moves backwards even if `now` does.
    pub fn tick(&mut self, now: f64) -> Tick {
        let Some(plan) = self.current else {
            return Tick::Idle;
        };
        let progress = plan.progress(now);
        if progress >= 1.0 {
            return self.land(false).map_or(Tick::Idle, Tick::Landed);
        }
        self.last_eased = self.last_eased.max(ease_in_out_quad(progress));
        Tick::Frame {
            scroll_y: plan.scroll_at(self.last_eased),
            styles: plan.styles_at(self.last_eased),
        }
    }

    // Hard-timeout path. Ignores timers left over from earlier transitions.
    pub fn expire(&mut self, generation: u64) -> Option<Landing> {
        match self.current {
            Some(plan) if plan.generation == generation => self.land(true),
            _ => None,
        }
    }

    pub fn finish_now(&mut self) -> Option<Landing> {
        self.land(true)
    }

    fn land(&mut self, forced: bool) -> Option<Landing> {
        let plan = self.current.take()?;
        self.last_eased = 0.0;
        Some(Landing { direction: plan.direction, destination: plan.to, forced })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> TransitionPlayer {
        TransitionPlayer::new(&SnapConfig::default())
    }

    #[test]
    fn easing_hits_fixed_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.25), 0.125);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(0.75), 0.875);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(3.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=100 {
            let eased = ease_in_out_quad(step as f64 / 100.0);
            assert!(eased >= last);
            last = eased;
        }
    }

    #[test]
    fn second_start_is_refused_while_animating() {
        let mut p = player();
        assert!(p.start(Direction::Advance, 0.0, 800.0, 0.0).is_some());
        assert!(p.start(Direction::Advance, 0.0, 800.0, 10.0).is_none());
        assert!(p.start(Direction::Retreat, 0.0, 0.0, 10.0).is_none());
    }

    #[test]
    fn frames_interpolate_then_land_exactly() {
        let mut p = player();
        p.start(Direction::Advance, 0.0, 800.0, 100.0);

        match p.tick(100.0 + 450.0) {
            Tick::Frame { scroll_y, styles } => {
                assert_eq!(scroll_y, 400.0);
                assert_eq!(styles.second.translate_y, -400.0);
                assert_eq!(styles.hero.translate_y, -200.0);
                assert_eq!(styles.hero.opacity, 0.5);
            }
            other => panic!("expected frame, got {:?}", other),
        }

        assert_eq!(
            p.tick(100.0 + 900.0),
            Tick::Landed(Landing { direction: Direction::Advance, destination: 800.0, forced: false })
        );
        assert!(!p.is_animating());
        assert_eq!(p.tick(2000.0), Tick::Idle);
    }

    #[test]
    fn virtual_scroll_never_runs_backwards() {
        let mut p = player();
        p.start(Direction::Advance, 0.0, 800.0, 0.0);
        let Tick::Frame { scroll_y: ahead, .. } = p.tick(600.0) else { panic!("expected frame") };
        let Tick::Frame { scroll_y: behind, .. } = p.tick(300.0) else { panic!("expected frame") };
        assert_eq!(ahead, behind);
    }

    #[test]
    fn styles_start_neutral() {
        let mut p = player();
        let plan = p.start(Direction::Retreat, 800.0, 0.0, 0.0).expect("idle player");
        assert_eq!(plan.styles_at(0.0), FrameStyles::NEUTRAL);

        let end = plan.styles_at(1.0);
        assert_eq!(end.hero.translate_y, 800.0);
        assert!(!end.second.is_neutral());
        assert_eq!(end.second.opacity, 0.0);
    }

    #[test]
    fn stale_timeouts_are_ignored() {
        let mut p = player();
        let first = p.start(Direction::Advance, 0.0, 800.0, 0.0).expect("idle player");
        p.tick(900.0);
        let second = p.start(Direction::Retreat, 800.0, 0.0, 1600.0).expect("idle player");

        assert_eq!(p.expire(first.generation), None);
        assert!(p.is_animating());

        let landing = p.expire(second.generation).expect("current generation");
        assert!(landing.forced);
        assert_eq!(landing.destination, 0.0);
    }

    #[test]
    fn expiry_lands_when_frames_stop_arriving() {
        let mut p = player();
        let plan = p.start(Direction::Advance, 0.0, 800.0, 0.0).expect("idle player");
        assert_eq!(plan.deadline_at, 1400.0);
        assert!(matches!(p.tick(300.0), Tick::Frame { .. }));

        // no frame after 300ms, only the deadline timer fires
        let landing = p.expire(plan.generation).expect("in-flight transition");
        assert!(landing.forced);
        assert_eq!(landing.destination, 800.0);
        assert!(!p.is_animating());
        assert_eq!(p.tick(1500.0), Tick::Idle);
    }

    #[test]
    fn css_strings_are_stable() {
        let style = ElementStyle { translate_y: -12.5, scale: 0.97, opacity: 0.25 };
        assert_eq!(style.transform_css(), "translate3d(0px, -12.50px, 0px) scale(0.9700)");
        assert_eq!(style.opacity_css(), "0.2500");
    }
}
