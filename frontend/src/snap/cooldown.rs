use super::intent::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownWindow {
    pub direction: Direction,
    pub expires_at: f64,
}

// Stops trailing wheel or touch deltas from bouncing the viewport straight
// back after a transition lands. At most one window per direction.
#[derive(Debug)]
pub struct CooldownGuard {
    cooldown_ms: f64,
    advance: Option<CooldownWindow>,
    retreat: Option<CooldownWindow>,
}

impl CooldownGuard {
    pub fn new(cooldown_ms: f64) -> Self {
        Self { cooldown_ms, advance: None, retreat: None }
    }

    pub fn record_completion(&mut self, direction: Direction, now: f64) {
        let window = CooldownWindow {
            direction: direction.opposite(),
            expires_at: now + self.cooldown_ms,
        };
        *self.slot(window.direction) = Some(window);
    }

    pub fn is_suppressed(&mut self, direction: Direction, now: f64) -> bool {
        let slot = self.slot(direction);
        let current = *slot;
        match current {
            Some(window) if now < window.expires_at => true,
            Some(_) => {
                *slot = None;
                false
            }
            None => false,
        }
    }

    pub fn active(&self, direction: Direction) -> Option<CooldownWindow> {
        match direction {
            Direction::Advance => self.advance,
            Direction::Retreat => self.retreat,
        }
    }

    fn slot(&mut self, direction: Direction) -> &mut Option<CooldownWindow> {
        match direction {
            Direction::Advance => &mut self.advance,
            Direction::Retreat => &mut self.retreat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_suppresses_only_the_opposite_direction() {
        let mut guard = CooldownGuard::new(600.0);
        guard.record_completion(Direction::Advance, 1000.0);

        assert!(guard.is_suppressed(Direction::Retreat, 1000.0));
        assert!(guard.is_suppressed(Direction::Retreat, 1599.0));
        assert!(!guard.is_suppressed(Direction::Advance, 1000.0));
        assert_eq!(
            guard.active(Direction::Retreat),
            Some(CooldownWindow { direction: Direction::Retreat, expires_at: 1600.0 })
        );
    }

    #[test]
    fn window_expires_and_is_dropped() {
        let mut guard = CooldownGuard::new(600.0);
        guard.record_completion(Direction::Retreat, 0.0);

        assert!(!guard.is_suppressed(Direction::Advance, 600.0));
        assert_eq!(guard.active(Direction::Advance), None);
    }

    #[test]
    fn newer_completion_replaces_window() {
        let mut guard = CooldownGuard::new(600.0);
        guard.record_completion(Direction::Advance, 0.0);
        guard.record_completion(Direction::Advance, 400.0);

        assert_eq!(guard.active(Direction::Retreat).map(|w| w.expires_at), Some(1000.0));
        assert!(guard.is_suppressed(Direction::Retreat, 800.0));
    }
}
