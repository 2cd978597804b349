use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    pub hero_top: f64,
    pub hero_height: f64,
    pub second_top: f64,
}

impl SectionGeometry {
    pub fn new(hero_top: f64, hero_height: f64, second_top: f64) -> Option<Self> {
        let finite = hero_top.is_finite() && hero_height.is_finite() && second_top.is_finite();
        if !finite || hero_height <= 0.0 || second_top <= hero_top {
            return None;
        }
        Some(Self { hero_top, hero_height, second_top })
    }
}

pub trait LayoutProbe {
    // Measures hero and second section, `None` when either is missing or collapsed.
    fn measure(&self) -> Option<SectionGeometry>;

    // Current document scroll offset. While the viewport is pinned this is
    // the pinned offset, not the (zero) native one.
    fn scroll_offset(&self) -> f64;
}

#[derive(Debug, Default)]
pub struct GeometryTracker {
    current: Option<SectionGeometry>,
}

impl GeometryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, probe: &impl LayoutProbe) -> Option<SectionGeometry> {
        let measured = probe.measure();
        if measured != self.current {
            debug!("Hero geometry now {:?}", measured);
        }
        self.current = measured;
        measured
    }

    pub fn current(&self) -> Option<SectionGeometry> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

// Walks sibling links from `start` until a node satisfies `accept`.
// The start node itself is never returned.
pub fn resolve_following<N, F, P>(start: &N, mut next: F, accept: P) -> Option<N>
where
    F: FnMut(&N) -> Option<N>,
    P: Fn(&N) -> bool,
{
    let mut cursor = next(start);
    while let Some(node) = cursor {
        if accept(&node) {
            return Some(node);
        }
        cursor = next(&node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedProbe(Cell<Option<SectionGeometry>>);

    impl LayoutProbe for FixedProbe {
        fn measure(&self) -> Option<SectionGeometry> {
            self.0.get()
        }

        fn scroll_offset(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn rejects_degenerate_layouts() {
        assert!(SectionGeometry::new(0.0, 0.0, 0.0).is_none());
        assert!(SectionGeometry::new(100.0, 800.0, 50.0).is_none());
        assert!(SectionGeometry::new(0.0, 800.0, f64::NAN).is_none());
        assert!(SectionGeometry::new(0.0, 800.0, 800.0).is_some());
    }

    #[test]
    fn refresh_replaces_rather_than_patches() {
        let probe = FixedProbe(Cell::new(SectionGeometry::new(0.0, 800.0, 800.0)));
        let mut tracker = GeometryTracker::new();
        assert!(!tracker.is_active());

        tracker.refresh(&probe);
        assert_eq!(tracker.current().map(|g| g.second_top), Some(800.0));

        probe.0.set(SectionGeometry::new(0.0, 640.0, 700.0));
        tracker.refresh(&probe);
        assert_eq!(tracker.current(), SectionGeometry::new(0.0, 640.0, 700.0));

        probe.0.set(None);
        tracker.refresh(&probe);
        assert!(!tracker.is_active());
    }

    #[test]
    fn resolve_following_skips_non_matching_siblings() {
        let tags = ["section", "div", "aside", "section", "footer"];
        let next = |i: &usize| (*i + 1 < tags.len()).then_some(*i + 1);
        let is_section = |i: &usize| tags[*i] == "section";

        assert_eq!(resolve_following(&0, next, is_section), Some(3));
        assert_eq!(resolve_following(&3, next, is_section), None);
    }
}
