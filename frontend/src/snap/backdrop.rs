use super::geometry::SectionGeometry;

// Background shift of the hero for a native scroll position. Grows with the
// square of how much of the hero has been scrolled past, up to
// `round(viewport_height * ratio)` pixels.
pub fn backdrop_shift(scroll_y: f64, geometry: &SectionGeometry, viewport_height: f64, ratio: f64) -> i32 {
    let max_shift = (viewport_height * ratio).round();
    let seen = (scroll_y - geometry.hero_top).clamp(0.0, geometry.hero_height);
    let p = seen / geometry.hero_height;
    (p * p * max_shift).round() as i32
}

#[derive(Debug, Default)]
pub struct Backdrop {
    last: Option<i32>,
}

impl Backdrop {
    pub fn update(&mut self, shift: i32) -> Option<i32> {
        if self.last == Some(shift) {
            return None;
        }
        self.last = Some(shift);
        Some(shift)
    }

    pub fn forget(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> SectionGeometry {
        SectionGeometry::new(0.0, 800.0, 800.0).expect("valid geometry")
    }

    #[test]
    fn shift_is_quadratic_and_bounded() {
        let g = geometry();
        assert_eq!(backdrop_shift(0.0, &g, 800.0, 0.25), 0);
        assert_eq!(backdrop_shift(400.0, &g, 800.0, 0.25), 50);
        assert_eq!(backdrop_shift(800.0, &g, 800.0, 0.25), 200);
        assert_eq!(backdrop_shift(5000.0, &g, 800.0, 0.25), 200);
        assert_eq!(backdrop_shift(-30.0, &g, 800.0, 0.25), 0);
    }

    #[test]
    fn unchanged_shift_is_not_rewritten() {
        let mut backdrop = Backdrop::default();
        assert_eq!(backdrop.update(12), Some(12));
        assert_eq!(backdrop.update(12), None);
        assert_eq!(backdrop.update(13), Some(13));
        backdrop.forget();
        assert_eq!(backdrop.update(13), Some(13));
    }
}
