use super::geometry::SectionGeometry;
use super::intent::Direction;

// Where the viewport sits relative to the second section's top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Above,
    AtBoundary,
    Below,
}

impl Zone {
    pub fn licenses(self, direction: Direction) -> bool {
        match direction {
            Direction::Advance => self == Zone::Above,
            Direction::Retreat => matches!(self, Zone::AtBoundary | Zone::Below),
        }
    }
}

pub fn classify(scroll_y: f64, geometry: &SectionGeometry, tolerance: f64) -> Zone {
    if scroll_y < geometry.second_top - tolerance {
        Zone::Above
    } else if scroll_y > geometry.second_top + tolerance {
        Zone::Below
    } else {
        Zone::AtBoundary
    }
}

// Extra gate on top of zone licensing. Advance needs some of the hero on
// screen, retreat needs the second section's top still close.
pub fn within_reach(
    scroll_y: f64,
    geometry: &SectionGeometry,
    direction: Direction,
    viewport_height: f64,
    retreat_reach_ratio: f64,
) -> bool {
    match direction {
        Direction::Advance => scroll_y + viewport_height > geometry.hero_top,
        Direction::Retreat => {
            scroll_y <= geometry.second_top + retreat_reach_ratio * geometry.hero_height
        }
    }
}
