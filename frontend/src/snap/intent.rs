use crate::config::SnapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Advance,
    Retreat,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Advance => Direction::Retreat,
            Direction::Retreat => Direction::Advance,
        }
    }

    fn from_sign(value: f64) -> Self {
        if value > 0.0 { Direction::Advance } else { Direction::Retreat }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionIntent {
    pub direction: Direction,
    pub magnitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMode {
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

// Raw input, already stripped of browser types.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // `modified` is Ctrl or Meta held: browser zoom and trackpad pinch.
    Wheel { delta_y: f64, mode: DeltaMode, page_height: f64, modified: bool },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    Key(KeyPress),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
    // Ctrl, Alt or Meta held
    pub modified: bool,
    pub editable_target: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    fn direction(&self) -> Option<Direction> {
        if self.modified || self.editable_target {
            return None;
        }
        match self.key.as_str() {
            "ArrowDown" | "PageDown" => Some(Direction::Advance),
            "ArrowUp" | "PageUp" | "Home" => Some(Direction::Retreat),
            " " | "Spacebar" if self.shift => Some(Direction::Retreat),
            " " | "Spacebar" => Some(Direction::Advance),
            _ => None,
        }
    }
}

pub fn normalize_wheel(delta_y: f64, mode: DeltaMode, line_height: f64, page_height: f64) -> f64 {
    match mode {
        DeltaMode::Pixel => delta_y,
        DeltaMode::Line => delta_y * line_height,
        DeltaMode::Page => delta_y * page_height,
    }
}

#[derive(Debug)]
pub struct IntentDetector {
    wheel_threshold: f64,
    touch_threshold: f64,
    line_height: f64,
    touch_start: Option<f64>,
}

impl IntentDetector {
    pub fn new(config: &SnapConfig) -> Self {
        Self {
            wheel_threshold: config.wheel_threshold,
            touch_threshold: config.touch_threshold,
            line_height: config.line_height_px,
            touch_start: None,
        }
    }

    pub fn detect(&mut self, event: &InputEvent) -> Option<TransitionIntent> {
        match event {
            InputEvent::Wheel { modified: true, .. } => None,
            InputEvent::Wheel { delta_y, mode, page_height, .. } => {
                let delta = normalize_wheel(*delta_y, *mode, self.line_height, *page_height);
                thresholded(delta, self.wheel_threshold)
            }
            InputEvent::TouchStart { y } => {
                self.touch_start = Some(*y);
                None
            }
            InputEvent::TouchMove { y } => {
                // finger moving up scrolls the page down
                let start = self.touch_start?;
                thresholded(start - *y, self.touch_threshold)
            }
            InputEvent::TouchEnd => {
                self.touch_start = None;
                None
            }
            InputEvent::Key(press) => press.direction().map(|direction| TransitionIntent {
                direction,
                magnitude: 1.0,
            }),
        }
    }

    // The rest of an accepted touch gesture must not start another transition.
    pub fn consume_gesture(&mut self) {
        self.touch_start = None;
    }
}

fn thresholded(delta: f64, threshold: f64) -> Option<TransitionIntent> {
    if !delta.is_finite() || delta.abs() <= threshold {
        return None;
    }
    Some(TransitionIntent {
        direction: Direction::from_sign(delta),
        magnitude: delta.abs(),
    })
}
