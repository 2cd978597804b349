use log::warn;
use serde::Deserialize;

// Attribute on the hero element carrying per-page overrides as JSON.
pub const CONFIG_ATTRIBUTE: &str = "data-hero-snap";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub tolerance_px: f64,
    pub tolerance_ratio: f64,
    pub wheel_threshold: f64,
    pub touch_threshold: f64,
    pub duration_ms: f64,
    pub cooldown_ms: f64,
    // Extra time past `duration_ms` before a stalled transition is forced to land.
    pub timeout_margin_ms: f64,
    // How far below the second section's top (in hero heights) a retreat still snaps back.
    pub retreat_reach_ratio: f64,
    pub leave_parallax: f64,
    pub leave_scale: f64,
    pub backdrop_ratio: f64,
    pub line_height_px: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance_px: 20.0,
            tolerance_ratio: 0.04,
            wheel_threshold: 10.0,
            touch_threshold: 20.0,
            duration_ms: 900.0,
            cooldown_ms: 600.0,
            timeout_margin_ms: 500.0,
            retreat_reach_ratio: 0.25,
            leave_parallax: 0.5,
            leave_scale: 0.06,
            backdrop_ratio: 0.25,
            line_height_px: 16.0,
        }
    }
}

impl SnapConfig {
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<SnapConfig>(raw) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                warn!("Ignoring malformed {} value: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }
        }
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() { value.max(0.0) } else { fallback }
        };
        Self {
            tolerance_px: non_negative(self.tolerance_px, defaults.tolerance_px),
            tolerance_ratio: non_negative(self.tolerance_ratio, defaults.tolerance_ratio),
            wheel_threshold: non_negative(self.wheel_threshold, defaults.wheel_threshold),
            touch_threshold: non_negative(self.touch_threshold, defaults.touch_threshold),
            duration_ms: non_negative(self.duration_ms, defaults.duration_ms).max(1.0),
            cooldown_ms: non_negative(self.cooldown_ms, defaults.cooldown_ms),
            timeout_margin_ms: non_negative(self.timeout_margin_ms, defaults.timeout_margin_ms),
            retreat_reach_ratio: non_negative(self.retreat_reach_ratio, defaults.retreat_reach_ratio),
            leave_parallax: non_negative(self.leave_parallax, defaults.leave_parallax).min(1.0),
            leave_scale: non_negative(self.leave_scale, defaults.leave_scale).min(1.0),
            backdrop_ratio: non_negative(self.backdrop_ratio, defaults.backdrop_ratio),
            line_height_px: non_negative(self.line_height_px, defaults.line_height_px),
        }
    }

    pub fn tolerance(&self, hero_height: f64) -> f64 {
        self.tolerance_px.max(self.tolerance_ratio * hero_height)
    }

    pub fn deadline_ms(&self) -> f64 {
        self.duration_ms + self.timeout_margin_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_attribute_gives_defaults() {
        assert_eq!(SnapConfig::from_attribute(None), SnapConfig::default());
        assert_eq!(SnapConfig::from_attribute(Some("  ")), SnapConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SnapConfig::from_attribute(Some(r#"{"duration_ms": 1200, "cooldown_ms": 700}"#));
        assert_eq!(config.duration_ms, 1200.0);
        assert_eq!(config.cooldown_ms, 700.0);
        assert_eq!(config.wheel_threshold, 10.0);
    }

    #[test]
    fn malformed_attribute_falls_back() {
        let config = SnapConfig::from_attribute(Some("{duration_ms: fast}"));
        assert_eq!(config, SnapConfig::default());
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let config = SnapConfig {
            duration_ms: 0.0,
            wheel_threshold: -5.0,
            leave_scale: 3.0,
            ..SnapConfig::default()
        }
        .sanitized();
        assert_eq!(config.duration_ms, 1.0);
        assert_eq!(config.wheel_threshold, 0.0);
        assert_eq!(config.leave_scale, 1.0);
    }

    #[test]
    fn tolerance_uses_larger_of_floor_and_ratio() {
        let config = SnapConfig::default();
        assert_eq!(config.tolerance(300.0), 20.0);
        assert_eq!(config.tolerance(800.0), 32.0);
        assert_eq!(config.deadline_ms(), 1400.0);
    }
}
