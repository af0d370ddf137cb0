use std::fmt;

pub const OPACITY_MIN: f64 = 0.0;
pub const OPACITY_MAX: f64 = 1.0;
pub const OPACITY_STEP: f64 = 0.01;
pub const OPACITY_DEFAULT: f64 = 0.75;

/// Player opacity, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Opacity(f64);

impl Opacity {
    /// Clamps into range; `NaN` falls back to the default.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(OPACITY_MIN, OPACITY_MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Value for an inline `opacity:` style.
    pub fn css_value(&self) -> String {
        let text = format!("{:.2}", self.0);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(OPACITY_DEFAULT)
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub opacity: Opacity,
    pub fullscreen: bool,
}

impl PlayerState {
    pub fn set_opacity(&mut self, value: f64) {
        self.opacity = Opacity::new(value);
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    pub fn fullscreen_label(&self) -> &'static str {
        if self.fullscreen {
            "Exit Fullscreen"
        } else {
            "Enter Fullscreen"
        }
    }
}
