use serde::{Deserialize, Serialize};

/// A viewport-relative box, as reported by layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn top(&self) -> f64 {
        self.y
    }
}

/// How a programmatic scroll is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    /// Animated by the platform; position settles some time later.
    Smooth,
    /// Applied before the call returns.
    Instant,
}

impl ScrollBehavior {
    /// Value of the CSS/DOM `behavior` option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
        }
    }
}
