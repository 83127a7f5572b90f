//! CIE XYZ tristimulus values on the whitepoint Y=100 scale.

use serde::{Deserialize, Serialize};

/// CIE XYZ tristimulus value, scaled so that a reference white has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Tristimulus value of a stimulus with chromaticity (x, y) and luminance `big_y`.
    pub fn from_chromaticity(x: f64, y: f64, big_y: f64) -> Self {
        Self {
            x: big_y * x / y,
            y: big_y,
            z: big_y * (1.0 - x - y) / y,
        }
    }

    /// Chromaticity coordinates (x, y). Undefined for black.
    pub fn chromaticity(&self) -> (f64, f64) {
        let sum = self.x + self.y + self.z;
        (self.x / sum, self.y / sum)
    }

    /// Rescaled so that Y = 100. Black and non-finite values are returned
    /// unchanged.
    pub fn normalized(self) -> Self {
        if !self.is_finite() || self.y <= 0.0 {
            return self;
        }
        let scale = 100.0 / self.y;
        Self {
            x: self.x * scale,
            y: 100.0,
            z: self.z * scale,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Whether any component is negative (not physically realizable).
    pub fn has_negative(&self) -> bool {
        self.x < 0.0 || self.y < 0.0 || self.z < 0.0
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Xyz {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}
