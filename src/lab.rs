//! CIE L*a*b* and its cylindrical LCh form, relative to any reference white.

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

use crate::xyz::Xyz;

/// (6/29)³, the linear/cube-root threshold of the companding function.
const EPSILON: f64 = 216.0 / 24389.0;
/// (1/3)(29/6)², slope of the linear segment.
const LINEAR_SLOPE: f64 = 841.0 / 108.0;
const LINEAR_OFFSET: f64 = 4.0 / 29.0;

/// CIE L*a*b* color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// CIE LCh(ab) color: lightness, chroma and hue angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

#[inline]
fn compand(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

/// Express `xyz` as Lab relative to `white` (both on the same Y scale).
pub fn xyz_to_lab(xyz: Xyz, white: Xyz) -> Lab {
    let fx = compand(xyz.x / white.x);
    let fy = compand(xyz.y / white.y);
    let fz = compand(xyz.z / white.z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Polar form. Neutral colors get hue 0 instead of a noise angle.
    pub fn to_lch(self) -> Lch {
        let c = self.a.hypot(self.b);
        let h = if approx_eq!(f64, c, 0.0, epsilon = 1e-12) {
            0.0
        } else {
            self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
        };
        // rem_euclid can round up to exactly 360 for tiny negative angles
        let h = if h >= 360.0 { 0.0 } else { h };
        Lch { l: self.l, c, h }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

impl Lch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    pub fn to_lab(self) -> Lab {
        let (sin_h, cos_h) = self.h.to_radians().sin_cos();
        Lab {
            l: self.l,
            a: self.c * cos_h,
            b: self.c * sin_h,
        }
    }

    /// Hue, lightness, chroma ordering used by HLC reports.
    pub fn to_hlc(self) -> [f64; 3] {
        [self.h, self.l, self.c]
    }
}
