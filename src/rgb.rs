//! XYZ to sRGB encoding and hex quantization (IEC 61966-2-1).

use std::fmt;

use palette::{LinSrgb, Srgb};
use serde::{Serialize, Serializer};

use crate::ciecam02::adapt_whitepoint;
use crate::illuminant::ReferencePair;
use crate::xyz::Xyz;

/// XYZ (D65, Y = 1) to linear sRGB, as published in IEC 61966-2-1.
pub const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];

/// Linear values at or below this use the linear segment of the OETF.
pub const OETF_THRESHOLD: f64 = 0.0031308;

/// Linear sRGB from D65-relative XYZ on the Y = 100 scale. Not clipped.
pub fn linear_from_xyz(xyz: Xyz) -> LinSrgb<f64> {
    let [x, y, z] = xyz.to_array().map(|c| c / 100.0);
    let m = &XYZ_TO_LINEAR_SRGB;
    LinSrgb::new(
        m[0][0] * x + m[0][1] * y + m[0][2] * z,
        m[1][0] * x + m[1][1] * y + m[1][2] * z,
        m[2][0] * x + m[2][1] * y + m[2][2] * z,
    )
}

/// sRGB opto-electronic transfer function for one channel.
#[inline]
pub fn oetf(v: f64) -> f64 {
    if v <= OETF_THRESHOLD {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Gamma-encode linear sRGB channel by channel.
pub fn encode(linear: LinSrgb<f64>) -> Srgb<f64> {
    Srgb::new(oetf(linear.red), oetf(linear.green), oetf(linear.blue))
}

/// Encoded sRGB for a D65-relative XYZ value.
pub fn srgb_from_xyz(xyz: Xyz) -> Srgb<f64> {
    encode(linear_from_xyz(xyz))
}

/// Encoded sRGB for an XYZ value relative to `white` (Y = 100). Other whites
/// are adapted to the sRGB D65 white before encoding.
pub fn srgb_from_xyz_under(xyz: Xyz, white: Xyz) -> Srgb<f64> {
    srgb_from_xyz(adapt_whitepoint(xyz, white, ReferencePair::D65_2.whitepoint()))
}

/// 8-bit sRGB color rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Srgb<u8>);

/// Round one channel to 8 bits: scale, round once, clamp.
#[inline]
fn quantize(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Quantize encoded sRGB to a hex color.
pub fn to_hex(srgb: Srgb<f64>) -> HexColor {
    HexColor(Srgb::new(
        quantize(srgb.red),
        quantize(srgb.green),
        quantize(srgb.blue),
    ))
}

impl HexColor {
    pub fn channels(self) -> [u8; 3] {
        [self.0.red, self.0.green, self.0.blue]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
