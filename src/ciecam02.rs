//! CIECAM02 inverse transform: appearance correlates to CIE XYZ.
//!
//! Follows CIE 159:2004. Starting from lightness J, a chromatic correlate and
//! hue angle h, the transform rebuilds the achromatic response, splits chroma
//! into opponent dimensions a/b, undoes the post-adaptation response
//! compression per cone channel, removes the von Kries gains of the viewing
//! condition and finally maps the sharpened CAT02 responses back to XYZ.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigurationError, ConvertResult, DomainError, Stage};
use crate::viewing::ViewingCondition;
use crate::xyz::Xyz;

/// CAT02 chromatic adaptation matrix (XYZ to sharpened RGB).
pub const CAT02: [[f64; 3]; 3] = [
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
];

/// Inverse of [`CAT02`].
pub const CAT02_INV: [[f64; 3]; 3] = [
    [1.0961238208355142, -0.27886900021828726, 0.1827451793827731],
    [0.45436904197535916, 0.4735331543074117, 0.07209780371722913],
    [-0.009627608738429355, -0.005698031216113421, 1.0153256399545427],
];

/// Hunt-Pointer-Estévez matrix (XYZ to cone fundamentals).
pub const HPE: [[f64; 3]; 3] = [
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
];

/// Inverse of [`HPE`].
pub const HPE_INV: [[f64; 3]; 3] = [
    [1.9101968340520348, -1.1121238927878747, 0.20190795676749937],
    [0.37095008824868864, 0.6290542573926132, -8.055142184358517e-06],
    [0.0, 0.0, 1.0],
];

/// Lower bound for J/100 in the chroma-to-magnitude step.
const J_RATIO_FLOOR: f64 = 1e-9;

/// Which chromatic correlate a bare number denotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelateKind {
    #[default]
    Chroma,
    Saturation,
    Colorfulness,
}

impl CorrelateKind {
    pub fn with_value(self, value: f64) -> ChromaticCorrelate {
        match self {
            Self::Chroma => ChromaticCorrelate::Chroma(value),
            Self::Saturation => ChromaticCorrelate::Saturation(value),
            Self::Colorfulness => ChromaticCorrelate::Colorfulness(value),
        }
    }
}

impl fmt::Display for CorrelateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chroma => "chroma",
            Self::Saturation => "saturation",
            Self::Colorfulness => "colorfulness",
        };
        f.write_str(name)
    }
}

impl FromStr for CorrelateKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chroma" | "c" => Ok(Self::Chroma),
            "saturation" | "s" => Ok(Self::Saturation),
            "colorfulness" | "m" => Ok(Self::Colorfulness),
            _ => Err(ConfigurationError::UnknownCorrelate(s.to_string())),
        }
    }
}

/// Chroma C, saturation s or colorfulness M.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromaticCorrelate {
    Chroma(f64),
    Saturation(f64),
    Colorfulness(f64),
}

impl ChromaticCorrelate {
    pub fn value(self) -> f64 {
        match self {
            Self::Chroma(v) | Self::Saturation(v) | Self::Colorfulness(v) => v,
        }
    }

    pub fn kind(self) -> CorrelateKind {
        match self {
            Self::Chroma(_) => CorrelateKind::Chroma,
            Self::Saturation(_) => CorrelateKind::Saturation,
            Self::Colorfulness(_) => CorrelateKind::Colorfulness,
        }
    }
}

/// One perceived color under a viewing condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppearanceCorrelate {
    /// Hue angle h in degrees (cyclic)
    pub hue: f64,
    /// Lightness J, 0-100
    pub lightness: f64,
    /// Chroma, saturation or colorfulness (>= 0)
    pub chromatic: ChromaticCorrelate,
}

impl AppearanceCorrelate {
    /// Correlate given as hue angle, lightness and chroma.
    pub fn new(hue: f64, lightness: f64, chroma: f64) -> Self {
        Self {
            hue,
            lightness,
            chromatic: ChromaticCorrelate::Chroma(chroma),
        }
    }

    pub fn with_saturation(hue: f64, lightness: f64, saturation: f64) -> Self {
        Self {
            hue,
            lightness,
            chromatic: ChromaticCorrelate::Saturation(saturation),
        }
    }

    pub fn with_colorfulness(hue: f64, lightness: f64, colorfulness: f64) -> Self {
        Self {
            hue,
            lightness,
            chromatic: ChromaticCorrelate::Colorfulness(colorfulness),
        }
    }
}

#[inline]
pub(crate) fn mat_vec(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Post-adaptation response compression of one cone channel (sign-preserving).
#[inline]
pub(crate) fn compress(value: f64, fl: f64) -> f64 {
    let scaled = (fl * value.abs() / 100.0).powf(0.42);
    value.signum() * 400.0 * scaled / (27.13 + scaled) + 0.1
}

/// Inverse of [`compress`]. Fails once the response reaches the asymptote.
#[inline]
fn decompress(value: f64, fl: f64) -> ConvertResult<f64> {
    let shifted = value - 0.1;
    let magnitude = shifted.abs();
    if !(magnitude < 400.0) {
        return Err(DomainError::new(
            Stage::ResponseCompression,
            format!("adapted response {value} outside the compression range"),
        ));
    }
    let base = (27.13 * magnitude) / (400.0 - magnitude);
    Ok(shifted.signum() * (100.0 / fl) * base.powf(1.0 / 0.42))
}

/// Von Kries transform in CAT02 space, fully adapting `xyz` from
/// `source_white` to `target_white`. Both whites share the scale of `xyz`.
pub fn adapt_whitepoint(xyz: Xyz, source_white: Xyz, target_white: Xyz) -> Xyz {
    if source_white == target_white {
        return xyz;
    }
    let source = mat_vec(&CAT02, source_white.to_array());
    let target = mat_vec(&CAT02, target_white.to_array());
    let rgb = mat_vec(&CAT02, xyz.to_array());
    let adapted = [0, 1, 2].map(|i| rgb[i] * target[i] / source[i]);
    Xyz::from(mat_vec(&CAT02_INV, adapted))
}

/// Eccentricity factor e_t for a hue angle in degrees.
#[inline]
pub fn eccentricity(hue_deg: f64) -> f64 {
    0.25 * ((hue_deg.to_radians() + 2.0).cos() + 3.8)
}

/// Convert any chromatic correlate to chroma C.
fn to_chroma(
    chromatic: ChromaticCorrelate,
    lightness: f64,
    vc: &ViewingCondition,
) -> ConvertResult<f64> {
    let fl4 = vc.luminance_adaptation().powf(0.25);
    let chroma = match chromatic {
        ChromaticCorrelate::Chroma(c) => c,
        ChromaticCorrelate::Colorfulness(m) => m / fl4,
        ChromaticCorrelate::Saturation(s) => {
            let brightness = (4.0 / vc.surround_params().c)
                * (lightness / 100.0).sqrt()
                * (vc.achromatic_white() + 4.0)
                * fl4;
            brightness * (s / 100.0).powi(2) / fl4
        }
    };
    if !chroma.is_finite() || chroma < 0.0 {
        return Err(DomainError::new(
            Stage::Saturation,
            format!("reconstructed chroma {chroma} is not a finite non-negative value"),
        ));
    }
    Ok(chroma)
}

/// Red-green (a) and yellow-blue (b) opponent dimensions.
///
/// Zero chroma short-circuits to the neutral axis so that p1 = e/t is never
/// evaluated.
fn opponent_dimensions(
    hue_deg: f64,
    chroma: f64,
    ratio: f64,
    p2: f64,
    vc: &ViewingCondition,
) -> ConvertResult<(f64, f64)> {
    let background = (1.64 - 0.29f64.powf(vc.background_factor())).powf(0.73);
    let t = (chroma / (ratio.sqrt() * background)).powf(1.0 / 0.9);
    if t == 0.0 {
        return Ok((0.0, 0.0));
    }

    let p1 = (50000.0 / 13.0) * vc.surround_params().nc * vc.ncb() * eccentricity(hue_deg) / t;
    let p3 = 21.0 / 20.0;
    let (sin_h, cos_h) = hue_deg.to_radians().sin_cos();
    let n = p2 * (2.0 + p3) * (460.0 / 1403.0);

    let (a, b) = if sin_h.abs() >= cos_h.abs() {
        let p4 = p1 / sin_h;
        let b = n
            / (p4 + (2.0 + p3) * (220.0 / 1403.0) * (cos_h / sin_h) - 27.0 / 1403.0
                + p3 * (6300.0 / 1403.0));
        (b * cos_h / sin_h, b)
    } else {
        let p5 = p1 / cos_h;
        let a = n
            / (p5 + (2.0 + p3) * (220.0 / 1403.0)
                - (27.0 / 1403.0 - p3 * (6300.0 / 1403.0)) * (sin_h / cos_h));
        (a, a * sin_h / cos_h)
    };

    if !(a.is_finite() && b.is_finite()) {
        return Err(DomainError::new(
            Stage::OpponentDimensions,
            format!("opponent dimensions ({a}, {b}) are not finite"),
        ));
    }
    Ok((a, b))
}

/// Invert CIECAM02: appearance correlate under `vc` to XYZ (Y_w scale).
///
/// # Example
///
/// ```
/// use colorpro::ciecam02::{AppearanceCorrelate, invert};
/// use colorpro::illuminant::ReferencePair;
/// use colorpro::viewing::{Surround, ViewingCondition};
///
/// let vc = ViewingCondition::new(
///     ReferencePair::D65_2.whitepoint(), 16.0, 18.0, Surround::Average, false,
/// ).unwrap();
/// let xyz = invert(&AppearanceCorrelate::new(355.0, 25.0, 55.0), &vc).unwrap();
/// assert!((xyz.y - 6.784).abs() < 1e-3);
/// ```
pub fn invert(correlate: &AppearanceCorrelate, vc: &ViewingCondition) -> ConvertResult<Xyz> {
    let AppearanceCorrelate {
        hue,
        lightness,
        chromatic,
    } = *correlate;

    if !hue.is_finite() {
        return Err(DomainError::new(Stage::Input, format!("hue {hue} is not finite")));
    }
    if !(0.0..=100.0).contains(&lightness) {
        return Err(DomainError::new(
            Stage::Input,
            format!("lightness {lightness} outside [0, 100]"),
        ));
    }
    let chromatic_value = chromatic.value();
    if !chromatic_value.is_finite() || chromatic_value < 0.0 {
        return Err(DomainError::new(
            Stage::Input,
            format!("{} {chromatic_value} must be finite and non-negative", chromatic.kind()),
        ));
    }

    let hue = hue.rem_euclid(360.0);
    let chroma = to_chroma(chromatic, lightness, vc)?;

    let params = vc.surround_params();
    let ratio = lightness / 100.0;
    let achromatic = vc.achromatic_white() * ratio.powf(1.0 / (params.c * vc.base_exponent()));
    if !achromatic.is_finite() {
        return Err(DomainError::new(
            Stage::AchromaticResponse,
            format!("achromatic response {achromatic} is not finite"),
        ));
    }
    let p2 = achromatic / vc.nbb() + 0.305;

    let (a, b) = opponent_dimensions(hue, chroma, ratio.max(J_RATIO_FLOOR), p2, vc)?;

    let rgb_a = [
        (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0,
        (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0,
        (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0,
    ];
    let fl = vc.luminance_adaptation();
    let rgb_p = [
        decompress(rgb_a[0], fl)?,
        decompress(rgb_a[1], fl)?,
        decompress(rgb_a[2], fl)?,
    ];

    let rgb_c = mat_vec(&CAT02, mat_vec(&HPE_INV, rgb_p));
    let gains = vc.adaptation_gains();
    let rgb = [rgb_c[0] / gains[0], rgb_c[1] / gains[1], rgb_c[2] / gains[2]];
    if !rgb.iter().all(|c| c.is_finite()) {
        return Err(DomainError::new(
            Stage::ChromaticAdaptation,
            format!("unadapted responses {rgb:?} are not finite"),
        ));
    }

    let xyz = Xyz::from(mat_vec(&CAT02_INV, rgb));
    if !xyz.is_finite() {
        return Err(DomainError::new(
            Stage::Tristimulus,
            format!("tristimulus {:?} is not finite", xyz.to_array()),
        ));
    }
    if xyz.has_negative() {
        warn!(
            hue,
            lightness,
            chroma,
            x = xyz.x,
            y = xyz.y,
            z = xyz.z,
            "Correlate maps to a stimulus with negative tristimulus values"
        );
    }

    Ok(xyz)
}
