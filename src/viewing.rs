//! CIECAM02 viewing conditions.
//!
//! A [`ViewingCondition`] bundles the whitepoint, adapting luminance,
//! background luminance, surround and discount flag together with every
//! coefficient the inverse transform derives from them. It is built once per
//! run and only ever borrowed afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ciecam02::{CAT02, CAT02_INV, HPE, compress, mat_vec};
use crate::error::ConfigurationError;
use crate::xyz::Xyz;

/// Surround of the viewed stimulus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surround {
    /// Projected slides or cinema in a dark room
    Dark,
    /// Television or displays in a dim room
    Dim,
    /// Surface colors and displays under office lighting
    #[default]
    Average,
}

/// Fixed model constants selected by a surround.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurroundParams {
    /// Maximum degree of adaptation
    pub f: f64,
    /// Impact of surround
    pub c: f64,
    /// Chromatic induction factor
    pub nc: f64,
}

impl Surround {
    pub fn params(self) -> SurroundParams {
        match self {
            Self::Dark => SurroundParams {
                f: 0.8,
                c: 0.525,
                nc: 0.8,
            },
            Self::Dim => SurroundParams {
                f: 0.9,
                c: 0.59,
                nc: 0.9,
            },
            Self::Average => SurroundParams {
                f: 1.0,
                c: 0.69,
                nc: 1.0,
            },
        }
    }
}

impl fmt::Display for Surround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dark => "dark",
            Self::Dim => "dim",
            Self::Average => "average",
        };
        f.write_str(name)
    }
}

impl FromStr for Surround {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "dim" => Ok(Self::Dim),
            "average" => Ok(Self::Average),
            _ => Err(ConfigurationError::UnknownSurround(s.to_string())),
        }
    }
}

/// Luminance-level adaptation factor F_L for an adapting luminance in cd/m².
pub fn luminance_adaptation(adapting_luminance: f64) -> f64 {
    let la5 = 5.0 * adapting_luminance;
    let k = 1.0 / (la5 + 1.0);
    let k4 = k.powi(4);
    0.2 * k4 * la5 + 0.1 * (1.0 - k4).powi(2) * la5.cbrt()
}

/// Degree of adaptation D for a surround's F and an adapting luminance.
pub fn degree_of_adaptation(f: f64, adapting_luminance: f64) -> f64 {
    f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
}

/// Allowed deviation of the adopted white's Y from 100.
const WHITE_Y_TOLERANCE: f64 = 1e-9;

/// Immutable CIECAM02 viewing condition with cached derived coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingCondition {
    whitepoint: Xyz,
    adapting_luminance: f64,
    background_luminance: f64,
    surround: Surround,
    discount_illuminant: bool,

    params: SurroundParams,
    d: f64,
    fl: f64,
    n: f64,
    z: f64,
    nbb: f64,
    ncb: f64,
    d_rgb: [f64; 3],
    aw: f64,
}

impl ViewingCondition {
    /// Build a viewing condition and derive its adaptation coefficients.
    ///
    /// # Arguments
    /// * `whitepoint` - Adopted white, normalized to Y = 100 (see [`Xyz::normalized`])
    /// * `adapting_luminance` - L_A in cd/m² (> 0)
    /// * `background_luminance` - Y_b relative to the white (0 < Y_b <= 100)
    /// * `surround` - Surround class
    /// * `discount_illuminant` - Assume complete adaptation (D = 1)
    pub fn new(
        whitepoint: Xyz,
        adapting_luminance: f64,
        background_luminance: f64,
        surround: Surround,
        discount_illuminant: bool,
    ) -> Result<Self, ConfigurationError> {
        if !whitepoint.is_finite() || (whitepoint.y - 100.0).abs() > WHITE_Y_TOLERANCE {
            return Err(ConfigurationError::Whitepoint {
                x: whitepoint.x,
                y: whitepoint.y,
                z: whitepoint.z,
            });
        }
        if !adapting_luminance.is_finite() || adapting_luminance <= 0.0 {
            return Err(ConfigurationError::AdaptingLuminance(adapting_luminance));
        }
        // Y_b = 0 would make the induction factors infinite
        if !(background_luminance > 0.0 && background_luminance <= 100.0) {
            return Err(ConfigurationError::BackgroundLuminance(
                background_luminance,
            ));
        }

        let params = surround.params();
        let yw = whitepoint.y;

        let n = background_luminance / yw;
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 * (1.0 / n).powf(0.2);
        let ncb = nbb;
        let fl = luminance_adaptation(adapting_luminance);
        let d = if discount_illuminant {
            1.0
        } else {
            degree_of_adaptation(params.f, adapting_luminance)
        };

        let rgb_w = mat_vec(&CAT02, whitepoint.to_array());
        let d_rgb = rgb_w.map(|c| yw * d / c + 1.0 - d);

        let rgb_wc = [d_rgb[0] * rgb_w[0], d_rgb[1] * rgb_w[1], d_rgb[2] * rgb_w[2]];
        let rgb_pw = mat_vec(&HPE, mat_vec(&CAT02_INV, rgb_wc));
        let [ra, ga, ba] = rgb_pw.map(|c| compress(c, fl));
        let aw = (2.0 * ra + ga + ba / 20.0 - 0.305) * nbb;

        Ok(Self {
            whitepoint,
            adapting_luminance,
            background_luminance,
            surround,
            discount_illuminant,
            params,
            d,
            fl,
            n,
            z,
            nbb,
            ncb,
            d_rgb,
            aw,
        })
    }

    pub fn whitepoint(&self) -> Xyz {
        self.whitepoint
    }

    pub fn adapting_luminance(&self) -> f64 {
        self.adapting_luminance
    }

    pub fn background_luminance(&self) -> f64 {
        self.background_luminance
    }

    pub fn surround(&self) -> Surround {
        self.surround
    }

    pub fn discount_illuminant(&self) -> bool {
        self.discount_illuminant
    }

    /// Surround constants F, c and N_c.
    pub fn surround_params(&self) -> SurroundParams {
        self.params
    }

    /// Degree of adaptation D.
    pub fn degree_of_adaptation(&self) -> f64 {
        self.d
    }

    /// Luminance-level adaptation factor F_L.
    pub fn luminance_adaptation(&self) -> f64 {
        self.fl
    }

    /// Background induction factor n = Y_b / Y_w.
    pub fn background_factor(&self) -> f64 {
        self.n
    }

    /// Base exponential nonlinearity z.
    pub fn base_exponent(&self) -> f64 {
        self.z
    }

    /// Brightness background induction factor N_bb.
    pub fn nbb(&self) -> f64 {
        self.nbb
    }

    /// Chromatic background induction factor N_cb.
    pub fn ncb(&self) -> f64 {
        self.ncb
    }

    /// Per-channel von Kries gains applied to sharpened CAT02 responses.
    pub fn adaptation_gains(&self) -> [f64; 3] {
        self.d_rgb
    }

    /// Achromatic response of the adopted white, A_w.
    pub fn achromatic_white(&self) -> f64 {
        self.aw
    }
}
