//! Standard illuminants, observers and their reference whitepoints.
//!
//! D50 is the usual reference for print work, D65 the whitepoint of sRGB and
//! most displays. The 1931 2° observer covers small fields of view such as
//! phone screens; the 1964 10° observer suits larger samples like an A4 print.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::xyz::Xyz;

/// CIE standard illuminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Illuminant {
    A,
    C,
    D50,
    D55,
    D65,
    D75,
}

impl Illuminant {
    pub const ALL: [Self; 6] = [Self::A, Self::C, Self::D50, Self::D55, Self::D65, Self::D75];

    /// Short label used in reports ("50" for D50, "A" for A).
    pub fn short_label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::C => "C",
            Self::D50 => "50",
            Self::D55 => "55",
            Self::D65 => "65",
            Self::D75 => "75",
        }
    }

    /// CIE chromaticity coordinates (x, y) under the given observer.
    pub fn chromaticity(self, observer: Observer) -> (f64, f64) {
        match (self, observer) {
            (Self::A, Observer::Cie1931) => (0.44757, 0.40745),
            (Self::A, Observer::Cie1964) => (0.45117, 0.40594),
            (Self::C, Observer::Cie1931) => (0.31006, 0.31616),
            (Self::C, Observer::Cie1964) => (0.31039, 0.31905),
            (Self::D50, Observer::Cie1931) => (0.34570, 0.35850),
            (Self::D50, Observer::Cie1964) => (0.34773, 0.35952),
            (Self::D55, Observer::Cie1931) => (0.33242, 0.34743),
            (Self::D55, Observer::Cie1964) => (0.33411, 0.34877),
            (Self::D65, Observer::Cie1931) => (0.31270, 0.32900),
            (Self::D65, Observer::Cie1964) => (0.31382, 0.33100),
            (Self::D75, Observer::Cie1931) => (0.29902, 0.31485),
            (Self::D75, Observer::Cie1964) => (0.29968, 0.31740),
        }
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::C => "C",
            Self::D50 => "D50",
            Self::D55 => "D55",
            Self::D65 => "D65",
            Self::D75 => "D75",
        };
        f.write_str(name)
    }
}

impl FromStr for Illuminant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "C" => Ok(Self::C),
            "D50" => Ok(Self::D50),
            "D55" => Ok(Self::D55),
            "D65" => Ok(Self::D65),
            "D75" => Ok(Self::D75),
            _ => Err(ConfigurationError::UnknownIlluminant(s.to_string())),
        }
    }
}

/// CIE standard colorimetric observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Observer {
    /// CIE 1931 2° standard observer
    Cie1931,
    /// CIE 1964 10° supplementary standard observer
    Cie1964,
}

impl Observer {
    pub fn degrees(self) -> u8 {
        match self {
            Self::Cie1931 => 2,
            Self::Cie1964 => 10,
        }
    }
}

impl FromStr for Observer {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('°') {
            "2" | "1931" => Ok(Self::Cie1931),
            "10" | "1964" => Ok(Self::Cie1964),
            _ => Err(ConfigurationError::UnknownObserver(s.to_string())),
        }
    }
}

/// An (illuminant, observer) pair naming a reference whitepoint.
///
/// Parses from `D50/2`, `d65/10` or `D65/10°`; serializes as `D50/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferencePair {
    pub illuminant: Illuminant,
    pub observer: Observer,
}

impl ReferencePair {
    pub const D50_2: Self = Self::new(Illuminant::D50, Observer::Cie1931);
    pub const D50_10: Self = Self::new(Illuminant::D50, Observer::Cie1964);
    pub const D65_2: Self = Self::new(Illuminant::D65, Observer::Cie1931);
    pub const D65_10: Self = Self::new(Illuminant::D65, Observer::Cie1964);

    pub const fn new(illuminant: Illuminant, observer: Observer) -> Self {
        Self {
            illuminant,
            observer,
        }
    }

    /// Reference whitepoint normalized to Y = 100.
    pub fn whitepoint(self) -> Xyz {
        let (x, y) = self.illuminant.chromaticity(self.observer);
        Xyz::from_chromaticity(x, y, 100.0)
    }

    /// Compact label for reports, e.g. `50/2°`.
    pub fn label(self) -> String {
        format!(
            "{}/{}°",
            self.illuminant.short_label(),
            self.observer.degrees()
        )
    }

    /// Every illuminant under both observers.
    pub fn all() -> impl Iterator<Item = Self> {
        Illuminant::ALL.into_iter().flat_map(|illuminant| {
            [Observer::Cie1931, Observer::Cie1964]
                .into_iter()
                .map(move |observer| Self::new(illuminant, observer))
        })
    }
}

impl fmt::Display for ReferencePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.illuminant, self.observer.degrees())
    }
}

impl FromStr for ReferencePair {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (illuminant, observer) = s
            .split_once('/')
            .ok_or_else(|| ConfigurationError::ReferencePair(s.to_string()))?;
        Ok(Self::new(illuminant.parse()?, observer.parse()?))
    }
}

impl TryFrom<String> for ReferencePair {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferencePair> for String {
    fn from(pair: ReferencePair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn d65_whitepoint_from_chromaticity() {
        let white = ReferencePair::D65_2.whitepoint();
        assert_relative_eq!(white.x, 95.04559270516715, epsilon = 1e-9);
        assert_relative_eq!(white.y, 100.0);
        assert_relative_eq!(white.z, 108.90577507598785, epsilon = 1e-9);
    }

    #[test]
    fn parses_pairs() {
        assert_eq!("D50/2".parse::<ReferencePair>(), Ok(ReferencePair::D50_2));
        assert_eq!("d65/10°".parse::<ReferencePair>(), Ok(ReferencePair::D65_10));
        assert_eq!(
            " a / 1931 ".parse::<ReferencePair>(),
            Ok(ReferencePair::new(Illuminant::A, Observer::Cie1931))
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(matches!(
            "D65".parse::<ReferencePair>(),
            Err(ConfigurationError::ReferencePair(_))
        ));
        assert!(matches!(
            "F2/2".parse::<ReferencePair>(),
            Err(ConfigurationError::UnknownIlluminant(_))
        ));
        assert!(matches!(
            "D65/4".parse::<ReferencePair>(),
            Err(ConfigurationError::UnknownObserver(_))
        ));
    }

    #[test]
    fn display_roundtrips() {
        for pair in ReferencePair::all() {
            assert_eq!(pair.to_string().parse::<ReferencePair>(), Ok(pair));
        }
        assert_eq!(ReferencePair::all().count(), 12);
    }

    #[test]
    fn labels() {
        assert_eq!(ReferencePair::D50_10.label(), "50/10°");
        assert_eq!(ReferencePair::D65_2.to_string(), "D65/2");
    }
}
