//! Error types for the conversion pipeline.
//!
//! Configuration errors are fatal to a run because every conversion depends on
//! the viewing condition. Domain errors belong to a single entry and never
//! affect the rest of a batch.

use std::fmt;

use thiserror::Error;

/// Invalid viewing-condition or reference-white parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Adapting luminance must be finite and positive.
    #[error("adapting luminance must be a positive number of cd/m², got {0}")]
    AdaptingLuminance(f64),

    /// Background luminance must lie in (0, 100].
    #[error("background luminance must be in (0, 100], got {0}")]
    BackgroundLuminance(f64),

    /// Whitepoint must be finite and normalized to Y = 100.
    #[error("whitepoint must be finite with Y = 100, got [{x}, {y}, {z}]")]
    Whitepoint {
        /// X tristimulus value.
        x: f64,
        /// Y tristimulus value.
        y: f64,
        /// Z tristimulus value.
        z: f64,
    },

    #[error("unknown surround '{0}' (expected dark, dim or average)")]
    UnknownSurround(String),

    #[error("unknown illuminant '{0}' (expected A, C, D50, D55, D65 or D75)")]
    UnknownIlluminant(String),

    #[error("unknown observer '{0}' (expected 2 or 10)")]
    UnknownObserver(String),

    #[error("unknown chromatic correlate '{0}' (expected chroma, saturation or colorfulness)")]
    UnknownCorrelate(String),

    #[error("invalid reference pair '{0}' (expected ILLUMINANT/OBSERVER, e.g. D50/2)")]
    ReferencePair(String),
}

/// Stage of the inverse transform that produced a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Saturation,
    AchromaticResponse,
    OpponentDimensions,
    ResponseCompression,
    ChromaticAdaptation,
    Tristimulus,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Saturation => "saturation",
            Self::AchromaticResponse => "achromatic-response",
            Self::OpponentDimensions => "opponent-dimensions",
            Self::ResponseCompression => "response-compression",
            Self::ChromaticAdaptation => "chromatic-adaptation",
            Self::Tristimulus => "tristimulus",
        };
        f.write_str(name)
    }
}

/// Non-finite or out-of-range value inside the inverse transform.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{stage} stage: {message}")]
pub struct DomainError {
    pub stage: Stage,
    pub message: String,
}

impl DomainError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// A domain error tagged with the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{name}: {source}")]
pub struct EntryError {
    pub name: String,
    #[source]
    pub source: DomainError,
}

/// Result type for single conversions.
pub type ConvertResult<T> = Result<T, DomainError>;
