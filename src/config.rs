//! Layered configuration: defaults, TOML file, environment, CLI flags.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ciecam02::CorrelateKind;
use crate::error::ConfigurationError;
use crate::illuminant::ReferencePair;
use crate::output::OutputFormat;
use crate::pipeline::Pipeline;
use crate::viewing::{Surround, ViewingCondition};
use crate::xyz::Xyz;

/// Environment variable prefix; nested keys use `__`
/// (`COLORPRO_VIEWING__ADAPTING_LUMINANCE=20`).
pub const ENV_PREFIX: &str = "COLORPRO_";

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Extract(Box<figment::Error>),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorproConfig {
    pub viewing: ViewingConfig,
    pub output: OutputConfig,
}

/// Viewing condition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewingConfig {
    /// Adopted white by illuminant/observer name
    pub whitepoint: ReferencePair,
    /// Explicit adopted white (X, Y, Z) at any scale, overrides `whitepoint`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_whitepoint: Option<[f64; 3]>,
    /// L_A in cd/m²
    pub adapting_luminance: f64,
    /// Y_b relative to the white
    pub background_luminance: f64,
    pub surround: Surround,
    pub discount_illuminant: bool,
}

impl Default for ViewingConfig {
    fn default() -> Self {
        // Self-luminous display under office lighting (500 lx, 80 cd/m² white)
        Self {
            whitepoint: ReferencePair::D65_2,
            custom_whitepoint: None,
            adapting_luminance: 16.0,
            background_luminance: 18.0,
            surround: Surround::Average,
            discount_illuminant: false,
        }
    }
}

impl ViewingConfig {
    /// Adopted white on the Y = 100 scale. A custom white may be given at
    /// any scale (e.g. Y = 1).
    pub fn adopted_white(&self) -> Xyz {
        self.custom_whitepoint
            .map(|white| Xyz::from(white).normalized())
            .unwrap_or_else(|| self.whitepoint.whitepoint())
    }

    pub fn build(&self) -> Result<ViewingCondition, ConfigurationError> {
        ViewingCondition::new(
            self.adopted_white(),
            self.adapting_luminance,
            self.background_luminance,
            self.surround,
            self.discount_illuminant,
        )
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Meaning of the third descriptor value
    pub correlate: CorrelateKind,
    /// Reference whitepoints to report Lab/LCh under
    pub pairs: Vec<ReferencePair>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Scss,
            correlate: CorrelateKind::Chroma,
            pairs: vec![ReferencePair::D50_2, ReferencePair::D65_2],
        }
    }
}

/// Values set explicitly on the command line. Unset fields are skipped when
/// serialized so they don't mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub viewing: ViewingOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepoint: Option<ReferencePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapting_luminance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_luminance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surround: Option<Surround>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_illuminant: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlate: Option<CorrelateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<ReferencePair>>,
}

impl ColorproConfig {
    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract()?)
    }

    /// Resolve the effective configuration.
    ///
    /// Later layers win: defaults, then `file` (if given), then `COLORPRO_*`
    /// environment variables, then `overrides`.
    pub fn load(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            let content = std::fs::read_to_string(path)?;
            figment = figment.merge(Toml::string(&content));
        }
        Ok(figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()?)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the pipeline, adding `extra_pairs` after the configured ones.
    pub fn pipeline(
        &self,
        extra_pairs: impl IntoIterator<Item = ReferencePair>,
    ) -> Result<Pipeline, ConfigurationError> {
        let viewing = self.viewing.build()?;
        let pairs = self.output.pairs.iter().copied().chain(extra_pairs);
        Ok(Pipeline::new(viewing, pairs))
    }
}
