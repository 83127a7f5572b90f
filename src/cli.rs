//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::ciecam02::CorrelateKind;
use crate::config::{ConfigOverrides, OutputOverrides, ViewingOverrides};
use crate::illuminant::ReferencePair;
use crate::output::OutputFormat;
use crate::viewing::Surround;

/// CLI-compatible output format enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Multi-line report with XYZ, Lab, HLC, sRGB and hex
    Text,
    /// SCSS variables
    Scss,
    /// Integer Lab under D50/2°
    Print,
    /// Integer Lab under D65/2°
    Affinity,
    /// JSON records
    Json,
    /// YAML records
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Scss => OutputFormat::Scss,
            FormatArg::Print => OutputFormat::Print,
            FormatArg::Affinity => OutputFormat::Affinity,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// CLI-compatible surround enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SurroundArg {
    Dark,
    Dim,
    Average,
}

impl From<SurroundArg> for Surround {
    fn from(arg: SurroundArg) -> Self {
        match arg {
            SurroundArg::Dark => Surround::Dark,
            SurroundArg::Dim => Surround::Dim,
            SurroundArg::Average => Surround::Average,
        }
    }
}

/// CLI-compatible chromatic correlate enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorrelateArg {
    /// Chroma C
    Chroma,
    /// Saturation s
    Saturation,
    /// Colorfulness M
    Colorfulness,
}

impl From<CorrelateArg> for CorrelateKind {
    fn from(arg: CorrelateArg) -> Self {
        match arg {
            CorrelateArg::Chroma => CorrelateKind::Chroma,
            CorrelateArg::Saturation => CorrelateKind::Saturation,
            CorrelateArg::Colorfulness => CorrelateKind::Colorfulness,
        }
    }
}

/// Convert CIECAM02 hue/lightness/chroma descriptors into XYZ, Lab, LCh, sRGB and hex.
#[derive(Parser, Debug)]
#[command(name = "colorpro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Descriptor file with `name: hue, lightness, chroma` lines ("-" for stdin)
    #[arg(
        value_name = "FILE",
        required_unless_present_any = ["color", "completions", "save_config"]
    )]
    pub input: Option<PathBuf>,

    /// Inline descriptor, e.g. "vibrant-violet: 355, 25, 55" (repeatable)
    #[arg(short, long, value_name = "DESCRIPTOR")]
    pub color: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Reference white for Lab/LCh, e.g. D50/2 or D65/10 (repeatable)
    #[arg(short, long = "pair", value_name = "ILLUMINANT/OBSERVER")]
    pub pairs: Vec<ReferencePair>,

    /// Meaning of the third descriptor value
    #[arg(long, value_enum)]
    pub correlate: Option<CorrelateArg>,

    /// Adopted white of the viewing condition, e.g. D65/2
    #[arg(long, value_name = "ILLUMINANT/OBSERVER")]
    pub whitepoint: Option<ReferencePair>,

    /// Adapting field luminance L_A in cd/m² (default 16)
    #[arg(long, value_name = "CD_M2")]
    pub adapting_luminance: Option<f64>,

    /// Background relative luminance Y_b (default 18)
    #[arg(long, value_name = "Y_B")]
    pub background_luminance: Option<f64>,

    /// Viewing surround
    #[arg(long, value_enum)]
    pub surround: Option<SurroundArg>,

    /// Assume complete chromatic adaptation (D = 1)
    #[arg(long)]
    pub discount_illuminant: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with an error if any line is invalid or any entry fails
    #[arg(long)]
    pub strict: bool,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (stderr if not specified)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Settings given on the command line, for merging over file and
    /// environment configuration.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            viewing: ViewingOverrides {
                whitepoint: self.whitepoint,
                adapting_luminance: self.adapting_luminance,
                background_luminance: self.background_luminance,
                surround: self.surround.map(Into::into),
                discount_illuminant: self.discount_illuminant.then_some(true),
            },
            output: OutputOverrides {
                format: self.format.map(Into::into),
                correlate: self.correlate.map(Into::into),
                pairs: (!self.pairs.is_empty()).then(|| self.pairs.clone()),
            },
        }
    }
}
