//! Output formats for converted records.
//!
//! Each format is a [`RecordFormatter`]; the CLI picks one through
//! [`OutputFormat::formatter`] and adds the reference pairs it needs to the
//! pipeline before converting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::illuminant::ReferencePair;
use crate::pipeline::ColorRecord;

/// Error produced while rendering records.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Record lacks Lab values for a pair the format needs.
    #[error("record '{name}' has no Lab values for {pair}")]
    MissingReference { name: String, pair: ReferencePair },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line report with every representation
    Text,
    /// SCSS variables (`$name: #hex;`)
    #[default]
    Scss,
    /// Integer Lab under D50/2° for print workflows
    Print,
    /// Integer Lab under D65/2° for Affinity Designer
    Affinity,
    /// JSON array of records
    Json,
    /// YAML sequence of records
    Yaml,
}

impl OutputFormat {
    pub fn formatter(self) -> Box<dyn RecordFormatter> {
        match self {
            Self::Text => Box::new(TextReport),
            Self::Scss => Box::new(ScssVariables),
            Self::Print => Box::new(IntegerLab::new(ReferencePair::D50_2)),
            Self::Affinity => Box::new(IntegerLab::new(ReferencePair::D65_2)),
            Self::Json => Box::new(Serialized::Json),
            Self::Yaml => Box::new(Serialized::Yaml),
        }
    }
}

/// Renders a batch of records as text.
pub trait RecordFormatter {
    /// Reference pairs every record must carry for this format.
    fn required_pairs(&self) -> Vec<ReferencePair> {
        Vec::new()
    }

    fn render(&self, records: &[ColorRecord]) -> Result<String, OutputError>;
}

fn triple(values: [f64; 3]) -> String {
    format!("{:6.2}, {:6.2}, {:6.2}", values[0], values[1], values[2])
}

fn int_triple(values: [f64; 3]) -> String {
    let [a, b, c] = values.map(|v| v.round() as i64);
    format!("{a}, {b}, {c}")
}

/// Multi-field report, one block per record separated by blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl TextReport {
    fn record(record: &ColorRecord) -> String {
        let mut lines = Vec::with_capacity(6 + 2 * record.references.len());
        let field = |label: &str, value: String| format!("{label:<10}: {value}");

        lines.push(field("NAME", record.name.clone()));
        lines.push(field(
            "CAM",
            triple([
                record.input.hue,
                record.input.lightness,
                record.input.chromatic.value(),
            ]),
        ));
        lines.push(field("XYZ", triple(record.xyz.to_array())));
        for reference in &record.references {
            let label = reference.pair.label();
            lines.push(field(&format!("LAB-{label}"), triple(reference.lab.to_array())));
            lines.push(field(&format!("HLC-{label}"), triple(reference.lch.to_hlc())));
        }
        let srgb = record.srgb;
        lines.push(field(
            "sRGB",
            triple([srgb.red, srgb.green, srgb.blue].map(|v| v * 255.0)),
        ));
        lines.push(field("HEX", record.hex.to_string()));

        let mut block = lines.join("\n");
        block.push('\n');
        block
    }
}

impl RecordFormatter for TextReport {
    fn render(&self, records: &[ColorRecord]) -> Result<String, OutputError> {
        Ok(records
            .iter()
            .map(Self::record)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// `$name: #hex;` per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssVariables;

impl RecordFormatter for ScssVariables {
    fn render(&self, records: &[ColorRecord]) -> Result<String, OutputError> {
        Ok(records
            .iter()
            .map(|r| format!("${}: {};\n", r.name, r.hex))
            .collect())
    }
}

/// `name = L, a, b` with Lab rounded to integers under a fixed reference.
#[derive(Debug, Clone, Copy)]
pub struct IntegerLab {
    pair: ReferencePair,
}

impl IntegerLab {
    pub fn new(pair: ReferencePair) -> Self {
        Self { pair }
    }
}

impl RecordFormatter for IntegerLab {
    fn required_pairs(&self) -> Vec<ReferencePair> {
        vec![self.pair]
    }

    fn render(&self, records: &[ColorRecord]) -> Result<String, OutputError> {
        let mut out = String::new();
        for record in records {
            let reference =
                record
                    .reference(self.pair)
                    .ok_or_else(|| OutputError::MissingReference {
                        name: record.name.clone(),
                        pair: self.pair,
                    })?;
            out.push_str(&format!(
                "{} = {}\n",
                record.name,
                int_triple(reference.lab.to_array())
            ));
        }
        Ok(out)
    }
}

/// Whole-batch serialization of the records.
#[derive(Debug, Clone, Copy)]
pub enum Serialized {
    Json,
    Yaml,
}

impl RecordFormatter for Serialized {
    fn render(&self, records: &[ColorRecord]) -> Result<String, OutputError> {
        match self {
            Self::Json => {
                let mut json = serde_json::to_string_pretty(records)?;
                json.push('\n');
                Ok(json)
            }
            Self::Yaml => Ok(serde_yaml::to_string(records)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_triple_rounds_half_away_from_zero() {
        assert_eq!(int_triple([31.5, -0.4, -2.5]), "32, 0, -3");
    }

    #[test]
    fn triple_pads_to_six() {
        assert_eq!(triple([355.0, 25.0, 5.004]), "355.00,  25.00,   5.00");
    }

    #[test]
    fn print_and_affinity_require_their_pairs() {
        assert_eq!(
            OutputFormat::Print.formatter().required_pairs(),
            vec![ReferencePair::D50_2]
        );
        assert_eq!(
            OutputFormat::Affinity.formatter().required_pairs(),
            vec![ReferencePair::D65_2]
        );
        assert!(OutputFormat::Scss.formatter().required_pairs().is_empty());
    }
}
