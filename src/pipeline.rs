//! Conversion pipeline: one appearance correlate in, one [`ColorRecord`] out.
//!
//! The pipeline holds the run's viewing condition and the ordered set of
//! reference whitepoints to express Lab/LCh under. Entries are independent, so
//! batches are converted in parallel and collected in input order.

use palette::Srgb;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::ciecam02::{AppearanceCorrelate, invert};
use crate::error::{ConvertResult, EntryError};
use crate::illuminant::ReferencePair;
use crate::lab::{Lab, Lch, xyz_to_lab};
use crate::rgb::{HexColor, srgb_from_xyz_under, to_hex};
use crate::viewing::ViewingCondition;
use crate::xyz::Xyz;

/// A named appearance correlate, as produced by the descriptor parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCorrelate {
    pub name: String,
    pub correlate: AppearanceCorrelate,
}

impl NamedCorrelate {
    pub fn new(name: impl Into<String>, correlate: AppearanceCorrelate) -> Self {
        Self {
            name: name.into(),
            correlate,
        }
    }
}

/// Lab and LCh of one stimulus under one reference whitepoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceColor {
    pub pair: ReferencePair,
    pub lab: Lab,
    pub lch: Lch,
}

/// Every representation computed for one named entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRecord {
    pub name: String,
    pub input: AppearanceCorrelate,
    pub xyz: Xyz,
    pub references: Vec<ReferenceColor>,
    pub srgb: Srgb<f64>,
    pub hex: HexColor,
}

impl ColorRecord {
    /// Lab/LCh under `pair`, if the pipeline was asked for it.
    pub fn reference(&self, pair: ReferencePair) -> Option<&ReferenceColor> {
        self.references.iter().find(|r| r.pair == pair)
    }
}

/// Pipeline over one viewing condition and a set of reference whitepoints.
#[derive(Debug, Clone)]
pub struct Pipeline {
    viewing: ViewingCondition,
    pairs: Vec<ReferencePair>,
}

impl Pipeline {
    /// Create a pipeline. Duplicate pairs are dropped, first occurrence wins.
    pub fn new(viewing: ViewingCondition, pairs: impl IntoIterator<Item = ReferencePair>) -> Self {
        let mut unique: Vec<ReferencePair> = Vec::new();
        for pair in pairs {
            if !unique.contains(&pair) {
                unique.push(pair);
            }
        }
        Self {
            viewing,
            pairs: unique,
        }
    }

    pub fn viewing(&self) -> &ViewingCondition {
        &self.viewing
    }

    pub fn pairs(&self) -> &[ReferencePair] {
        &self.pairs
    }

    /// Convert one correlate into every requested representation.
    #[cfg_attr(debug_assertions, instrument(skip(self, correlate)))]
    pub fn convert_correlate(
        &self,
        name: &str,
        correlate: &AppearanceCorrelate,
    ) -> ConvertResult<ColorRecord> {
        let xyz = invert(correlate, &self.viewing)?;

        let references = self
            .pairs
            .iter()
            .map(|&pair| {
                let lab = xyz_to_lab(xyz, pair.whitepoint());
                ReferenceColor {
                    pair,
                    lab,
                    lch: lab.to_lch(),
                }
            })
            .collect();

        let srgb = srgb_from_xyz_under(xyz, self.viewing.whitepoint());
        let hex = to_hex(srgb);
        debug!(name, %hex, x = xyz.x, y = xyz.y, z = xyz.z, "Converted correlate");

        Ok(ColorRecord {
            name: name.to_string(),
            input: *correlate,
            xyz,
            references,
            srgb,
            hex,
        })
    }

    pub fn convert(&self, entry: &NamedCorrelate) -> Result<ColorRecord, EntryError> {
        self.convert_correlate(&entry.name, &entry.correlate)
            .map_err(|source| EntryError {
                name: entry.name.clone(),
                source,
            })
    }

    /// Convert a batch in parallel. Results keep input order; a failed entry
    /// yields an `Err` in its slot and does not affect the others.
    pub fn run(&self, entries: &[NamedCorrelate]) -> Vec<Result<ColorRecord, EntryError>> {
        let results: Vec<_> = entries.par_iter().map(|entry| self.convert(entry)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            debug!(entry = %err.name, error = %err.source, "Conversion failed");
        }
        info!(
            entries = entries.len(),
            failed,
            pairs = self.pairs.len(),
            "Batch conversion complete"
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewing::Surround;

    fn pipeline(pairs: &[ReferencePair]) -> Pipeline {
        let vc = ViewingCondition::new(
            ReferencePair::D65_2.whitepoint(),
            16.0,
            18.0,
            Surround::Average,
            false,
        )
        .unwrap();
        Pipeline::new(vc, pairs.iter().copied())
    }

    #[test]
    fn duplicate_pairs_are_dropped() {
        let p = pipeline(&[
            ReferencePair::D50_2,
            ReferencePair::D65_2,
            ReferencePair::D50_2,
        ]);
        assert_eq!(p.pairs(), &[ReferencePair::D50_2, ReferencePair::D65_2]);
    }

    #[test]
    fn record_has_one_reference_per_pair() {
        let p = pipeline(&[ReferencePair::D50_10, ReferencePair::D65_10]);
        let record = p
            .convert(&NamedCorrelate::new(
                "teal",
                AppearanceCorrelate::new(218.0, 35.0, 40.0),
            ))
            .unwrap();
        assert_eq!(record.references.len(), 2);
        assert!(record.reference(ReferencePair::D50_10).is_some());
        assert!(record.reference(ReferencePair::D50_2).is_none());
    }

    #[test]
    fn failure_is_tagged_with_entry_name() {
        let p = pipeline(&[ReferencePair::D65_2]);
        let err = p
            .convert(&NamedCorrelate::new(
                "broken",
                AppearanceCorrelate::new(10.0, 150.0, 5.0),
            ))
            .unwrap_err();
        assert_eq!(err.name, "broken");
    }
}
