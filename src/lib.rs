//! colorpro: author colors as CIECAM02 appearance correlates and get
//! deterministic XYZ, CIE Lab/LCh, sRGB and hex representations.
//!
//! ```
//! use colorpro::ciecam02::AppearanceCorrelate;
//! use colorpro::illuminant::ReferencePair;
//! use colorpro::pipeline::{NamedCorrelate, Pipeline};
//! use colorpro::viewing::{Surround, ViewingCondition};
//!
//! let viewing = ViewingCondition::new(
//!     ReferencePair::D65_2.whitepoint(), 16.0, 18.0, Surround::Average, false,
//! ).unwrap();
//! let pipeline = Pipeline::new(viewing, [ReferencePair::D50_2, ReferencePair::D65_2]);
//! let violet = AppearanceCorrelate::new(355.0, 25.0, 55.0);
//! let record = pipeline
//!     .convert(&NamedCorrelate::new("vibrant-violet", violet))
//!     .unwrap();
//! assert_eq!(record.hex.to_string(), "#862055");
//! ```

pub mod ciecam02;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod illuminant;
pub mod lab;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod rgb;
pub mod viewing;
pub mod xyz;
