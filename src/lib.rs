//! inspection-report: batch converter from tabular bridge-inspection records
//! to individually formatted Excel report pages with embedded photos.

pub mod cli;
pub mod error;
pub mod fields;
pub mod normalizer;
pub mod photos;
pub mod report;
pub mod template;
