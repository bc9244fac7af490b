//! Elevation profile ("altimetría") diagrams for race circuits.
//!
//! The pipeline is:
//!
//! 1. [ProfileSeries::from_circuit] turns a [circuit::Circuit] into a
//!    cumulative distance/altitude series.
//! 1. [ScalePlan::new] computes both axes: domains, pixel mapping and
//!    tick positions.
//! 1. [Diagram] composes a [VectorDocument] from the series, the scale
//!    plan and the [Climb] statistics.
//! 1. [svg::to_svg] serializes the document.

mod diagram;
mod error;
mod output;
mod profile;
mod scale;
mod stats;
mod style;
pub mod svg;
mod vector;

pub use crate::{
    diagram::Diagram,
    error::AltimetryError,
    output::write_atomic,
    profile::ProfileSeries,
    scale::{nice_step, AxisPlan, Layout, ScalePlan, X_TICK_STEP_M, Y_TARGET_TICKS},
    stats::{climb, Climb},
    style::{Captions, DiagramStyle, FontSizes, Palette, StrokeWidths},
    vector::{Primitive, Stroke, TextStyle, VectorDocument},
};
use log::info;
use std::path::Path;

/// Renders `series` and writes the SVG document to `path`.
///
/// The document is fully serialized before `path` is touched, and is
/// moved into place only once completely written.
pub fn write_svg<P: AsRef<Path>>(
    path: P,
    series: &ProfileSeries,
    style: &DiagramStyle,
) -> Result<(), AltimetryError> {
    let path = path.as_ref();
    let svg = Diagram::new(series, style).to_svg();
    write_atomic(path, svg.as_bytes())?;
    info!("altimetry; points: {}, out: {}", series.len(), path.display());
    Ok(())
}
