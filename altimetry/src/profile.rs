use crate::AltimetryError;
use circuit::Circuit;
use log::{debug, warn};

/// Cumulative distance/altitude series of a circuit.
///
/// Both sequences have the same length, at least two points, and
/// index 0 is the origin. Distances start at 0 and never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSeries {
    /// Distance from the origin, in meters.
    distances_m: Vec<f64>,

    /// Altitude above mean sea level, in meters.
    altitudes_m: Vec<f64>,
}

impl ProfileSeries {
    /// Builds a series from an origin altitude, segment lengths, and
    /// segment end altitudes.
    ///
    /// Lengths and altitudes are expected to pair up; if the counts
    /// differ the longer one is truncated.
    pub fn from_parts(
        origin_alt_m: f64,
        lengths_m: &[u32],
        altitudes_m: &[f64],
    ) -> Result<Self, AltimetryError> {
        if lengths_m.is_empty() || altitudes_m.is_empty() {
            return Err(AltimetryError::EmptyProfile);
        }

        #[allow(clippy::cast_precision_loss)]
        let mut distances_m: Vec<f64> = std::iter::once(0.0)
            .chain(lengths_m.iter().scan(0_u64, |total, len| {
                *total += u64::from(*len);
                Some(*total as f64)
            }))
            .collect();

        let mut altitudes_m: Vec<f64> = std::iter::once(origin_alt_m)
            .chain(altitudes_m.iter().copied())
            .collect();

        if distances_m.len() != altitudes_m.len() {
            warn!(
                "profile; {} distances vs {} altitudes, truncating",
                distances_m.len(),
                altitudes_m.len()
            );
        }
        let len = distances_m.len().min(altitudes_m.len());
        distances_m.truncate(len);
        altitudes_m.truncate(len);

        Ok(Self {
            distances_m,
            altitudes_m,
        })
    }

    /// Extracts the profile of `circuit`.
    ///
    /// Segments without a usable distance are skipped entirely.
    pub fn from_circuit(circuit: &Circuit) -> Result<Self, AltimetryError> {
        let (lengths_m, altitudes_m): (Vec<u32>, Vec<f64>) = circuit
            .segments
            .iter()
            .enumerate()
            .filter_map(|(idx, segment)| match segment.distance_m {
                Some(distance_m) => Some((distance_m, segment.end.altitude_m)),
                None => {
                    warn!("segment {idx} has no usable distance, skipping");
                    None
                }
            })
            .unzip();
        let series = Self::from_parts(circuit.origin.altitude_m, &lengths_m, &altitudes_m)?;
        debug!(
            "profile; len: {}, distance: {} m, altitude: {}..{} m",
            series.len(),
            series.total_distance(),
            series.min_altitude(),
            series.max_altitude()
        );
        Ok(series)
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances_m
    }

    pub fn altitudes(&self) -> &[f64] {
        &self.altitudes_m
    }

    /// Returns `(distance, altitude)` pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances_m
            .iter()
            .copied()
            .zip(self.altitudes_m.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.distances_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances_m.is_empty()
    }

    /// Distance from the origin to the last point.
    pub fn total_distance(&self) -> f64 {
        self.distances_m.last().copied().unwrap_or(0.0)
    }

    pub fn min_altitude(&self) -> f64 {
        self.altitudes_m.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_altitude(&self) -> f64 {
        self.altitudes_m
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
