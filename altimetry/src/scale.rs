//! Axis ranges, pixel mapping, and tick placement.

use crate::ProfileSeries;
use log::debug;

/// Spacing, in meters, between distance grid lines.
pub const X_TICK_STEP_M: u64 = 500;

/// Approximate number of altitude grid divisions.
pub const Y_TARGET_TICKS: usize = 6;

/// Canvas size and plot margins, in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 480.0,
            margin_left: 90.0,
            margin_right: 40.0,
            margin_top: 60.0,
            margin_bottom: 90.0,
        }
    }
}

impl Layout {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    pub fn plot_right(&self) -> f64 {
        self.margin_left + self.plot_width()
    }

    pub fn plot_bottom(&self) -> f64 {
        self.margin_top + self.plot_height()
    }
}

/// Returns a "nice" step, one of `{1, 2, 5, 10} × 10^k`, that divides
/// `span` into at most roughly `target_ticks` parts.
///
/// The result is the smallest such value not below
/// `span / target_ticks`. Non-positive spans return 1.
pub fn nice_step(span: f64, target_ticks: usize) -> f64 {
    if !(span > 0.0 && span.is_finite()) {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = span / target_ticks.max(1) as f64;
    #[allow(clippy::cast_possible_truncation)]
    let power = 10_f64.powi(raw.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|multiple| multiple * power)
        .find(|step| raw <= *step)
        .unwrap_or(10.0 * power)
}

/// Scale plan for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlan {
    /// Smallest data value.
    pub data_min: f64,

    /// Largest data value.
    pub data_max: f64,

    /// Value mapped onto `range_min`. Padded below `data_min` on the
    /// altitude axis.
    pub domain_min: f64,

    /// Value mapped onto `range_max`.
    pub domain_max: f64,

    /// Pixel position of `domain_min`.
    pub range_min: f64,

    /// Pixel position of `domain_max`.
    pub range_max: f64,

    pub tick_step: f64,

    /// Grid line positions, in data units.
    pub ticks: Vec<f64>,
}

impl AxisPlan {
    /// Linearly maps `value` from the domain onto the pixel range.
    ///
    /// A zero-width domain is treated as one unit wide.
    pub fn map(&self, value: f64) -> f64 {
        let span = match self.domain_max - self.domain_min {
            span if span == 0.0 => 1.0,
            span => span,
        };
        self.range_min + (value - self.domain_min) * (self.range_max - self.range_min) / span
    }
}

/// Both axes of a profile diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePlan {
    /// Distance axis.
    pub x: AxisPlan,

    /// Altitude axis. `range_min` is the bottom of the plot, so larger
    /// altitudes map to smaller pixel rows.
    pub y: AxisPlan,
}

impl ScalePlan {
    pub fn new(series: &ProfileSeries, layout: &Layout) -> Self {
        let plan = Self {
            x: distance_axis(series, layout),
            y: altitude_axis(series, layout),
        };
        debug!(
            "scale; x ticks: {:?}, y step: {}, y ticks: {}",
            plan.x.ticks,
            plan.y.tick_step,
            plan.y.ticks.len()
        );
        plan
    }

    /// Maps a `(distance, altitude)` point to `(pixel_x, pixel_y)`.
    pub fn project(&self, distance_m: f64, altitude_m: f64) -> (f64, f64) {
        (self.x.map(distance_m), self.y.map(altitude_m))
    }

    /// Pixel column of the last point.
    pub fn end_x(&self) -> f64 {
        self.x.map(self.x.data_max)
    }

    /// Pixel row of the padded altitude floor.
    pub fn floor_y(&self) -> f64 {
        self.y.map(self.y.domain_min)
    }
}

/// Ticks every [X_TICK_STEP_M], excluding the origin and the end of
/// the track. The end gets its own marker, even when it falls on a
/// multiple of the step.
fn distance_axis(series: &ProfileSeries, layout: &Layout) -> AxisPlan {
    let data_min = series.distances().first().copied().unwrap_or(0.0);
    let data_max = series.total_distance();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end = data_max.floor() as u64;
    let last = (end / X_TICK_STEP_M) * X_TICK_STEP_M;
    #[allow(clippy::cast_precision_loss)]
    let ticks = (1..)
        .map(|n| n * X_TICK_STEP_M)
        .take_while(|tick| *tick <= last)
        .filter(|tick| *tick != end)
        .map(|tick| tick as f64)
        .collect();

    AxisPlan {
        data_min,
        data_max,
        domain_min: data_min,
        domain_max: data_max,
        range_min: layout.margin_left,
        range_max: layout.plot_right(),
        tick_step: X_TICK_STEP_M as f64,
        ticks,
    }
}

/// Pads the drawing domain by 5% of the span (at least 2 m) and
/// places unlabeled grid lines on a nice step over the unpadded span.
fn altitude_axis(series: &ProfileSeries, layout: &Layout) -> AxisPlan {
    let data_min = series.min_altitude();
    let data_max = series.max_altitude();
    let span = data_max - data_min;
    let pad = (0.05 * span).max(2.0);

    let tick_step = nice_step(span, Y_TARGET_TICKS);
    let first = (data_min / tick_step).floor() * tick_step;
    // Absorb float error on the last tick.
    let limit = data_max + tick_step * 1e-9;
    // A nice step never yields more than target + 2 ticks. The cap holds
    // where the step vanishes against the magnitude of the altitudes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (((limit - first) / tick_step).floor().max(0.0) as usize + 1)
        .min(Y_TARGET_TICKS * 4);
    let ticks = (0..count)
        .map(|n| first + n as f64 * tick_step)
        .collect();

    AxisPlan {
        data_min,
        data_max,
        domain_min: data_min - pad,
        domain_max: data_max + pad,
        range_min: layout.plot_bottom(),
        range_max: layout.margin_top,
        tick_step,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::{nice_step, Layout, ScalePlan, Y_TARGET_TICKS};
    use crate::ProfileSeries;
    use approx::assert_relative_eq;

    fn scale_plan(origin: f64, lengths: &[u32], altitudes: &[f64]) -> ScalePlan {
        let series = ProfileSeries::from_parts(origin, lengths, altitudes).unwrap();
        ScalePlan::new(&series, &Layout::default())
    }

    #[test]
    fn test_nice_step() {
        assert_relative_eq!(nice_step(30.0, 6), 5.0);
        assert_relative_eq!(nice_step(30.0, 5), 10.0);
        assert_relative_eq!(nice_step(1000.0, 6), 200.0);
        assert_relative_eq!(nice_step(6.0, 6), 1.0);
        assert_relative_eq!(nice_step(1.2, 6), 0.2);
        assert_relative_eq!(nice_step(45.0, 6), 10.0);
        assert_relative_eq!(nice_step(0.0, 6), 1.0);
        assert_relative_eq!(nice_step(-3.0, 6), 1.0);
    }

    #[test]
    fn test_nice_step_is_minimal_nice_value() {
        for span in [0.07, 0.9, 3.0, 13.0, 77.7, 250.0, 999.0, 1234.5, 98_765.0] {
            for target in 1..=10_usize {
                let step = nice_step(span, target);
                let raw = span / target as f64;
                assert!(raw <= step, "span {span}, target {target}: {step} < {raw}");

                let power = 10_f64.powf(step.log10().floor());
                let mantissa = (step / power).round();
                assert!(
                    [1.0, 2.0, 5.0, 10.0].contains(&mantissa),
                    "span {span}, target {target}: {step} not nice"
                );

                let candidates = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0];
                let smaller = candidates
                    .iter()
                    .map(|m| m * power)
                    .filter(|c| *c < step * (1.0 - 1e-9))
                    .any(|c| raw <= c * (1.0 - 1e-9));
                assert!(!smaller, "span {span}, target {target}: {step} not minimal");
            }
        }
    }

    #[test]
    fn test_distance_ticks() {
        let plan = scale_plan(100.0, &[1000, 2000], &[120.0, 90.0]);
        assert_eq!(plan.x.ticks, vec![500.0, 1000.0, 1500.0, 2000.0, 2500.0]);

        let plan = scale_plan(0.0, &[1200, 1100], &[1.0, 2.0]);
        assert_eq!(plan.x.ticks, vec![500.0, 1000.0, 1500.0, 2000.0]);
    }

    #[test]
    fn test_short_track_has_no_distance_ticks() {
        let plan = scale_plan(0.0, &[300], &[10.0]);
        assert!(plan.x.ticks.is_empty());
        assert_relative_eq!(plan.x.data_max, 300.0);
        assert_relative_eq!(plan.end_x(), Layout::default().plot_right());
    }

    #[test]
    fn test_altitude_axis() {
        let plan = scale_plan(100.0, &[1000, 2000], &[120.0, 90.0]);
        assert_relative_eq!(plan.y.data_min, 90.0);
        assert_relative_eq!(plan.y.data_max, 120.0);
        assert_relative_eq!(plan.y.domain_min, 88.0);
        assert_relative_eq!(plan.y.domain_max, 122.0);
        assert_relative_eq!(plan.y.tick_step, 5.0);
        assert_eq!(
            plan.y.ticks,
            vec![90.0, 95.0, 100.0, 105.0, 110.0, 115.0, 120.0]
        );

        // 5% of a 1000 m span exceeds the 2 m minimum.
        let plan = scale_plan(0.0, &[10], &[1000.0]);
        assert_relative_eq!(plan.y.domain_min, -50.0);
        assert_relative_eq!(plan.y.domain_max, 1050.0);
        assert_relative_eq!(plan.y.ticks[0], 0.0);
    }

    #[test]
    fn test_flat_altitude_axis() {
        let plan = scale_plan(100.0, &[100, 100], &[100.0, 100.0]);
        assert_relative_eq!(plan.y.tick_step, 1.0);
        assert_eq!(plan.y.ticks, vec![100.0]);
        assert_relative_eq!(plan.y.domain_min, 98.0);
        assert_relative_eq!(plan.y.domain_max, 102.0);
    }

    #[test]
    fn test_projection() {
        let layout = Layout::default();
        let plan = scale_plan(100.0, &[1000, 2000], &[120.0, 90.0]);

        let (x, y) = plan.project(0.0, 88.0);
        assert_relative_eq!(x, layout.margin_left);
        assert_relative_eq!(y, layout.plot_bottom());

        let (x, y) = plan.project(3000.0, 122.0);
        assert_relative_eq!(x, layout.plot_right());
        assert_relative_eq!(y, layout.margin_top);

        // Higher altitude, higher on the canvas.
        assert!(plan.y.map(120.0) < plan.y.map(90.0));
        assert_relative_eq!(plan.floor_y(), layout.plot_bottom());
    }

    #[test]
    fn test_zero_domain_does_not_divide_by_zero() {
        let mut plan = scale_plan(0.0, &[0], &[0.0]);
        assert_relative_eq!(plan.x.domain_max, 0.0);
        assert!(plan.x.map(0.0).is_finite());
        plan.x.range_max = plan.x.range_min + 10.0;
        assert_relative_eq!(plan.x.map(1.0), plan.x.range_min + 10.0);
    }

    #[test]
    fn test_altitude_ticks_at_huge_magnitude() {
        let plan = scale_plan(1e20, &[10, 10], &[1e20, 1e20]);
        assert_eq!(plan.y.ticks, vec![1e20]);

        let plan = scale_plan(-1e300, &[10], &[1e300]);
        assert!(!plan.y.ticks.is_empty());
        assert!(plan.y.ticks.len() <= Y_TARGET_TICKS * 4);
    }
}
