use itertools::Itertools;

/// Total climbing and descending along a profile, in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Climb {
    pub ascent_m: f64,
    pub descent_m: f64,
}

/// Sums every rise and every drop between consecutive altitudes.
///
/// No smoothing or noise threshold is applied.
pub fn climb(altitudes_m: &[f64]) -> Climb {
    altitudes_m
        .iter()
        .tuple_windows()
        .fold(Climb::default(), |mut climb, (a, b)| {
            let delta = b - a;
            if delta > 0.0 {
                climb.ascent_m += delta;
            } else if delta < 0.0 {
                climb.descent_m -= delta;
            }
            climb
        })
}
