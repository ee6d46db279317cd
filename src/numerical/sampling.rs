/// half width of the sampled window around the vertex
pub const DEFAULT_HALF_WIDTH: f64 = 5.0;
/// distance between neighbouring samples
pub const DEFAULT_STEP: f64 = 0.2;
/// upper bound on the number of intervals of one sampled window
pub const MAX_INTERVALS: usize = 10_000;

/// number of step-wide intervals covering [-half_width, half_width];
/// None for a non-positive window or one wider than [`MAX_INTERVALS`]
pub fn interval_count(half_width: f64, step: f64) -> Option<usize> {
    if !(half_width > 0.0 && step > 0.0) {
        return None;
    }
    let intervals = (2.0 * half_width / step).round();
    if intervals.is_finite() && intervals <= MAX_INTERVALS as f64 {
        Some(intervals as usize)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl From<PlotPoint> for (f64, f64) {
    fn from(p: PlotPoint) -> (f64, f64) {
        (p.x, p.y)
    }
}

/// x coordinate of the vertex of a·x² + b·x + c; None when a = 0
pub fn vertex(a: f64, b: f64) -> Option<f64> {
    if a == 0.0 { None } else { Some(-b / (2.0 * a) + 0.0) }
}

/// Evenly spaced points of y = a·x² + b·x + c over [vertex - 5, vertex + 5] with step 0.2.
/// Empty when a = 0.
pub fn sample_points(a: f64, b: f64, c: f64) -> Vec<PlotPoint> {
    sample_points_with(a, b, c, DEFAULT_HALF_WIDTH, DEFAULT_STEP)
}

/// Same as [`sample_points`] with a configurable window. x is computed from the sample index,
/// not accumulated, so the last point lands on vertex + half_width.
/// Empty when the window does not pass [`interval_count`].
pub fn sample_points_with(a: f64, b: f64, c: f64, half_width: f64, step: f64) -> Vec<PlotPoint> {
    let Some(center) = vertex(a, b) else {
        return Vec::new();
    };
    let Some(intervals) = interval_count(half_width, step) else {
        return Vec::new();
    };
    let start = center - half_width;
    (0..=intervals)
        .map(|i| {
            let x = start + i as f64 * step;
            PlotPoint { x, y: a * x * x + b * x + c }
        })
        .collect()
}
