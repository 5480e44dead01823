use serde::{Deserialize, Serialize};

use super::{ensure_finite, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over the points. Identical x values cannot define a slope
/// and are reported as `DegenerateFit`.
pub fn fit_line(points: &[TrendPoint]) -> Result<LineFit, ScoringError> {
    if points.len() < 2 {
        return Err(ScoringError::InsufficientData {
            what: format!("trend fit needs at least 2 points, got {}", points.len()),
        });
    }

    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_xy = 0.0f64;
    let mut sum_x2 = 0.0f64;

    for point in points {
        let x = ensure_finite("trend_x", point.x)?;
        let y = ensure_finite("trend_y", point.y)?;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let first_x = points[0].x;
    if points.iter().all(|point| point.x == first_x) {
        return Err(ScoringError::DegenerateFit);
    }

    let n = points.len() as f64;
    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(ScoringError::DegenerateFit);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(LineFit { slope, intercept })
}
