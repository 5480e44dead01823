use super::composite::{compute_composite, SubjectValues};
use super::domain::{CompositeResult, TargetProfile};
use super::{ensure_finite, ScoringError};

/// A student exactly at the cutline lands near 91%, not 100%.
pub const CUTLINE_HEADROOM: f64 = 1.1;
pub const PROBABILITY_CAP: u8 = 99;

/// Probability of admission as an integer percent in `[0, 99]`.
pub fn estimate_probability(total: f64, cutline: f64) -> Result<u8, ScoringError> {
    let total = ensure_finite("total", total)?;
    let cutline = ensure_finite("cutline", cutline)?;
    if cutline <= 0.0 {
        return Err(ScoringError::OutOfRange {
            field: "cutline",
            value: cutline,
        });
    }

    let percent = total / (cutline * CUTLINE_HEADROOM) * 100.0;
    // round half up, then clamp; negative totals floor at 0
    let rounded = (percent + 0.5).floor();
    Ok(rounded.clamp(0.0, f64::from(PROBABILITY_CAP)) as u8)
}

/// Composite total and probability of one subject set against one target.
pub fn evaluate_target(
    values: &SubjectValues,
    target: &TargetProfile,
) -> Result<CompositeResult, ScoringError> {
    let total = compute_composite(values, &target.weights)?;
    let probability_percent = estimate_probability(total, target.cutline)?;
    Ok(CompositeResult {
        total,
        probability_percent,
    })
}
