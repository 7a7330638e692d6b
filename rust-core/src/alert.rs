//! Temperature alert evaluation

/// True iff the rolling temperature average sits at or above the threshold
///
/// Boundary inclusive: an average exactly at the threshold alerts.
pub fn evaluate(avg_temp: f64, threshold: f64) -> bool {
    avg_temp >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(evaluate(100.0, 100.0));
    }

    #[test]
    fn test_below_threshold() {
        assert!(!evaluate(99.999, 100.0));
    }

    #[test]
    fn test_above_threshold() {
        assert!(evaluate(105.0, 100.0));
    }
}
