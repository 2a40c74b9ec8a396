/// Period-over-period delta for rate metrics, in percentage points.
pub fn point_delta(current: f64, previous: f64) -> f64 {
    current - previous
}

/// Period-over-period change for count metrics, as a percentage of the
/// previous period. A missing or empty baseline reads as "no change": the
/// result is 0, never infinity or NaN.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Share of `part` in `whole`, as a percentage with a zero-denominator
/// guard. Used for show/closing rates and funnel stage percentages.
pub fn rate(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_baseline_never_divides_by_zero() {
        assert_eq!(percent_change(42.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(10.0, -5.0), 0.0);
        assert_eq!(rate(3.0, 0.0), 0.0);
    }

    #[test]
    fn growth_and_decline_are_signed() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(point_delta(62.5, 70.0), -7.5);
    }

    #[test]
    fn rate_is_a_plain_percentage() {
        assert_eq!(rate(1.0, 4.0), 25.0);
        assert_eq!(rate(0.0, 4.0), 0.0);
    }
}
