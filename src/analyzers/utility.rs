/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `part / total` as a percentage, 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Percentage rendered with one decimal, the way every dashboard table shows it.
///
/// Ties round away from zero, same as [`round1`].
pub fn pct_label(part: usize, total: usize) -> String {
    format!("{:.1}", round1(pct(part, total)))
}

/// Rounds to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
        assert_eq!(pct_label(10, 0), "0.0");
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
        assert_eq!(pct_label(40, 400), "10.0");
        assert_eq!(pct_label(1, 3), "33.3");
    }

    #[test]
    fn test_pct_label_ties_round_up() {
        assert_eq!(pct_label(1, 16), "6.3");
        assert_eq!(pct_label(5, 400), "1.3");
        assert_eq!(pct_label(1, 80), "1.3");
        assert_eq!(pct_label(1, 16), format!("{:.1}", round1(pct(1, 16))));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(90.14), 90.1);
        assert_eq!(round1(90.16), 90.2);
    }
}
