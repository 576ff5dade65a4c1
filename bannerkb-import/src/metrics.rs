//! Numeric normalization for locale-formatted metric fields.
//!
//! Spreadsheet exports carry counts as "12,345" and rates as "2.5%". The
//! rules here apply regardless of which header synonym supplied the raw
//! value; the mapper resolves synonyms before calling in.

/// Parse a count cell: strip thousands separators, parse as float, round to
/// the nearest integer. Absent or unparseable values become 0.
pub fn parse_count(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let cleaned = raw.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.round() as i64,
        _ => 0,
    }
}

/// Parse a click-through-rate cell, falling back to recomputation.
///
/// A trailing `%` is stripped. When the parsed rate is missing, not a
/// number, or exactly zero while both counts are positive, the rate is
/// recomputed as `clicks / impressions * 100`. The result is rounded to
/// two decimal places.
pub fn parse_ctr(raw: Option<&str>, impressions: i64, clicks: i64) -> f64 {
    let cleaned = raw
        .unwrap_or("0")
        .trim()
        .trim_end_matches('%')
        .trim()
        .to_string();

    let mut ctr = cleaned.parse::<f64>().unwrap_or(f64::NAN);

    if (ctr.is_nan() || ctr == 0.0) && impressions > 0 && clicks > 0 {
        ctr = clicks as f64 / impressions as f64 * 100.0;
    }

    if ctr.is_nan() {
        return 0.0;
    }

    (ctr * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_strip_thousands_separators() {
        assert_eq!(parse_count(Some("12,345")), 12345);
        assert_eq!(parse_count(Some("1,234,567")), 1234567);
    }

    #[test]
    fn counts_round_to_nearest_integer() {
        assert_eq!(parse_count(Some("10.6")), 11);
        assert_eq!(parse_count(Some("10.4")), 10);
    }

    #[test]
    fn absent_or_garbage_counts_are_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("n/a")), 0);
    }

    #[test]
    fn ctr_fallback_recomputes_from_counts() {
        assert_eq!(parse_ctr(None, 1000, 25), 2.5);
        assert_eq!(parse_ctr(Some(""), 1000, 25), 2.5);
        assert_eq!(parse_ctr(Some("0"), 1000, 25), 2.5);
    }

    #[test]
    fn explicit_ctr_wins_over_recomputation() {
        assert_eq!(parse_ctr(Some("10%"), 1000, 25), 10.0);
        assert_eq!(parse_ctr(Some("3.125"), 1000, 25), 3.13);
    }

    #[test]
    fn no_fallback_without_both_counts() {
        assert_eq!(parse_ctr(Some("0"), 1000, 0), 0.0);
        assert_eq!(parse_ctr(None, 0, 25), 0.0);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        // 1 / 3 * 100 = 33.333...
        assert_eq!(parse_ctr(None, 3, 1), 33.33);
    }
}
