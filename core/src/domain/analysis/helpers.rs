use chrono::{DateTime, NaiveDate};

/// Formats a 0..1 ratio as a percentage with at most one decimal place:
/// 0.42 → "42%", 0.615 → "61.5%". Non-finite input yields nothing.
pub fn format_percent(value: Option<f64>) -> Option<String> {
    let value = value?;
    if !value.is_finite() {
        return None;
    }
    let rendered = format!("{:.1}", value * 100.0);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    Some(format!("{rendered}%"))
}

/// Renders a machine inference source for display: underscores and
/// hyphens become spaces ("hf_space" → "hf space").
pub fn readable_source(source: &str) -> String {
    source
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect()
}

/// Formats a timestamp as the short date shown on the result card, e.g.
/// "Aug 26, 2026". Accepts RFC 3339 or a plain date; anything else falls
/// back to the raw text.
pub fn format_meal_date(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.format("%b %-d, %Y").to_string())
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.format("%b %-d, %Y").to_string())
        })
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent_strips_trailing_zero() {
        assert_eq!(format_percent(Some(0.42)).as_deref(), Some("42%"));
        assert_eq!(format_percent(Some(0.6)).as_deref(), Some("60%"));
    }

    #[test]
    fn test_format_percent_keeps_meaningful_decimal() {
        assert_eq!(format_percent(Some(0.615)).as_deref(), Some("61.5%"));
    }

    #[test]
    fn test_format_percent_rejects_missing_and_nan() {
        assert_eq!(format_percent(None), None);
        assert_eq!(format_percent(Some(f64::NAN)), None);
    }

    #[test]
    fn test_readable_source() {
        assert_eq!(readable_source("hf_space"), "hf space");
        assert_eq!(readable_source("on-device"), "on device");
        assert_eq!(readable_source("local"), "local");
    }

    #[test]
    fn test_format_meal_date() {
        assert_eq!(format_meal_date("2026-08-26T12:00:00Z"), "Aug 26, 2026");
        assert_eq!(format_meal_date("2026-08-05"), "Aug 5, 2026");
        assert_eq!(format_meal_date("whenever"), "whenever");
    }
}
