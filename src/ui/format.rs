//! Value formatters for prices, changes, market caps, volumes and times.
//!
//! Every formatter takes an `Option<f64>` (or a timestamp) and renders a
//! missing or non-numeric value as a muted placeholder rather than failing.

use chrono::DateTime;

use super::theme::{Intent, Theme};

/// Placeholder for values that were never provided.
pub const MISSING: &str = "—";

/// Placeholder for values that were provided but are not numbers.
pub const NOT_AVAILABLE: &str = "N/A";

fn finite(n: Option<f64>) -> Option<f64> {
    n.filter(|v| v.is_finite())
}

/// `1234567.891` with 2 decimals → `1,234,567.89`.
pub fn group_thousands(n: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(formatted.len() + digits / 3 + 1);
    if n < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with precision that follows magnitude.
///
/// Billions and millions are abbreviated, thousands are grouped, and
/// sub-cent amounts switch to scientific notation.
pub fn price_text(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();
    let body = if abs >= 1e9 {
        format!("{:.2}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", abs / 1e6)
    } else if abs >= 1_000.0 {
        group_thousands(abs, 2)
    } else if abs >= 1.0 {
        format!("{abs:.4}")
    } else if abs >= 0.01 {
        format!("{abs:.6}")
    } else if abs == 0.0 {
        "0.00".to_string()
    } else {
        format!("{abs:.4e}")
    };
    format!("{sign}${body}")
}

pub fn fmt_price(n: Option<f64>, theme: &Theme) -> String {
    match finite(n) {
        Some(v) => theme.paint(Intent::Price, price_text(v)),
        None => theme.paint(Intent::Muted, NOT_AVAILABLE),
    }
}

/// Signed percentage; moves beyond ±10% get the strong colors.
pub fn fmt_change(pct: Option<f64>, theme: &Theme) -> String {
    let Some(v) = finite(pct) else {
        return theme.paint(Intent::Muted, NOT_AVAILABLE);
    };
    let text = format!("{}{v:.2}%", if v >= 0.0 { "+" } else { "" });
    let intent = if v > 10.0 {
        Intent::StrongPositive
    } else if v > 0.0 {
        Intent::Positive
    } else if v < -10.0 {
        Intent::StrongNegative
    } else if v < 0.0 {
        Intent::Negative
    } else {
        Intent::Muted
    };
    theme.paint(intent, text)
}

/// Dollar amount with B/M/K suffixes; whole dollars below 1,000.
fn abbreviate(v: f64, with_billions: bool) -> String {
    if with_billions && v >= 1e9 {
        format!("${:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("${:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("${:.1}K", v / 1e3)
    } else {
        format!("${v:.0}")
    }
}

/// Market capitalisation; zero is treated as unknown.
pub fn fmt_mcap(n: Option<f64>, theme: &Theme) -> String {
    match finite(n).filter(|v| *v != 0.0) {
        Some(v) => theme.paint(Intent::MarketCap, abbreviate(v, true)),
        None => theme.paint(Intent::Muted, MISSING),
    }
}

/// Traded volume; zero is treated as unknown.
pub fn fmt_vol(n: Option<f64>, theme: &Theme) -> String {
    match finite(n).filter(|v| *v != 0.0) {
        Some(v) => theme.paint(Intent::Volume, abbreviate(v, false)),
        None => theme.paint(Intent::Muted, MISSING),
    }
}

/// Plain `HH:MM:SS` (UTC) for a millisecond timestamp.
pub fn time_text(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Plain `Mon D` (UTC) for a second timestamp.
pub fn date_text(timestamp_secs: i64) -> String {
    DateTime::from_timestamp(timestamp_secs, 0)
        .map(|t| t.format("%b %-d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn fmt_time(timestamp_ms: i64, theme: &Theme) -> String {
    theme.paint(Intent::Muted, time_text(timestamp_ms))
}

pub fn fmt_date(timestamp_secs: i64, theme: &Theme) -> String {
    theme.paint(Intent::Muted, date_text(timestamp_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tiers() {
        assert_eq!(price_text(2_500_000_000.0), "$2.50B");
        assert_eq!(price_text(3_140_000.0), "$3.14M");
        assert_eq!(price_text(50_000.0), "$50,000.00");
        assert_eq!(price_text(100.0), "$100.0000");
        assert_eq!(price_text(0.1), "$0.100000");
        assert_eq!(price_text(0.000012345), "$1.2345e-5");
        assert_eq!(price_text(0.0), "$0.00");
        assert_eq!(price_text(-12.5), "-$12.5000");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1000.0, 0), "1,000");
        assert_eq!(group_thousands(-4321.0, 1), "-4,321.0");
        assert_eq!(group_thousands(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_missing_values_are_placeholders() {
        let theme = Theme::plain();
        assert_eq!(fmt_price(None, &theme), "N/A");
        assert_eq!(fmt_price(Some(f64::NAN), &theme), "N/A");
        assert_eq!(fmt_change(None, &theme), "N/A");
        assert_eq!(fmt_mcap(Some(0.0), &theme), "—");
        assert_eq!(fmt_vol(None, &theme), "—");
    }

    #[test]
    fn test_change_sign_and_color() {
        let theme = Theme::dark();
        assert_eq!(fmt_change(Some(3.456), &Theme::plain()), "+3.46%");
        assert_eq!(fmt_change(Some(-0.5), &Theme::plain()), "-0.50%");
        assert_eq!(
            fmt_change(Some(25.0), &theme),
            theme.paint(Intent::StrongPositive, "+25.00%")
        );
        assert_eq!(
            fmt_change(Some(-12.0), &theme),
            theme.paint(Intent::StrongNegative, "-12.00%")
        );
        assert_eq!(fmt_change(Some(0.0), &theme), theme.paint(Intent::Muted, "+0.00%"));
    }

    #[test]
    fn test_abbreviations() {
        let theme = Theme::plain();
        assert_eq!(fmt_mcap(Some(4_200_000_000.0), &theme), "$4.20B");
        assert_eq!(fmt_mcap(Some(12_300.0), &theme), "$12.3K");
        assert_eq!(fmt_vol(Some(4_200_000_000.0), &theme), "$4200.00M");
        assert_eq!(fmt_vol(Some(512.0), &theme), "$512");
    }

    #[test]
    fn test_time_and_date_text() {
        // 2024-01-05 13:45:10 UTC
        assert_eq!(time_text(1_704_462_310_000), "13:45:10");
        assert_eq!(date_text(1_704_462_310), "Jan 5");
    }
}
