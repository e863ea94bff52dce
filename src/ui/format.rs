// ---------------------------------------------------------------------------
// Display formatting for raw engine values
// ---------------------------------------------------------------------------

/// `150000.0` → `"$150,000.00"`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let cents = (value * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs() as u128;

    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_rounds() {
        assert_eq!(format_usd(150000.0), "$150,000.00");
        assert_eq!(format_usd(1234.567), "$1,234.57");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(1_000_000_000.0), "$1,000,000,000.00");
    }

    #[test]
    fn negative_and_non_finite() {
        assert_eq!(format_usd(-1500.0), "-$1,500.00");
        assert_eq!(format_usd(f64::NAN), "n/a");
    }
}
