//! Kwanza amounts for display.
//!
//! Money is stored as integer cêntimos; conversion to units happens only
//! here, with integer arithmetic, so formatting never rounds.

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_SYMBOL: &str = "Kz";

/// Formats minor units as `1 234 567,89 Kz` (pt-AO, non-breaking space
/// between groups).
pub fn format_currency(minor_units: i64) -> String {
    let negative = minor_units < 0;
    let magnitude = minor_units.unsigned_abs();
    let units = magnitude / 100;
    let cents = magnitude % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    format!(
        "{}{}{}{:02}{}{}",
        if negative { "-" } else { "" },
        grouped,
        DECIMAL_SEPARATOR,
        cents,
        GROUP_SEPARATOR,
        CURRENCY_SYMBOL
    )
}

/// Inverse of [`format_currency`]. Accepts plain or non-breaking spaces
/// and `.` as group separators, and an optional `Kz`/`AOA` marker.
pub fn parse_currency(input: &str) -> Result<i64, String> {
    let trimmed = input
        .trim()
        .trim_end_matches(CURRENCY_SYMBOL)
        .trim_end_matches("AOA")
        .trim();

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '.'))
        .collect();

    let (units, cents) = match cleaned.split_once(DECIMAL_SEPARATOR) {
        Some((units, cents)) => (units, cents),
        None => (cleaned.as_str(), "0"),
    };

    if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount: {}", input));
    }
    if cents.is_empty() || cents.len() > 2 || !cents.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid cents in amount: {}", input));
    }

    let units: i64 = units
        .parse()
        .map_err(|_| format!("Amount out of range: {}", input))?;
    let mut cents: i64 = cents
        .parse()
        .map_err(|_| format!("Invalid cents in amount: {}", input))?;
    if cleaned.split_once(DECIMAL_SEPARATOR).is_some_and(|(_, c)| c.len() == 1) {
        cents *= 10;
    }

    let total = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(|| format!("Amount out of range: {}", input))?;

    Ok(if negative { -total } else { total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0,00\u{a0}Kz");
        assert_eq!(format_currency(1), "0,01\u{a0}Kz");
        assert_eq!(format_currency(100), "1,00\u{a0}Kz");
        assert_eq!(format_currency(99_999), "999,99\u{a0}Kz");
        assert_eq!(format_currency(100_000), "1\u{a0}000,00\u{a0}Kz");
        assert_eq!(
            format_currency(123_456_789),
            "1\u{a0}234\u{a0}567,89\u{a0}Kz"
        );
        assert_eq!(format_currency(-150_050), "-1\u{a0}500,50\u{a0}Kz");
    }

    #[test]
    fn test_round_trip() {
        for amount in [0, 1, 100, 123_456_789, -42, 1_000_000_00, i64::MAX, i64::MIN + 1] {
            assert_eq!(parse_currency(&format_currency(amount)), Ok(amount));
        }
    }

    #[test]
    fn test_parse_accepts_hand_typed_input() {
        assert_eq!(parse_currency("1.234,5 Kz"), Ok(123_450));
        assert_eq!(parse_currency("1 234,56"), Ok(123_456));
        assert_eq!(parse_currency("15 000 AOA"), Ok(1_500_000));
        assert_eq!(parse_currency("- 3,00 Kz"), Ok(-300));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_currency("").is_err());
        assert!(parse_currency("Kz").is_err());
        assert!(parse_currency("12,345").is_err());
        assert!(parse_currency("abc,00").is_err());
        assert!(parse_currency("1,").is_err());
    }
}
