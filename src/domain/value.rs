// Cell value parsing - spreadsheet text to numbers

/// Placeholders the sheet uses for "no value yet"
const EMPTY_MARKERS: [&str; 2] = ["—", "--"];

/// Parse a spreadsheet cell into a number.
///
/// Accepts currency (`$1,234`), percentages (`55%`), thousands separators and
/// accounting-style negatives (`(2.5)`). Anything that leaves no digits behind
/// is treated as absent rather than an error.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() || EMPTY_MARKERS.contains(&trimmed) {
        return None;
    }

    let (body, negative) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };

    let residue = strip_to_numeric(body);
    if matches!(residue.as_str(), "" | "-" | "." | "-.") {
        return None;
    }

    let value = parse_leading_float(&residue)?;
    if !value.is_finite() {
        return None;
    }

    // Parenthesized values are negative no matter what sign survived stripping
    Some(if negative { -value.abs() } else { value })
}

/// Keep digits, dots and a minus sign in leading position
fn strip_to_numeric(body: &str) -> String {
    let mut residue = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '0'..='9' | '.' => residue.push(c),
            '-' if residue.is_empty() => residue.push(c),
            _ => {}
        }
    }
    residue
}

/// Parse the longest prefix that forms a decimal number, so `1.2.3` reads as `1.2`
fn parse_leading_float(residue: &str) -> Option<f64> {
    let bytes = residue.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    residue[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_with_separators() {
        assert_eq!(parse_number(Some("$1,234")), Some(1234.0));
        assert_eq!(parse_number(Some("  $12,345.50 ")), Some(12345.5));
    }

    #[test]
    fn test_parenthesized_negative() {
        assert_eq!(parse_number(Some("(2.5%)")), Some(-2.5));
        assert_eq!(parse_number(Some("($1,000)")), Some(-1000.0));
        // embedded minus does not flip it back
        assert_eq!(parse_number(Some("(-7)")), Some(-7.0));
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(parse_number(None), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("  ")), None);
        assert_eq!(parse_number(Some("—")), None);
        assert_eq!(parse_number(Some("--")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("$")), None);
        assert_eq!(parse_number(Some("-.")), None);
        assert_eq!(parse_number(Some("()")), None);
    }

    #[test]
    fn test_clean_integers_round_trip() {
        for n in [-250_i64, -1, 0, 1, 42, 1000, 987_654] {
            assert_eq!(parse_number(Some(&n.to_string())), Some(n as f64));
        }
    }

    #[test]
    fn test_parentheses_negate_currency() {
        for raw in ["0.5", "12", "1,234.75", "99"] {
            let plain = parse_number(Some(&format!("${raw}"))).unwrap();
            let wrapped = parse_number(Some(&format!("(${raw})"))).unwrap();
            assert_eq!(wrapped, -plain);
        }
    }

    #[test]
    fn test_stray_characters_are_dropped() {
        assert_eq!(parse_number(Some("55%")), Some(55.0));
        assert_eq!(parse_number(Some("-12 guests")), Some(-12.0));
        assert_eq!(parse_number(Some("1.2.3")), Some(1.2));
        assert_eq!(parse_number(Some("12-3")), Some(123.0));
        assert_eq!(parse_number(Some(".5")), Some(0.5));
    }
}
