use std::fmt;

/// Money is represented as integer cents so policy boundaries compare exactly.
/// 1 unit = 100 cents, so $500.00 = 50000 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string.
/// Example: 50000 -> "500.00", -40000 -> "-400.00"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents with a dollar sign, keeping the sign in front.
/// Example: 100000 -> "$1000.00", -40000 -> "-$400.00"
pub fn format_money(cents: Cents) -> String {
    let plain = format_cents(cents);
    match plain.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", plain),
    }
}

/// Parse a decimal string into cents.
/// Example: "500" -> 50000, "12.5" -> 1250, "-50.00" -> -5000
///
/// Negative values parse successfully; rejecting them is a validation concern.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim().trim_start_matches('$');
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start_matches('$')),
        None => (false, input),
    };

    if digits.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }

    let (units_str, fraction_str) = match digits.split_once('.') {
        Some((units, fraction)) => (units, fraction),
        None => (digits, ""),
    };

    if fraction_str.contains('.') {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        parse_digits(units_str)?
    };

    // Pad a single digit ("5" -> 50 cents), truncate beyond two places
    let fraction: i64 = match fraction_str.len() {
        0 => 0,
        1 => parse_digits(fraction_str)? * 10,
        _ => parse_digits(&fraction_str[..2])?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or(ParseCentsError::OutOfRange)?;
    Ok(if negative { -cents } else { cents })
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::OutOfRange)
}

/// Apply a percentage rate to an amount, rounding to the nearest cent.
/// Example: percent_of(100000, 3.5) -> 3500
pub fn percent_of(cents: Cents, rate_percent: f64) -> Cents {
    (cents as f64 * rate_percent / 100.0).round() as Cents
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
