use std::fmt;

/// Amounts are floating-point currency units, matching the persisted wire
/// format (`"amount": 49.99`).
pub type Amount = f64;

/// Format an amount for display with two decimal places.
/// Example: 50.0 -> "50.00", 12.5 -> "12.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a user-supplied decimal string into an amount.
/// Accepts "50", "50.00", "12.5"; rejects empty, non-numeric, non-finite
/// and non-positive input.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: f64 = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ParseAmountError::NotPositive);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotPositive,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is required"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotPositive => write!(f, "amount must be a positive number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
