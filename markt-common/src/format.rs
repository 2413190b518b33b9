//! German-locale display formatting
//!
//! Consistent value rendering for listing fields across all markt consumers.
//! Unset values render as an em dash, matching the dashboard's empty-value
//! convention.

use chrono::{DateTime, Utc};

/// Placeholder shown for unset values
const UNSET: &str = "—";

/// Format a timestamp as `dd.MM.yyyy`
pub fn format_date(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.format("%d.%m.%Y").to_string(),
        None => UNSET.to_string(),
    }
}

/// Format a EUR amount in de-DE style: `1.234,56 €`
///
/// Dot-grouped thousands, comma decimals, trailing euro sign. Negative
/// amounts keep the sign ahead of the number.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(amount) = value else {
        return UNSET.to_string();
    };

    let cents = (amount.abs() * 100.0).round() as u64;
    let euros = (cents / 100).to_string();
    let rest = cents % 100;

    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
    for (i, digit) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, grouped, rest)
}
