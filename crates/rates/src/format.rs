//! Colombian-peso display formatting (`es-CO`: `.` groups thousands, `,` marks decimals).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format like `Number.prototype.toLocaleString("es-CO")`: at most three
/// fraction digits, half-way cases rounded away from zero, trailing zeros
/// dropped.
pub fn format_es_co(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    // `from_f64` keeps the shortest decimal that round-trips, so 1.0005 stays
    // a tie instead of becoming 1.000499999...
    let fixed = match Decimal::from_f64(value.abs()) {
        Some(d) => d
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        None => format!("{:.3}", value.abs()),
    };
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
