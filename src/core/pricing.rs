use crate::models::PredictionResult;

// Absorbs float noise from exp_m1 so that ln(1 + n) maps back to exactly n.
const PRICE_EPSILON: f64 = 1e-6;

/// Convert a raw model output from log-fare space to whole rupees
///
/// The model predicts `ln(1 + price)`. The recovered fare is truncated toward
/// zero and clamped at 0. Returns `None` for non-finite outputs.
pub fn inverse_log_fare(log_price: f64) -> Option<PredictionResult> {
    if !log_price.is_finite() {
        return None;
    }

    let fare = log_price.exp_m1();
    if !fare.is_finite() || fare > u64::MAX as f64 {
        return None;
    }

    let price = (fare + PRICE_EPSILON).trunc().max(0.0) as u64;
    Some(PredictionResult { log_price, price })
}

/// Render an amount the way the form shows it, e.g. `₹12,345`
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{}", grouped)
}
