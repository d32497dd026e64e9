//! Level-payment mortgage amortization.

pub const TERM_MONTHS: i32 = 30 * 12;

pub const MIN_RATE: f64 = 0.03;
pub const MAX_RATE: f64 = 0.10;

/// Rate shift per credit point below 750 (above 750 lowers the rate).
pub const CREDIT_RATE_ADJUSTMENT: f64 = 0.0001;
pub const CREDIT_BASELINE: f64 = 750.0;

pub fn credit_adjustment(credit_score: f64) -> f64 {
    (CREDIT_BASELINE - credit_score) * CREDIT_RATE_ADJUSTMENT
}

/// M = L·r·(1+r)^n / ((1+r)^n − 1) with r = annual_rate / 12.
/// Falls back to straight-line L / n when the monthly rate is zero.
pub fn monthly_payment(loan_amount: f64, annual_rate: f64) -> f64 {
    let r = annual_rate / 12.0;
    if r > 0.0 {
        let growth = (1.0 + r).powi(TERM_MONTHS);
        loan_amount * (r * growth) / (growth - 1.0)
    } else {
        loan_amount / TERM_MONTHS as f64
    }
}

/// Applies one payment; returns the new balance.
pub fn amortize_month(balance: f64, annual_rate: f64, payment: f64) -> f64 {
    let interest = balance * (annual_rate / 12.0);
    let principal = payment - interest;
    balance - principal
}
