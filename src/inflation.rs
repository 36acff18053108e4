//! Compound inflation between calendar years

/// Factor taking an amount from `from_year` money to `to_year` money
pub fn inflation_factor(rate: f64, from_year: i32, to_year: i32) -> f64 {
    (1.0 + rate).powi(to_year - from_year)
}

/// Restate `amount` from `from_year` to `to_year`
pub fn restate(amount: f64, rate: f64, from_year: i32, to_year: i32) -> f64 {
    amount * inflation_factor(rate, from_year, to_year)
}
