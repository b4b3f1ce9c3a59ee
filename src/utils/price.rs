// Largest amount a single line or declared value may reach.
pub const MAX_AMOUNT: f64 = 1e12;

pub fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn calculate_rate_price(billable_amount: f64, rate: f64) -> f64 {
    round_amount(billable_amount * rate)
}

pub fn calculate_unit_price(unit_price: f64, quantity: u32, repeat_count: u32) -> f64 {
    round_amount(unit_price * quantity as f64 * repeat_count as f64)
}

pub fn calculate_premium(declared_value: f64, rate: f64) -> f64 {
    round_amount(declared_value * rate)
}
