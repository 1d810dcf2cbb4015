//! Discounting arithmetic.

use crate::types::Step;

/// Present value of a single payment made `discount_period` periods from now.
pub fn pv_single_payment(payment: f64, discount_rate: f64, discount_period: u64) -> f64 {
    payment / (1.0 + discount_rate).powf(discount_period as f64)
}

/// Costs are realised mid-cycle and discounted twice a year, so the cost
/// of annual step `k` falls in semi-annual period `2k + 1`.
pub fn half_cycle_period(step: Step) -> u64 {
    2 * step + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_leaves_payment_unchanged() {
        assert_eq!(pv_single_payment(75.0, 0.0, 13), 75.0);
    }

    #[test]
    fn discounts_by_compound_factor() {
        let pv = pv_single_payment(1_000.0, 0.025, 3);
        let expected = 1_000.0 / (1.025f64 * 1.025 * 1.025);
        assert!((pv - expected).abs() < 1e-9, "pv={pv} expected={expected}");
    }

    #[test]
    fn half_cycle_periods_are_odd() {
        assert_eq!(half_cycle_period(0), 1);
        assert_eq!(half_cycle_period(1), 3);
        assert_eq!(half_cycle_period(10), 21);
    }
}
