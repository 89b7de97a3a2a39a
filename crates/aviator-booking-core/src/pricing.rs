//! Lesson pricing and fee split
//!
//! The price is snapshotted from the tutor's hourly rate at booking time
//! and never recomputed. Rounding rule: `total_price` and `platform_fee`
//! round to 2 decimal places (midpoint away from zero); `tutor_payout` is
//! derived by subtraction, so `platform_fee + tutor_payout == total_price`
//! holds exactly in stored fields.

use rust_decimal::{Decimal, RoundingStrategy};

/// Pricing snapshot for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingBreakdown {
    /// Tutor's hourly rate at booking time
    pub price_per_hour: Decimal,
    /// `price_per_hour * duration_minutes / 60`, rounded to cents
    pub total_price: Decimal,
    /// `total_price * fee_percent / 100`, rounded to cents
    pub platform_fee: Decimal,
    /// `total_price - platform_fee`
    pub tutor_payout: Decimal,
}

/// Compute the pricing snapshot for a lesson
pub fn compute(price_per_hour: Decimal, duration_minutes: i32, fee_percent: Decimal) -> PricingBreakdown {
    let total_price = round_cents(
        price_per_hour * Decimal::from(duration_minutes) / Decimal::from(60),
    );
    let platform_fee = round_cents(total_price * fee_percent / Decimal::from(100));
    let tutor_payout = total_price - platform_fee;

    PricingBreakdown {
        price_per_hour,
        total_price,
        platform_fee,
        tutor_payout,
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_scenario() {
        // hourlyRate=60, duration=90, fee=15% -> 90.00 / 13.50 / 76.50
        let p = compute(dec!(60), 90, dec!(15));
        assert_eq!(p.total_price, dec!(90.00));
        assert_eq!(p.platform_fee, dec!(13.50));
        assert_eq!(p.tutor_payout, dec!(76.50));
    }

    #[test]
    fn test_split_is_exact() {
        let p = compute(dec!(47.99), 45, dec!(15));
        assert_eq!(p.platform_fee + p.tutor_payout, p.total_price);
    }

    #[test]
    fn test_awkward_rate_rounds_to_cents() {
        // 33.33/hr for 50 minutes = 27.775 -> 27.78
        let p = compute(dec!(33.33), 50, dec!(15));
        assert_eq!(p.total_price, dec!(27.78));
        assert_eq!(p.platform_fee + p.tutor_payout, p.total_price);
    }

    #[test]
    fn test_zero_fee_percent() {
        let p = compute(dec!(80), 60, dec!(0));
        assert_eq!(p.platform_fee, dec!(0.00));
        assert_eq!(p.tutor_payout, p.total_price);
    }
}
