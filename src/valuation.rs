// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ScreenError;
use crate::models::{Signal, ValuationModel, ValuationResult};
use rust_decimal::Decimal;

/// Gordon growth fair price: `avg_dividend / (required_return - growth_rate)`.
pub fn growth_adjusted_price(
    avg_dividend: Decimal,
    required_return: Decimal,
    growth_rate: Decimal,
) -> Result<Decimal, ScreenError> {
    if required_return <= growth_rate {
        return Err(ScreenError::invalid(format!(
            "required return {} must exceed growth rate {}",
            required_return, growth_rate
        )));
    }
    let spread = required_return - growth_rate;
    avg_dividend
        .checked_div(spread)
        .ok_or_else(|| ScreenError::invalid(format!("cannot divide {} by {}", avg_dividend, spread)))
}

/// Bazin fair price: `avg_dividend / required_return`.
pub fn flat_yield_price(
    avg_dividend: Decimal,
    required_return: Decimal,
) -> Result<Decimal, ScreenError> {
    if required_return <= Decimal::ZERO {
        return Err(ScreenError::invalid(format!(
            "required return {} must be positive",
            required_return
        )));
    }
    avg_dividend.checked_div(required_return).ok_or_else(|| {
        ScreenError::invalid(format!("cannot divide {} by {}", avg_dividend, required_return))
    })
}

// Strict: a price sitting exactly on the fair price is not a buy.
pub fn signal_for(current_price: Decimal, fair_price: Decimal) -> Signal {
    if current_price < fair_price {
        Signal::Undervalued
    } else {
        Signal::Overvalued
    }
}

pub fn evaluate(model: ValuationModel, fair_price: Decimal, current_price: Decimal) -> ValuationResult {
    ValuationResult {
        model,
        fair_price,
        signal: signal_for(current_price, fair_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn growth_adjusted_reference_value() {
        let p = growth_adjusted_price(dec("1.20"), dec("0.08"), dec("0.005")).unwrap();
        assert_eq!(p, dec("16"));
        assert_eq!(format!("{:.2}", p), "16.00");
    }

    #[test]
    fn flat_yield_reference_value() {
        let p = flat_yield_price(dec("1.20"), dec("0.10")).unwrap();
        assert_eq!(p, dec("12"));
    }

    #[test]
    fn flat_yield_is_plain_division() {
        for (d, r) in [("3.3", "0.07"), ("0.01", "0.5"), ("120", "0.125")] {
            let (d, r) = (dec(d), dec(r));
            assert_eq!(flat_yield_price(d, r).unwrap(), d / r);
        }
    }

    #[test]
    fn zero_dividend_prices_at_zero() {
        assert!(growth_adjusted_price(Decimal::ZERO, dec("0.08"), dec("0.005")).unwrap().is_zero());
        assert!(flat_yield_price(Decimal::ZERO, dec("0.10")).unwrap().is_zero());
    }

    #[test]
    fn growth_adjusted_rejects_return_not_above_growth() {
        for (r, g) in [("0.05", "0.05"), ("0.04", "0.05"), ("0", "0"), ("-0.01", "0.02")] {
            let err = growth_adjusted_price(dec("1"), dec(r), dec(g)).unwrap_err();
            assert!(matches!(err, ScreenError::InvalidArgument(_)), "r={} g={}", r, g);
        }
    }

    #[test]
    fn flat_yield_rejects_non_positive_return() {
        assert!(flat_yield_price(dec("1"), Decimal::ZERO).is_err());
        assert!(flat_yield_price(dec("1"), dec("-0.1")).is_err());
    }

    #[test]
    fn growth_adjusted_increases_with_dividend_and_growth() {
        let r = dec("0.08");
        let low = growth_adjusted_price(dec("1.00"), r, dec("0.01")).unwrap();
        let more_div = growth_adjusted_price(dec("1.01"), r, dec("0.01")).unwrap();
        let more_growth = growth_adjusted_price(dec("1.00"), r, dec("0.02")).unwrap();
        assert!(more_div > low);
        assert!(more_growth > low);
    }

    #[test]
    fn signal_boundary_is_overvalued() {
        assert_eq!(signal_for(dec("16.00"), dec("16")), Signal::Overvalued);
        assert_eq!(signal_for(dec("15.99"), dec("16")), Signal::Undervalued);
        assert_eq!(signal_for(dec("16.01"), dec("16")), Signal::Overvalued);
    }
}
