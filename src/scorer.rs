// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ScreenParams;
use crate::dividends::{aggregate, normalize};
use crate::error::ScreenError;
use crate::models::{AssetReport, AssetType, DividendPayment, ValuationModel};
use crate::valuation::{evaluate, flat_yield_price, growth_adjusted_price};
use rust_decimal::Decimal;

const TRUST_KEYWORDS: [&str; 2] = ["real estate", "reit"];

/// Keyword classification of a business description.
pub fn classify(description: Option<&str>) -> AssetType {
    match description {
        None => AssetType::Unknown,
        Some(text) => {
            let lower = text.to_lowercase();
            if TRUST_KEYWORDS.iter().any(|k| lower.contains(k)) {
                AssetType::Trust
            } else {
                AssetType::Equity
            }
        }
    }
}

/// Anything that is not a plain equity is priced with the trust rate.
pub fn required_return_for(asset_type: AssetType, params: &ScreenParams) -> Decimal {
    match asset_type {
        AssetType::Equity => params.equity_required_return,
        AssetType::Trust | AssetType::Unknown => params.trust_required_return,
    }
}

/// Per-asset inputs gathered from the market-data collaborator.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub ticker: &'a str,
    pub ledger: &'a [DividendPayment],
    pub current_price: Decimal,
    pub description: Option<&'a str>,
    pub dividend_yield_fraction: Option<Decimal>,
}

/// Per-ticker data faults (values too large to sum or divide) are reported
/// as retrieval failures so the batch can skip the asset.
fn data_fault(ticker: &str, e: ScreenError) -> ScreenError {
    match e {
        ScreenError::InvalidArgument(msg) => ScreenError::retrieval(ticker, msg),
        other => other,
    }
}

/// Score one asset. `Ok(None)` means there is no dividend history to value,
/// which callers treat as a skip rather than a failure.
pub fn score(
    input: ScoreInput<'_>,
    params: &ScreenParams,
    as_of_year: i32,
) -> Result<Option<AssetReport>, ScreenError> {
    let corrupt = |e| data_fault(input.ticker, e);
    let overflow = |what: &str| ScreenError::retrieval(input.ticker, format!("{} overflows", what));

    let series = normalize(input.ledger).map_err(corrupt)?;
    if series.is_empty() {
        return Ok(None);
    }
    // Past this point every InvalidArgument comes from the data, not the run.
    params.validate()?;

    let asset_type = classify(input.description);
    let required_return = required_return_for(asset_type, params);
    let window = aggregate(&series, params.window_years, as_of_year).map_err(corrupt)?;

    let price = input.current_price;
    let gordon = growth_adjusted_price(window.average, required_return, params.growth_rate).map_err(corrupt)?;
    let bazin = flat_yield_price(window.average, required_return).map_err(corrupt)?;
    let dividend_yield = input
        .dividend_yield_fraction
        .unwrap_or(Decimal::ZERO)
        .checked_mul(price)
        .ok_or_else(|| overflow("dividend yield"))?;
    let growth_adjusted_margin = gordon.checked_sub(price).ok_or_else(|| overflow("margin"))?;
    let flat_yield_margin = bazin.checked_sub(price).ok_or_else(|| overflow("margin"))?;

    Ok(Some(AssetReport {
        ticker: input.ticker.to_string(),
        asset_type,
        current_price: price,
        growth_adjusted: evaluate(ValuationModel::GrowthAdjusted, gordon, price),
        flat_yield: evaluate(ValuationModel::FlatYield, bazin, price),
        growth_adjusted_margin,
        flat_yield_margin,
        required_return,
        growth_rate: params.growth_rate,
        window_years: params.window_years,
        years_with_data: window.years_with_data,
        total_dividends: window.total,
        average_dividend: window.average,
        dividend_yield,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Signal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ledger() -> Vec<DividendPayment> {
        [(2020, "1.00"), (2021, "1.10"), (2022, "1.20"), (2023, "1.30"), (2024, "1.40")]
            .iter()
            .map(|(y, a)| DividendPayment {
                date: NaiveDate::from_ymd_opt(*y, 8, 20).unwrap(),
                amount: dec(a),
            })
            .collect()
    }

    fn input<'a>(ledger: &'a [DividendPayment], price: &str, text: Option<&'a str>) -> ScoreInput<'a> {
        ScoreInput {
            ticker: "TAEE3.SA",
            ledger,
            current_price: dec(price),
            description: text,
            dividend_yield_fraction: None,
        }
    }

    #[test]
    fn classify_keywords_case_insensitively() {
        assert_eq!(classify(Some("A Real Estate investment fund")), AssetType::Trust);
        assert_eq!(classify(Some("Listed REIT owning malls")), AssetType::Trust);
        assert_eq!(classify(Some("Electric power transmission")), AssetType::Equity);
        assert_eq!(classify(Some("")), AssetType::Equity);
        assert_eq!(classify(None), AssetType::Unknown);
    }

    #[test]
    fn equity_uses_equity_rate_for_both_models() {
        let l = ledger();
        let report = score(input(&l, "15", Some("Utility company")), &ScreenParams::default(), 2025)
            .unwrap()
            .unwrap();
        assert_eq!(report.asset_type, AssetType::Equity);
        assert_eq!(report.required_return, dec("0.08"));
        assert_eq!(report.average_dividend, dec("1.20"));
        assert_eq!(report.total_dividends, dec("6.00"));
        assert_eq!(report.years_with_data, 5);
        assert_eq!(report.window_years, 5);
        assert_eq!(report.growth_adjusted.fair_price, dec("16"));
        assert_eq!(report.flat_yield.fair_price, dec("15"));
        assert_eq!(report.growth_adjusted.signal, Signal::Undervalued);
        // price == fair price is not a buy
        assert_eq!(report.flat_yield.signal, Signal::Overvalued);
        assert_eq!(report.growth_adjusted_margin, dec("1"));
        assert!(report.flat_yield_margin.is_zero());
    }

    #[test]
    fn trust_and_unknown_use_trust_rate() {
        let l = ledger();
        let params = ScreenParams::default();
        let trust = score(input(&l, "20", Some("A REIT")), &params, 2025).unwrap().unwrap();
        assert_eq!(trust.asset_type, AssetType::Trust);
        assert_eq!(trust.flat_yield.fair_price, dec("12"));
        assert_eq!(trust.flat_yield_margin, dec("-8"));
        assert_eq!(trust.flat_yield.signal, Signal::Overvalued);

        let unknown = score(input(&l, "20", None), &params, 2025).unwrap().unwrap();
        assert_eq!(unknown.asset_type, AssetType::Unknown);
        assert_eq!(unknown.required_return, dec("0.10"));
    }

    #[test]
    fn empty_ledger_is_skipped() {
        let out = score(input(&[], "10", Some("anything")), &ScreenParams::default(), 2025).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn history_only_in_current_year_scores_zero() {
        let l = vec![DividendPayment {
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            amount: dec("0.5"),
        }];
        let report = score(input(&l, "10", Some("x")), &ScreenParams::default(), 2025)
            .unwrap()
            .unwrap();
        assert_eq!(report.years_with_data, 0);
        assert!(report.growth_adjusted.fair_price.is_zero());
        assert!(report.flat_yield.fair_price.is_zero());
        assert_eq!(report.growth_adjusted.signal, Signal::Overvalued);
    }

    #[test]
    fn yield_figure_is_fraction_times_price() {
        let l = ledger();
        let mut i = input(&l, "40", Some("x"));
        i.dividend_yield_fraction = Some(dec("0.05"));
        let report = score(i, &ScreenParams::default(), 2025).unwrap().unwrap();
        assert_eq!(report.dividend_yield, dec("2"));

        let report = score(input(&l, "40", Some("x")), &ScreenParams::default(), 2025)
            .unwrap()
            .unwrap();
        assert!(report.dividend_yield.is_zero());
    }

    #[test]
    fn oversized_payments_are_a_retrieval_fault() {
        let l: Vec<_> = [2023, 2023]
            .iter()
            .map(|y| DividendPayment {
                date: NaiveDate::from_ymd_opt(*y, 4, 1).unwrap(),
                amount: Decimal::MAX,
            })
            .collect();
        let err = score(input(&l, "10", Some("x")), &ScreenParams::default(), 2025).unwrap_err();
        assert!(err.is_recoverable());

        // fits once, but not once divided by the rate spread
        let l = vec![DividendPayment {
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            amount: Decimal::MAX,
        }];
        let err = score(input(&l, "10", Some("x")), &ScreenParams::default(), 2025).unwrap_err();
        assert!(matches!(err, ScreenError::Retrieval { ref ticker, .. } if ticker == "TAEE3.SA"));
    }

    #[test]
    fn misconfigured_rates_are_an_error_not_a_skip() {
        let l = ledger();
        let mut params = ScreenParams::default();
        params.growth_rate = dec("0.09");
        let err = score(input(&l, "10", Some("x")), &params, 2025).unwrap_err();
        assert!(matches!(err, ScreenError::InvalidArgument(_)));
    }
}
