// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendPayment {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Calendar year -> summed payments. Years without payments are absent.
pub type AnnualDividendSeries = BTreeMap<i32, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowAggregate {
    pub total: Decimal,
    pub average: Decimal,
    pub years_with_data: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Equity,
    Trust,
    Unknown,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetType::Equity => "equity",
            AssetType::Trust => "trust",
            AssetType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationModel {
    /// Gordon growth: dividend / (required return - growth).
    GrowthAdjusted,
    /// Bazin: dividend / required return.
    FlatYield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Undervalued,
    Overvalued,
}

impl Signal {
    pub fn marker(&self) -> &'static str {
        match self {
            Signal::Undervalued => "BUY",
            Signal::Overvalued => "HOLD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub model: ValuationModel,
    pub fair_price: Decimal,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReport {
    pub ticker: String,
    pub asset_type: AssetType,
    pub current_price: Decimal,
    pub growth_adjusted: ValuationResult,
    pub flat_yield: ValuationResult,
    pub growth_adjusted_margin: Decimal,
    pub flat_yield_margin: Decimal,
    pub required_return: Decimal,
    pub growth_rate: Decimal,
    pub window_years: u32,
    pub years_with_data: u32,
    pub total_dividends: Decimal,
    pub average_dividend: Decimal,
    pub dividend_yield: Decimal,
}

/// Everything the market-data collaborator knows about one ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub ledger: Vec<DividendPayment>,
    pub current_price: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub description: Option<String>,
}
