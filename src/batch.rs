// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ScreenParams;
use crate::error::ScreenError;
use crate::models::{AssetReport, MarketSnapshot};
use crate::scorer::{ScoreInput, score};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;

/// Source of per-ticker market data. Implemented by the Yahoo client and by
/// any `Fn(&str) -> Result<MarketSnapshot, ScreenError>`.
pub trait MarketDataSource {
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, ScreenError>;
}

impl<F> MarketDataSource for F
where
    F: Fn(&str) -> Result<MarketSnapshot, ScreenError>,
{
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, ScreenError> {
        self(ticker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    NoDividendHistory,
    RetrievalFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTicker {
    pub ticker: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// In ticker-list order.
    pub reports: Vec<AssetReport>,
    pub skipped: Vec<SkippedTicker>,
}

impl BatchOutcome {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Score every ticker in order, one at a time. Retrieval failures and empty
/// histories become skips; an invalid configuration aborts the run.
pub fn run<S: MarketDataSource + ?Sized>(
    tickers: &[String],
    source: &S,
    params: &ScreenParams,
    as_of_year: i32,
) -> Result<BatchOutcome, ScreenError> {
    params.validate()?;

    let mut outcome = BatchOutcome::default();
    let total = tickers.len();
    for (i, ticker) in tickers.iter().enumerate() {
        info!("[{}/{}] analysing {}", i + 1, total, ticker);

        let snapshot = match source.fetch(ticker) {
            Ok(s) => s,
            Err(ScreenError::InvalidArgument(msg)) => {
                return Err(ScreenError::InvalidArgument(msg));
            }
            Err(e) => {
                warn!("Skipping {}: {}", ticker, e);
                outcome.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::RetrievalFailed(e.to_string()),
                });
                continue;
            }
        };

        let input = ScoreInput {
            ticker,
            ledger: &snapshot.ledger,
            current_price: snapshot.current_price.unwrap_or(Decimal::ZERO),
            description: snapshot.description.as_deref(),
            dividend_yield_fraction: snapshot.dividend_yield,
        };
        match score(input, params, as_of_year) {
            Ok(Some(report)) => outcome.reports.push(report),
            Err(e) if e.is_recoverable() => {
                warn!("Skipping {}: {}", ticker, e);
                outcome.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::RetrievalFailed(e.to_string()),
                });
            }
            Err(e) => return Err(e),
            Ok(None) => {
                info!("No dividend history for {}, skipping", ticker);
                outcome.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::NoDividendHistory,
                });
            }
        }
    }

    info!(
        "Analysed {} tickers: {} scored, {} skipped",
        total,
        outcome.reports.len(),
        outcome.skipped_count()
    );
    Ok(outcome)
}
