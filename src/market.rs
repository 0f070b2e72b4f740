// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Yahoo Finance market data.
//!
//! Dividends come from the chart endpoint (`events=div`); price, yield and
//! the business description come from `quoteSummary`. Parsing is kept apart
//! from HTTP so the payload handling can be tested offline.

use crate::batch::MarketDataSource;
use crate::error::ScreenError;
use crate::models::{DividendPayment, MarketSnapshot};
use crate::utils::http_client;
use chrono::{DateTime, NaiveDate};
use log::debug;
use once_cell::unsync::OnceCell;
use reqwest::header;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, ChartDividend>,
}

#[derive(Debug, Deserialize)]
struct ChartDividend {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    price: Option<SummaryPrice>,
    summary_detail: Option<SummaryDetail>,
    summary_profile: Option<SummaryProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPrice {
    regular_market_price: Option<RawValue>,
}

// Yahoo sends `{}` when a figure is not available.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryProfile {
    long_business_summary: Option<String>,
    description: Option<String>,
}

/// Dividend ledger plus the chart's own last price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartData {
    pub ledger: Vec<DividendPayment>,
    pub last_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteData {
    pub current_price: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub description: Option<String>,
}

fn yahoo_error(ticker: &str, err: &YahooError) -> ScreenError {
    ScreenError::retrieval(
        ticker,
        format!(
            "{}: {}",
            err.code.as_deref().unwrap_or("error"),
            err.description.as_deref().unwrap_or("no description")
        ),
    )
}

fn to_decimal(v: f64) -> Option<Decimal> {
    Decimal::try_from(v).ok()
}

/// Payment dates are shifted by the exchange's GMT offset so each payment
/// keeps the calendar date it had on its own market.
fn payment_date(ticker: &str, ts: i64, gmtoffset: i64) -> Result<NaiveDate, ScreenError> {
    DateTime::from_timestamp(ts + gmtoffset, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ScreenError::retrieval(ticker, format!("invalid dividend timestamp {}", ts)))
}

pub fn parse_chart(ticker: &str, body: &str) -> Result<ChartData, ScreenError> {
    let resp: ChartResponse = serde_json::from_str(body)
        .map_err(|e| ScreenError::retrieval(ticker, format!("malformed chart payload: {}", e)))?;
    if let Some(err) = resp.chart.error.as_ref() {
        return Err(yahoo_error(ticker, err));
    }
    let result = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ScreenError::retrieval(ticker, "no chart data"))?;

    let gmtoffset = result.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);
    let last_price = result
        .meta
        .as_ref()
        .and_then(|m| m.regular_market_price)
        .and_then(to_decimal);

    let mut ledger = Vec::new();
    if let Some(events) = result.events {
        for div in events.dividends.into_values() {
            let amount = to_decimal(div.amount).ok_or_else(|| {
                ScreenError::retrieval(ticker, format!("invalid dividend amount {}", div.amount))
            })?;
            if amount.is_sign_negative() {
                return Err(ScreenError::retrieval(
                    ticker,
                    format!("negative dividend amount {}", amount),
                ));
            }
            ledger.push(DividendPayment {
                date: payment_date(ticker, div.date, gmtoffset)?,
                amount,
            });
        }
    }
    ledger.sort_by_key(|p| p.date);
    Ok(ChartData { ledger, last_price })
}

pub fn parse_summary(ticker: &str, body: &str) -> Result<QuoteData, ScreenError> {
    let resp: SummaryResponse = serde_json::from_str(body)
        .map_err(|e| ScreenError::retrieval(ticker, format!("malformed quote payload: {}", e)))?;
    if let Some(err) = resp.quote_summary.error.as_ref() {
        return Err(yahoo_error(ticker, err));
    }
    let result = resp
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ScreenError::retrieval(ticker, "no quote data"))?;

    let current_price = result
        .price
        .and_then(|p| p.regular_market_price)
        .and_then(|v| v.raw)
        .and_then(to_decimal);
    let dividend_yield = result
        .summary_detail
        .and_then(|d| d.dividend_yield)
        .and_then(|v| v.raw)
        .and_then(to_decimal);
    let description = result
        .summary_profile
        .and_then(|p| p.long_business_summary.or(p.description))
        .filter(|s| !s.trim().is_empty());

    Ok(QuoteData {
        current_price,
        dividend_yield,
        description,
    })
}

#[derive(Debug, Clone)]
struct Crumb {
    cookie: String,
    crumb: String,
}

/// Blocking Yahoo client. The crumb is fetched once per client.
pub struct YahooClient {
    client: reqwest::blocking::Client,
    crumb: OnceCell<Crumb>,
}

impl YahooClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            crumb: OnceCell::new(),
        })
    }

    fn crumb(&self, ticker: &str) -> Result<&Crumb, ScreenError> {
        self.crumb.get_or_try_init(|| {
            let resp = self
                .client
                .get("https://fc.yahoo.com")
                .send()
                .map_err(|e| ScreenError::retrieval(ticker, format!("cookie request failed: {}", e)))?;
            let cookie = resp
                .headers()
                .get(header::SET_COOKIE)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
                .ok_or_else(|| ScreenError::retrieval(ticker, "no Yahoo cookie"))?;
            let crumb = self
                .client
                .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
                .header(header::COOKIE, &cookie)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
                .map_err(|e| ScreenError::retrieval(ticker, format!("crumb request failed: {}", e)))?;
            debug!("Obtained Yahoo crumb");
            Ok(Crumb { cookie, crumb })
        })
    }

    fn get_text(&self, ticker: &str, url: &str, cookie: Option<&str>) -> Result<String, ScreenError> {
        let mut req = self.client.get(url);
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        req.send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| ScreenError::retrieval(ticker, e))
    }

    pub fn chart(&self, ticker: &str) -> Result<ChartData, ScreenError> {
        let url = format!("{}/{}?range=max&interval=1mo&events=div", CHART_URL, ticker);
        let body = self.get_text(ticker, &url, None)?;
        parse_chart(ticker, &body)
    }

    pub fn quote(&self, ticker: &str) -> Result<QuoteData, ScreenError> {
        let crumb = self.crumb(ticker)?;
        let url = format!(
            "{}/{}?modules=price,summaryDetail,summaryProfile&crumb={}",
            SUMMARY_URL, ticker, crumb.crumb
        );
        let body = self.get_text(ticker, &url, Some(&crumb.cookie))?;
        parse_summary(ticker, &body)
    }
}

impl MarketDataSource for YahooClient {
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot, ScreenError> {
        let chart = self.chart(ticker)?;
        // No dividends means no valuation; skip the second request.
        if chart.ledger.is_empty() {
            return Ok(MarketSnapshot {
                current_price: chart.last_price,
                ..MarketSnapshot::default()
            });
        }
        let quote = self.quote(ticker)?;
        Ok(MarketSnapshot {
            ledger: chart.ledger,
            current_price: quote.current_price.or(chart.last_price),
            dividend_yield: quote.dividend_yield,
            description: quote.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "BRL", "symbol": "TAEE3.SA", "regularMarketPrice": 12.34, "gmtoffset": -10800},
                "events": {
                    "dividends": {
                        "1703592000": {"amount": 0.5, "date": 1703592000},
                        "1672574400": {"amount": 0.25, "date": 1672574400},
                        "1704078000": {"amount": 0.1, "date": 1704078000}
                    }
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parse_chart_builds_sorted_ledger_in_exchange_time() {
        let data = parse_chart("TAEE3.SA", CHART).unwrap();
        assert_eq!(data.last_price, Some(Decimal::from_str("12.34").unwrap()));
        let dates: Vec<_> = data.ledger.iter().map(|p| p.date.to_string()).collect();
        // 1704078000 is 2024-01-01 03:00 UTC, still 2024-01-01 at -03:00
        assert_eq!(dates, vec!["2023-01-01", "2023-12-26", "2024-01-01"]);
        assert_eq!(data.ledger[0].amount, Decimal::from_str("0.25").unwrap());
    }

    #[test]
    fn parse_chart_without_events_has_empty_ledger() {
        let body = r#"{"chart":{"result":[{"meta":{"regularMarketPrice":10.0}}],"error":null}}"#;
        let data = parse_chart("X", body).unwrap();
        assert!(data.ledger.is_empty());
    }

    #[test]
    fn parse_chart_reports_yahoo_errors() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("GONE", body).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("symbol may be delisted"));
    }

    #[test]
    fn parse_chart_rejects_garbage() {
        assert!(matches!(
            parse_chart("X", "<html>"),
            Err(ScreenError::Retrieval { .. })
        ));
    }

    #[test]
    fn parse_summary_reads_price_yield_and_description() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {"regularMarketPrice": {"raw": 33.5, "fmt": "33.50"}},
                    "summaryDetail": {"dividendYield": {"raw": 0.0812, "fmt": "8.12%"}},
                    "summaryProfile": {"longBusinessSummary": "A real estate fund."}
                }],
                "error": null
            }
        }"#;
        let q = parse_summary("KNCR11.SA", body).unwrap();
        assert_eq!(q.current_price, Some(Decimal::from_str("33.5").unwrap()));
        assert_eq!(q.dividend_yield, Some(Decimal::from_str("0.0812").unwrap()));
        assert_eq!(q.description.as_deref(), Some("A real estate fund."));
    }

    #[test]
    fn parse_summary_falls_back_to_profile_description() {
        let body = r#"{
            "quoteSummary": {
                "result": [{"summaryProfile": {"description": "Listed REIT"}}],
                "error": null
            }
        }"#;
        let q = parse_summary("O", body).unwrap();
        assert_eq!(q.description.as_deref(), Some("Listed REIT"));
    }

    #[test]
    fn parse_summary_tolerates_empty_figures() {
        let body = r#"{
            "quoteSummary": {
                "result": [{"price": {"regularMarketPrice": {}}, "summaryDetail": {"dividendYield": {}}}],
                "error": null
            }
        }"#;
        let q = parse_summary("X", body).unwrap();
        assert_eq!(q, QuoteData::default());
    }
}
