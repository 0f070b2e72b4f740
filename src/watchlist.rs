// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::Path;

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9^][A-Za-z0-9.\-^=]*$").expect("valid ticker regex"));

// Header line older watch-lists carry above the tickers.
const NOTICE_PREFIX: &str = "ATENÇÃO";

pub const DEFAULT_WATCHLIST: &str = "\
# One TICKER;KIND per line. Brazilian tickers need the .SA suffix.
# KIND is informational (FII/trust or AÇÃO/equity); the screener classifies
# each asset from its business description.
KNCR11.SA;FII
GARE11.SA;FII
NEWL11.SA;FII
RZTR11.SA;FII
CPTS11.SA;FII
PORD11.SA;FII
MXRF11.SA;FII
VGHF11.SA;FII
BBSE3.SA;AÇÃO
TAEE3.SA;AÇÃO
KLBN4.SA;AÇÃO
ITSA3.SA;AÇÃO
BBDC4.SA;AÇÃO
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    pub ticker: String,
    pub kind: Option<String>,
}

pub fn is_valid_ticker(t: &str) -> bool {
    TICKER_RE.is_match(t)
}

/// Parse `TICKER;KIND` lines. Comments, blank lines and the legacy
/// `ATENÇÃO` notice line are ignored. Order and duplicates are kept.
pub fn parse<R: Read>(rdr: R) -> Result<Vec<WatchEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result.with_context(|| format!("Invalid watch-list line {}", i + 1))?;
        let ticker = rec.get(0).unwrap_or("");
        if ticker.is_empty() || ticker.starts_with(NOTICE_PREFIX) {
            continue;
        }
        if !is_valid_ticker(ticker) {
            warn!("Ignoring invalid ticker '{}' in watch-list", ticker);
            continue;
        }
        let kind = rec
            .get(1)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        out.push(WatchEntry {
            ticker: ticker.to_string(),
            kind,
        });
    }
    Ok(out)
}

pub fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, DEFAULT_WATCHLIST)
        .with_context(|| format!("Write watch-list {}", path.display()))?;
    info!("Wrote default watch-list to {}", path.display());
    Ok(true)
}

/// Read the watch-list, creating the default one when it does not exist.
pub fn load(path: &Path) -> Result<Vec<WatchEntry>> {
    write_default(path, false)?;
    let f = fs::File::open(path).with_context(|| format!("Open watch-list {}", path.display()))?;
    parse(f)
}

pub fn tickers(entries: &[WatchEntry]) -> Vec<String> {
    entries.iter().map(|e| e.ticker.clone()).collect()
}

pub fn add(path: &Path, ticker: &str, kind: Option<&str>) -> Result<()> {
    let ticker = ticker.trim().to_uppercase();
    if !is_valid_ticker(&ticker) {
        return Err(anyhow!("Invalid ticker '{}'", ticker));
    }
    let mut body = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("Read watch-list {}", path.display()))?
    } else {
        String::new()
    };
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    match kind.map(str::trim).filter(|k| !k.is_empty()) {
        Some(k) => body.push_str(&format!("{};{}\n", ticker, k)),
        None => body.push_str(&format!("{}\n", ticker)),
    }
    fs::write(path, body).with_context(|| format!("Write watch-list {}", path.display()))?;
    Ok(())
}

/// Drop every line for `ticker`; comments are left untouched.
pub fn remove(path: &Path, ticker: &str) -> Result<usize> {
    let body = fs::read_to_string(path).with_context(|| format!("Read watch-list {}", path.display()))?;
    let mut removed = 0;
    let kept: Vec<&str> = body
        .lines()
        .filter(|line| {
            let first = line.split(';').next().unwrap_or("").trim();
            let hit = !line.trim_start().starts_with('#') && first.eq_ignore_ascii_case(ticker.trim());
            if hit {
                removed += 1;
            }
            !hit
        })
        .collect();
    let mut out = kept.join("\n");
    out.push('\n');
    fs::write(path, out).with_context(|| format!("Write watch-list {}", path.display()))?;
    Ok(removed)
}
