// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fairclip::config::{ScreenParams, load_from};
use fairclip::{cli, commands::config};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tempfile::tempdir;

fn run(path: &Path, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["fairclip", "config"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("config", sub)) => config::handle(path, sub),
        _ => panic!("no config subcommand"),
    }
}

#[test]
fn config_set_persists_and_reset_restores_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    run(&path, &["set", "trust_required_return", "0.12"]).unwrap();
    run(&path, &["set", "window_years", "10"]).unwrap();
    let params = load_from(&path).unwrap();
    assert_eq!(params.trust_required_return, Decimal::from_str("0.12").unwrap());
    assert_eq!(params.window_years, 10);
    assert_eq!(params.equity_required_return, ScreenParams::default().equity_required_return);

    run(&path, &["show"]).unwrap();
    run(&path, &["reset"]).unwrap();
    assert_eq!(load_from(&path).unwrap(), ScreenParams::default());
}

#[test]
fn config_set_refuses_growth_above_returns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    assert!(run(&path, &["set", "growth_rate", "0.09"]).is_err());
    assert!(run(&path, &["set", "window_years", "0"]).is_err());
    assert!(run(&path, &["set", "nonsense", "1"]).is_err());
    assert!(!path.exists());
}
