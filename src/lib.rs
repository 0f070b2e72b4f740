// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dividends;
pub mod error;
pub mod market;
pub mod models;
pub mod scorer;
pub mod utils;
pub mod valuation;
pub mod watchlist;
