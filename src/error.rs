// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the screening core.
///
/// `InvalidArgument` is a misconfigured run and always aborts. `Retrieval` is
/// scoped to a single ticker and is turned into a skip by the batch runner.
/// An asset without dividend history is not an error at all; the scorer
/// reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Retrieval failed for {ticker}: {message}")]
    Retrieval { ticker: String, message: String },
}

impl ScreenError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ScreenError::InvalidArgument(msg.into())
    }

    pub fn retrieval(ticker: &str, msg: impl ToString) -> Self {
        ScreenError::Retrieval {
            ticker: ticker.to_string(),
            message: msg.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScreenError::Retrieval { .. })
    }
}
