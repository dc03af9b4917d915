/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ResolveError {
    #[error("invalid ip address: {0}")]
    InvalidAddress(String),
    #[error("lookup failed with code {code}: {reason}")]
    Lookup { code: i32, reason: String },
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ResolveError {
    pub fn get_type(&self) -> &str {
        match self {
            ResolveError::InvalidAddress(_) => "InvalidAddress",
            ResolveError::Lookup { .. } => "LookupFailed",
            ResolveError::Unexpected(_) => "UnexpectedError",
        }
    }
}
