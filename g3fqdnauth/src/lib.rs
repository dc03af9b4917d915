/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

pub mod config;
pub mod log;
pub mod opts;
pub mod plugin;
pub mod policy;
pub mod resolve;

mod build;
mod verdict;

pub use plugin::{AuthorizeRequest, FqdnAuthPlugin};
pub use verdict::Verdict;
