/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Shell style wildcard matching.
//!
//! The syntax follows `fnmatch(3)` without any escape character and without
//! special handling of `/` or leading dots:
//!
//! * `*` matches any sequence of characters, including the empty one
//! * `?` matches exactly one character
//! * `[seq]` matches any character in seq, `a-z` style ranges allowed
//! * `[!seq]` matches any character not in seq
//!
//! Matching is case-sensitive and always anchored to the whole string.

mod class;
mod pattern;

pub use pattern::FnMatchPattern;

/// Test whether `name` matches the shell style `pattern`.
///
/// The pattern is compiled on every call, use [`FnMatchPattern`] if the same
/// pattern should be checked against many names.
pub fn fnmatch(name: &str, pattern: &str) -> bool {
    FnMatchPattern::new(pattern).is_match(name)
}
