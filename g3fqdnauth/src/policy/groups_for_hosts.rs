/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::debug;

use g3_fnmatch::FnMatchPattern;

use super::split_entry;

/// Groups allowed for each host pattern, in config order.
#[derive(Clone, Debug, Default)]
pub struct GroupsForHostsRule {
    inner: Vec<(FnMatchPattern, Vec<String>)>,
}

impl GroupsForHostsRule {
    /// Append a host pattern with the groups from the raw config value.
    pub fn add_host(&mut self, pattern: &str, raw_groups: &str) {
        let groups = split_entry(raw_groups).map(|s| s.to_string()).collect();
        self.inner.push((FnMatchPattern::new(pattern), groups));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the groups of the first pattern that matches `host`.
    ///
    /// Later patterns that also match are not merged in.
    pub fn groups_for_host(&self, host: &str) -> &[String] {
        self.inner
            .iter()
            .find(|(pattern, _)| pattern.is_match(host))
            .map(|(_, groups)| groups.as_slice())
            .unwrap_or_default()
    }

    /// Check if any of `hosts` allows one of `groups`.
    ///
    /// Sessions without group info are never allowed here.
    pub fn check(&self, hosts: &[String], groups: Option<&[String]>) -> bool {
        let Some(groups) = groups else {
            return false;
        };
        if self.inner.is_empty() {
            return false;
        }

        for host in hosts {
            let allowed = self.groups_for_host(host);
            if let Some(group) = allowed.iter().find(|g| groups.contains(g)) {
                debug!("group {group} is allowed for host {host}");
                return true;
            }
        }
        false
    }
}
