/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use indexmap::IndexMap;
use log::debug;

use g3_fnmatch::FnMatchPattern;

use super::{ALL_GROUPS, split_entry};

/// Hosts allowed for each group.
#[derive(Clone, Debug, Default)]
pub struct HostsForGroupsRule {
    inner: IndexMap<String, Vec<FnMatchPattern>>,
}

impl HostsForGroupsRule {
    /// Set the host patterns of `group` from the raw config value.
    pub fn add_group(&mut self, group: &str, raw_patterns: &str) {
        let patterns = split_entry(raw_patterns).map(FnMatchPattern::new).collect();
        self.inner.insert(group.to_string(), patterns);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn patterns(&self, group: &str) -> Option<&[FnMatchPattern]> {
        self.inner.get(group).map(|v| v.as_slice())
    }

    /// Check if any of `hosts` is allowed for `__all__` or any of `groups`.
    pub fn check(&self, hosts: &[String], groups: Option<&[String]>) -> bool {
        if self.inner.is_empty() {
            return false;
        }

        let groups = groups.unwrap_or_default();
        let candidates = std::iter::once(ALL_GROUPS).chain(groups.iter().map(|s| s.as_str()));
        for group in candidates {
            if self.group_allows(group, hosts) {
                return true;
            }
        }
        false
    }

    fn group_allows(&self, group: &str, hosts: &[String]) -> bool {
        let Some(patterns) = self.inner.get(group) else {
            return false;
        };

        for host in hosts {
            for pattern in patterns {
                if pattern.is_match(host) {
                    debug!("host {host} matched pattern '{pattern}' allowed for group {group}");
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_table() {
        let rule = HostsForGroupsRule::default();
        assert!(!rule.check(&strings(&["host1234"]), None));
        assert!(!rule.check(&strings(&["host1234"]), Some(&strings(&["__all__"]))));
    }

    #[test]
    fn all_group() {
        let mut rule = HostsForGroupsRule::default();
        rule.add_group("__all__", "host4567, foo, host1234, bar");

        assert!(rule.check(&strings(&["host1234"]), None));
        assert!(rule.check(&strings(&["host1234"]), Some(&[])));
        assert!(rule.check(
            &strings(&["badhost1", "host1234", "badhost2"]),
            Some(&strings(&["other"]))
        ));
        assert!(!rule.check(&strings(&["different_host"]), None));
    }

    #[test]
    fn caller_group() {
        let mut rule = HostsForGroupsRule::default();
        rule.add_group("test_group", "host1234,other_host,foo,bar");

        let hosts = strings(&["host1234"]);
        assert!(rule.check(
            &hosts,
            Some(&strings(&["fake_group", "foo", "bar", "test_group"]))
        ));
        assert!(!rule.check(&hosts, Some(&strings(&["fake_group"]))));
        assert!(!rule.check(&hosts, None));
    }

    #[test]
    fn group_name_case_sensitive() {
        let mut rule = HostsForGroupsRule::default();
        rule.add_group("Admins", "*");
        assert!(rule.check(&strings(&["host1"]), Some(&strings(&["Admins"]))));
        assert!(!rule.check(&strings(&["host1"]), Some(&strings(&["admins"]))));
    }

    #[test]
    fn wildcard() {
        let mut rule = HostsForGroupsRule::default();
        rule.add_group("__all__", "h?st*");
        assert!(rule.check(&strings(&["host1234"]), None));

        let mut rule = HostsForGroupsRule::default();
        rule.add_group("__all__", "*bar");
        assert!(rule.check(&strings(&["host1234", "foobar"]), None));

        let mut rule = HostsForGroupsRule::default();
        rule.add_group("__all__", "Host*");
        assert!(!rule.check(&strings(&["host1234"]), None));
    }

    #[test]
    fn empty_tokens_never_match() {
        let mut rule = HostsForGroupsRule::default();
        rule.add_group("__all__", ", \n");
        assert_eq!(rule.patterns("__all__").map(|p| p.len()), Some(4));
        assert!(!rule.check(&strings(&["host1234"]), None));
    }
}
