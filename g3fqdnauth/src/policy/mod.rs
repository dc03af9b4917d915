/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::config::{PluginConfiguration, SECTION_GROUPS_FOR_HOSTS, SECTION_HOSTS_FOR_GROUPS};
use crate::verdict::Verdict;

mod groups_for_hosts;
mod hosts_for_groups;

pub use groups_for_hosts::GroupsForHostsRule;
pub use hosts_for_groups::HostsForGroupsRule;

/// The group whose hosts are allowed for every session.
pub const ALL_GROUPS: &str = "__all__";

/// Split a raw config value into patterns or group names.
///
/// Every single `,`, ` ` or `\n` is a delimiter, so adjacent delimiters will
/// produce empty tokens, which never match a real host.
pub fn split_entry(entry: &str) -> impl Iterator<Item = &str> {
    entry.split([',', ' ', '\n'])
}

/// Host and group based matcher, with the tables derived from the config.
#[derive(Clone, Debug, Default)]
pub struct PolicyMatcher {
    hosts_for_groups: HostsForGroupsRule,
    groups_for_hosts: GroupsForHostsRule,
}

impl PolicyMatcher {
    pub fn new(hosts_for_groups: HostsForGroupsRule, groups_for_hosts: GroupsForHostsRule) -> Self {
        PolicyMatcher {
            hosts_for_groups,
            groups_for_hosts,
        }
    }

    pub fn from_config<C>(config: &C) -> Self
    where
        C: PluginConfiguration + ?Sized,
    {
        let mut hosts_for_groups = HostsForGroupsRule::default();
        for group in config.get_options(SECTION_HOSTS_FOR_GROUPS) {
            if let Some(value) = config.get(SECTION_HOSTS_FOR_GROUPS, group) {
                hosts_for_groups.add_group(group, value);
            }
        }

        let mut groups_for_hosts = GroupsForHostsRule::default();
        for pattern in config.get_options(SECTION_GROUPS_FOR_HOSTS) {
            if let Some(value) = config.get(SECTION_GROUPS_FOR_HOSTS, pattern) {
                groups_for_hosts.add_host(pattern, value);
            }
        }

        PolicyMatcher::new(hosts_for_groups, groups_for_hosts)
    }

    #[inline]
    pub fn hosts_for_groups(&self) -> &HostsForGroupsRule {
        &self.hosts_for_groups
    }

    #[inline]
    pub fn groups_for_hosts(&self) -> &GroupsForHostsRule {
        &self.groups_for_hosts
    }

    /// Decide for the resolved `hosts` of the target and the `groups` of the
    /// session, `None` if the session has no group info at all.
    pub fn decide(&self, hosts: &[String], groups: Option<&[String]>) -> Verdict {
        let accept = self.hosts_for_groups.check(hosts, groups)
            || self.groups_for_hosts.check(hosts, groups);
        Verdict::from(accept)
    }
}
