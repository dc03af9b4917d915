/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use indexmap::IndexMap;

mod resolver;
pub use resolver::ResolverConfig;

mod yaml;
pub use yaml::FqdnAuthConfig;

pub const SECTION_HOSTS_FOR_GROUPS: &str = "hosts_for_groups";
pub const SECTION_GROUPS_FOR_HOSTS: &str = "groups_for_hosts";

/// Section / key-value store the policy tables are read from.
pub trait PluginConfiguration {
    /// Get the raw string value of `key` in `section`.
    fn get(&self, section: &str, key: &str) -> Option<&str>;

    /// Get all keys present in `section`, in config order.
    ///
    /// A missing section has no keys.
    fn get_options(&self, section: &str) -> Vec<&str>;
}

impl<T: PluginConfiguration + ?Sized> PluginConfiguration for &T {
    fn get(&self, section: &str, key: &str) -> Option<&str> {
        (**self).get(section, key)
    }

    fn get_options(&self, section: &str) -> Vec<&str> {
        (**self).get_options(section)
    }
}

/// In memory plugin configuration, keeping the insert order of both sections
/// and keys.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MapPluginConfig {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl MapPluginConfig {
    /// Set the raw value of `key` in `section`.
    ///
    /// An existing key keeps its position and only gets the new value.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    pub fn with(mut self, section: &str, key: &str, value: impl Into<String>) -> Self {
        self.set(section, key, value);
        self
    }

    /// Create an empty section if not present.
    pub fn add_section(&mut self, section: &str) {
        self.sections.entry(section.to_string()).or_default();
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }
}

impl PluginConfiguration for MapPluginConfig {
    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|map| map.get(key))
            .map(|v| v.as_str())
    }

    fn get_options(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|map| map.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Normalize a config key, so `Hosts-For-Groups` is the same as `hosts_for_groups`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}
