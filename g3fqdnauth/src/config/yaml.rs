/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader, yaml};

use super::{
    MapPluginConfig, PluginConfiguration, ResolverConfig, SECTION_GROUPS_FOR_HOSTS,
    SECTION_HOSTS_FOR_GROUPS, normalize_key,
};

/// The config of the whole plugin, loaded from yaml.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FqdnAuthConfig {
    tables: MapPluginConfig,
    resolver: ResolverConfig,
}

impl FqdnAuthConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file {}: {e}", path.display()))?;
        FqdnAuthConfig::parse(&content)
            .context(format!("invalid config file {}", path.display()))
    }

    /// Parse all yaml docs in `content`, later docs are merged into former ones.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let docs = YamlLoader::load_from_str(content).map_err(|e| anyhow!("invalid yaml: {e}"))?;

        let mut config = FqdnAuthConfig::default();
        for (i, doc) in docs.iter().enumerate() {
            match doc {
                Yaml::Hash(map) => config
                    .load_doc(map)
                    .context(format!("failed to load yaml doc #{i}"))?,
                Yaml::Null => {}
                _ => return Err(anyhow!("yaml doc root should be hash")),
            }
        }
        Ok(config)
    }

    fn load_doc(&mut self, map: &yaml::Hash) -> anyhow::Result<()> {
        foreach_kv(map, |k, v| match normalize_key(k).as_str() {
            SECTION_HOSTS_FOR_GROUPS => self.load_table(SECTION_HOSTS_FOR_GROUPS, v),
            SECTION_GROUPS_FOR_HOSTS => self.load_table(SECTION_GROUPS_FOR_HOSTS, v),
            "resolver" => {
                self.resolver = ResolverConfig::parse(v)?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k} in main conf")),
        })
    }

    fn load_table(&mut self, section: &str, v: &Yaml) -> anyhow::Result<()> {
        self.tables.add_section(section);
        match v {
            Yaml::Hash(map) => {
                for (k, v) in map.iter() {
                    // table keys are names or patterns, keep them as is
                    let key = as_scalar_text(k).context("invalid key type")?;
                    let value =
                        as_raw_list(v).context(format!("failed to parse value of key {key}"))?;
                    self.tables.set(section, &key, value);
                }
                Ok(())
            }
            Yaml::Null => Ok(()),
            _ => Err(anyhow!("yaml value type for '{section}' should be 'map'")),
        }
    }

    #[inline]
    pub fn tables(&self) -> &MapPluginConfig {
        &self.tables
    }

    #[inline]
    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }
}

impl PluginConfiguration for FqdnAuthConfig {
    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.tables.get(section, key)
    }

    fn get_options(&self, section: &str) -> Vec<&str> {
        self.tables.get_options(section)
    }
}

pub(super) fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

/// Get the text of a scalar exactly as written in the document.
///
/// Integers and booleans are not kept verbatim by the yaml loader, `0x1F`
/// would become `31`, so they must be quoted.
pub(super) fn as_scalar_text(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Real(s) => Ok(s.clone()),
        Yaml::Integer(_) | Yaml::Boolean(_) => Err(anyhow!(
            "integer or boolean value should be quoted to keep it as written"
        )),
        _ => Err(anyhow!("yaml value type should be 'string'")),
    }
}

/// Get the raw delimiter separated list form of a value.
///
/// A sequence is joined with newlines, so it splits the same way as a string.
pub(super) fn as_raw_list(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::Array(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for (i, v) in seq.iter().enumerate() {
                let s = as_scalar_text(v).context(format!("invalid value for list element #{i}"))?;
                items.push(s);
            }
            Ok(items.join("\n"))
        }
        Yaml::Null => Ok(String::new()),
        _ => as_scalar_text(v),
    }
}
