/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::IpAddr;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use super::normalize_key;
use super::yaml::{as_raw_list, as_scalar_text, foreach_kv};
use crate::resolve::{HostResolver, NoopHostResolver, StaticHostResolver, SystemHostResolver};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ResolverConfig {
    /// never resolve, match the target ip only
    None,
    #[default]
    System,
    Static(StaticHostResolver),
}

impl ResolverConfig {
    pub(super) fn parse(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::String(s) => ResolverConfig::with_type(s, None),
            Yaml::Hash(map) => {
                let mut resolver_type: Option<String> = None;
                let mut hosts: Option<StaticHostResolver> = None;
                foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                    "type" => {
                        resolver_type = Some(as_scalar_text(v)?);
                        Ok(())
                    }
                    "hosts" => {
                        hosts = Some(parse_static_hosts(v)?);
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;
                let Some(t) = resolver_type else {
                    return Err(anyhow!("no resolver type set"));
                };
                ResolverConfig::with_type(&t, hosts)
            }
            _ => Err(anyhow!(
                "yaml value type for 'resolver' should be 'string' or 'map'"
            )),
        }
    }

    fn with_type(t: &str, hosts: Option<StaticHostResolver>) -> anyhow::Result<Self> {
        match (normalize_key(t).as_str(), hosts) {
            ("static", hosts) => Ok(ResolverConfig::Static(hosts.unwrap_or_default())),
            ("system", None) => Ok(ResolverConfig::System),
            ("none", None) => Ok(ResolverConfig::None),
            ("system" | "none", Some(_)) => Err(anyhow!(
                "'hosts' is only allowed for resolver type 'static'"
            )),
            _ => Err(anyhow!("unsupported resolver type {t}")),
        }
    }

    pub fn build(&self) -> Box<dyn HostResolver + Send + Sync> {
        match self {
            ResolverConfig::None => Box::new(NoopHostResolver),
            ResolverConfig::System => Box::new(SystemHostResolver),
            ResolverConfig::Static(resolver) => Box::new(resolver.clone()),
        }
    }
}

fn parse_static_hosts(v: &Yaml) -> anyhow::Result<StaticHostResolver> {
    let Yaml::Hash(map) = v else {
        return Err(anyhow!("yaml value type for 'hosts' should be 'map'"));
    };

    let mut resolver = StaticHostResolver::default();
    for (k, v) in map.iter() {
        let ip = parse_ip_key(k)?;
        let names = as_raw_list(v).context(format!("invalid host names for ip {ip}"))?;
        let names = crate::policy::split_entry(&names)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        resolver.add_hosts(ip, names);
    }
    Ok(resolver)
}

fn parse_ip_key(k: &Yaml) -> anyhow::Result<IpAddr> {
    let s = as_scalar_text(k).context("invalid key type in 'hosts'")?;
    IpAddr::from_str(&s).map_err(|e| anyhow!("invalid ip address {s}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn yaml_doc(s: &str) -> Yaml {
        YamlLoader::load_from_str(s).unwrap().remove(0)
    }

    #[test]
    fn by_type() {
        let v = Yaml::String("system".to_string());
        assert_eq!(ResolverConfig::parse(&v).unwrap(), ResolverConfig::System);

        let v = Yaml::String("none".to_string());
        assert_eq!(ResolverConfig::parse(&v).unwrap(), ResolverConfig::None);

        let v = yaml_doc("type: static");
        assert_eq!(
            ResolverConfig::parse(&v).unwrap(),
            ResolverConfig::Static(StaticHostResolver::default())
        );

        let v = Yaml::String("dns".to_string());
        assert!(ResolverConfig::parse(&v).is_err());
        for alias in ["hosts", "os", "noop"] {
            let v = Yaml::String(alias.to_string());
            assert!(ResolverConfig::parse(&v).is_err());
        }
        assert!(ResolverConfig::parse(&Yaml::Integer(1)).is_err());
    }

    #[test]
    fn static_hosts() {
        let v = yaml_doc(
            r#"
type: static
hosts:
  10.0.0.1: "host1, host1.example.net"
  "::1":
    - localhost
            "#,
        );
        let ResolverConfig::Static(resolver) = ResolverConfig::parse(&v).unwrap() else {
            panic!("not a static resolver");
        };
        assert_eq!(
            resolver.resolve_hosts_by_ip("10.0.0.1").unwrap(),
            vec!["host1", "host1.example.net"]
        );
        assert_eq!(
            resolver.resolve_hosts_by_ip("::1").unwrap(),
            vec!["localhost"]
        );
    }

    #[test]
    fn type_required() {
        let v = yaml_doc("hosts:\n  10.0.0.1: host1");
        assert!(ResolverConfig::parse(&v).is_err());
    }

    #[test]
    fn invalid_static_hosts() {
        let v = yaml_doc("type: static\nhosts:\n  host1: 10.0.0.1");
        assert!(ResolverConfig::parse(&v).is_err());

        let v = yaml_doc("type: system\nhosts:\n  10.0.0.1: host1");
        assert!(ResolverConfig::parse(&v).is_err());

        let v = yaml_doc("type: static\nhosts: [10.0.0.1]");
        assert!(ResolverConfig::parse(&v).is_err());

        let v = yaml_doc("server: 8.8.8.8");
        assert!(ResolverConfig::parse(&v).is_err());
    }

    #[test]
    fn build() {
        let resolver = ResolverConfig::None.build();
        assert!(resolver.resolve_hosts_by_ip("10.0.0.1").unwrap().is_empty());
    }
}
