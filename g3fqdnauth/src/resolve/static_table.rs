/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;

use super::{HostResolver, ResolveError};

/// Resolve from a fixed ip to names table, like a hosts file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticHostResolver {
    table: HashMap<IpAddr, Vec<String>>,
}

impl StaticHostResolver {
    /// Append `hosts` to the names of `ip`.
    pub fn add_hosts<I>(&mut self, ip: IpAddr, hosts: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.table.entry(ip).or_default().extend(hosts);
    }
}

impl HostResolver for StaticHostResolver {
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError> {
        let addr = IpAddr::from_str(ip).map_err(|_| ResolveError::InvalidAddress(ip.to_string()))?;
        Ok(self.table.get(&addr).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn lookup() {
        let mut resolver = StaticHostResolver::default();
        resolver.add_hosts(
            IpAddr::from_str("10.0.0.1").unwrap(),
            ["host1".to_string(), "host1.example.net".to_string()],
        );
        resolver.add_hosts(IpAddr::V6(Ipv6Addr::LOCALHOST), ["localhost".to_string()]);

        assert_eq!(
            resolver.resolve_hosts_by_ip("10.0.0.1").unwrap(),
            vec!["host1", "host1.example.net"]
        );
        assert_eq!(
            resolver.resolve_hosts_by_ip("0:0::1").unwrap(),
            vec!["localhost"]
        );
        assert!(resolver.resolve_hosts_by_ip("10.0.0.2").unwrap().is_empty());
    }

    #[test]
    fn invalid_ip() {
        let resolver = StaticHostResolver::default();
        assert_eq!(
            resolver.resolve_hosts_by_ip("DONTCARE"),
            Err(ResolveError::InvalidAddress("DONTCARE".to_string()))
        );
    }
}
