/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use log::debug;

mod error;
pub use error::ResolveError;

mod static_table;
pub use static_table::StaticHostResolver;

mod system;
pub use system::SystemHostResolver;

/// Reverse name resolution for the target server of a session.
pub trait HostResolver {
    /// Get the host names of `ip`, in the order the resolver returns them.
    ///
    /// An empty list means the address has no name, it is not an error.
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError>;
}

impl<T: HostResolver + ?Sized> HostResolver for &T {
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError> {
        (**self).resolve_hosts_by_ip(ip)
    }
}

impl<T: HostResolver + ?Sized> HostResolver for Box<T> {
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError> {
        (**self).resolve_hosts_by_ip(ip)
    }
}

impl<T: HostResolver + ?Sized> HostResolver for Arc<T> {
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError> {
        (**self).resolve_hosts_by_ip(ip)
    }
}

/// A resolver that never finds any name, so only the raw ip is matched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHostResolver;

impl HostResolver for NoopHostResolver {
    fn resolve_hosts_by_ip(&self, _ip: &str) -> Result<Vec<String>, ResolveError> {
        Ok(Vec::new())
    }
}

/// Get the host candidates for the target `ip`.
///
/// The result is never empty: if no name is found, the ip itself is the only
/// candidate, so that rules written against ip literals still apply.
pub fn resolve_target<R>(resolver: &R, ip: &str) -> Result<Vec<String>, ResolveError>
where
    R: HostResolver + ?Sized,
{
    let hosts = resolver.resolve_hosts_by_ip(ip)?;
    if hosts.is_empty() {
        debug!("no host name found for {ip}, fallback to the ip itself");
        Ok(vec![ip.to_string()])
    } else {
        debug!("resolved {ip} to {hosts:?}");
        Ok(hosts)
    }
}
