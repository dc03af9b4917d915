/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::IpAddr;
use std::str::FromStr;

use super::{HostResolver, ResolveError};

/// Reverse lookup through the resolver of the operating system.
///
/// Only the primary name returned by `getnameinfo` is used, so at most one
/// host name is found, and PTR aliases are never candidates. Use the static
/// resolver if more names of an address should be matched.
///
/// The call blocks until the system resolver returns, any timeout policy is
/// left to the system resolver config.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn resolve_hosts_by_ip(&self, ip: &str) -> Result<Vec<String>, ResolveError> {
        let addr = IpAddr::from_str(ip).map_err(|_| ResolveError::InvalidAddress(ip.to_string()))?;
        let name = lookup_name(addr)?;
        Ok(name.into_iter().collect())
    }
}

#[cfg(unix)]
fn lookup_name(ip: IpAddr) -> Result<Option<String>, ResolveError> {
    use std::ffi::CStr;
    use std::net::SocketAddr;

    use socket2::SockAddr;

    const NI_MAXHOST: usize = 1025;

    let addr = SockAddr::from(SocketAddr::new(ip, 0));
    let mut host = [0 as libc::c_char; NI_MAXHOST];
    let r = unsafe {
        libc::getnameinfo(
            addr.as_ptr().cast(),
            addr.len() as libc::socklen_t,
            host.as_mut_ptr(),
            host.len() as libc::socklen_t,
            std::ptr::null_mut(),
            0,
            libc::NI_NAMEREQD,
        )
    };
    match r {
        0 => {
            let name = unsafe { CStr::from_ptr(host.as_ptr()) };
            let name = name.to_string_lossy();
            if name.is_empty() {
                Ok(None)
            } else {
                Ok(Some(name.into_owned()))
            }
        }
        libc::EAI_NONAME => Ok(None),
        code => {
            let reason = unsafe { CStr::from_ptr(libc::gai_strerror(code)) };
            Err(ResolveError::Lookup {
                code,
                reason: reason.to_string_lossy().into_owned(),
            })
        }
    }
}

#[cfg(not(unix))]
fn lookup_name(_ip: IpAddr) -> Result<Option<String>, ResolveError> {
    Err(ResolveError::Unexpected(
        "system reverse lookup is not supported on this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_ip() {
        let e = SystemHostResolver
            .resolve_hosts_by_ip("host1234")
            .unwrap_err();
        assert_eq!(e, ResolveError::InvalidAddress("host1234".to_string()));
    }

    #[test]
    fn single_name() {
        // the lookup result depends on the host, but never has aliases
        if let Ok(names) = SystemHostResolver.resolve_hosts_by_ip("127.0.0.1") {
            assert!(names.len() <= 1);
        }
    }
}
