/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::{debug, info};

use crate::config::PluginConfiguration;
use crate::policy::PolicyMatcher;
use crate::resolve::{HostResolver, ResolveError, resolve_target};
use crate::verdict::Verdict;

/// Session info needed to authorize a connection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthorizeRequest {
    /// target server ip
    pub target_server: String,
    /// `None` if the gateway has no group info for this session
    pub gateway_groups: Option<Vec<String>>,
}

impl AuthorizeRequest {
    pub fn new(target_server: impl Into<String>) -> Self {
        AuthorizeRequest {
            target_server: target_server.into(),
            gateway_groups: None,
        }
    }

    pub fn with_gateway_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gateway_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }
}

pub struct FqdnAuthPlugin<C, R> {
    config: C,
    resolver: R,
}

impl<C, R> FqdnAuthPlugin<C, R>
where
    C: PluginConfiguration,
    R: HostResolver,
{
    pub fn new(config: C, resolver: R) -> Self {
        FqdnAuthPlugin { config, resolver }
    }

    /// Credentials are never checked, always pass without a verdict.
    pub fn authenticate(&self) -> Option<Verdict> {
        None
    }

    /// Authorize the session by the resolved names of the target server.
    ///
    /// A resolver error is returned as is, and no verdict will be made. It is
    /// up to the caller to report it.
    pub fn authorize(&self, request: &AuthorizeRequest) -> Result<Verdict, ResolveError> {
        let target = request.target_server.as_str();
        let hosts = resolve_target(&self.resolver, target).inspect_err(|e| {
            debug!("failed to resolve target server {target}: {e}");
        })?;

        // the tables are derived from the config for each decision
        let matcher = PolicyMatcher::from_config(&self.config);
        let groups = request.gateway_groups.as_deref();
        let verdict = matcher.decide(&hosts, groups);
        info!("target server {target} ({hosts:?}) with groups {groups:?}: {verdict}");
        Ok(verdict)
    }
}
