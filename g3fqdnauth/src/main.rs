/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::process::ExitCode;

use anyhow::Context;
use log::{debug, info};

use g3fqdnauth::config::FqdnAuthConfig;
use g3fqdnauth::{FqdnAuthPlugin, Verdict};

/// Exit status when no verdict could be made, distinct from DENY.
const EXIT_CODE_NO_VERDICT: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(verdict)) if verdict.is_accept() => ExitCode::SUCCESS,
        Ok(Some(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(EXIT_CODE_NO_VERDICT)
        }
    }
}

fn run() -> anyhow::Result<Option<Verdict>> {
    let Some(proc_args) =
        g3fqdnauth::opts::parse_clap().context("failed to parse command line options")?
    else {
        return Ok(None);
    };

    // set up process logger early, only proc args is used inside
    let _log_guard =
        g3fqdnauth::log::setup(proc_args.verbose_level).context("failed to setup logger")?;

    let config = FqdnAuthConfig::load(&proc_args.config_file)
        .context(format!("failed to load config, opts: {:?}", &proc_args))?;
    debug!("loaded config from {}", proc_args.config_file.display());

    if proc_args.test_config {
        info!("the format of the config file is ok");
        return Ok(None);
    }

    let Some(request) = proc_args.authorize_request() else {
        return Err(anyhow::anyhow!("no target server given"));
    };

    let resolver = config.resolver().build();
    let plugin = FqdnAuthPlugin::new(config, resolver);

    let verdict = plugin.authorize(&request).context(format!(
        "failed to authorize target server {}",
        request.target_server
    ))?;
    println!("{verdict}");
    Ok(Some(verdict))
}
