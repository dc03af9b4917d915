/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint, value_parser};
use clap_complete::Shell;

use crate::plugin::AuthorizeRequest;

const ARGS_COMPLETION: &str = "completion";
const ARGS_VERSION: &str = "version";
const ARGS_VERBOSE: &str = "verbose";
const ARGS_CONFIG_FILE: &str = "config-file";
const ARGS_TEST_CONFIG: &str = "test-config";
const ARGS_TARGET: &str = "target";
const ARGS_GROUP: &str = "group";
const ARGS_EMPTY_GROUPS: &str = "empty-groups";

#[derive(Debug, Default)]
pub struct ProcArgs {
    pub verbose_level: u8,
    pub config_file: PathBuf,
    pub test_config: bool,
    pub target_server: Option<String>,
    pub gateway_groups: Option<Vec<String>>,
}

impl ProcArgs {
    pub fn authorize_request(&self) -> Option<AuthorizeRequest> {
        let target = self.target_server.as_ref()?;
        let mut req = AuthorizeRequest::new(target.as_str());
        req.gateway_groups.clone_from(&self.gateway_groups);
        Some(req)
    }

    fn parse_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        let mut proc_args = ProcArgs {
            verbose_level: args.get_count(ARGS_VERBOSE),
            test_config: args.get_flag(ARGS_TEST_CONFIG),
            ..Default::default()
        };

        if let Some(config_file) = args.get_one::<PathBuf>(ARGS_CONFIG_FILE) {
            proc_args.config_file.clone_from(config_file);
        } else {
            return Err(anyhow!("no config file given"));
        }

        proc_args.target_server = args.get_one::<String>(ARGS_TARGET).cloned();
        if let Some(groups) = args.get_many::<String>(ARGS_GROUP) {
            proc_args.gateway_groups = Some(groups.cloned().collect());
        } else if args.get_flag(ARGS_EMPTY_GROUPS) {
            proc_args.gateway_groups = Some(Vec::new());
        }

        Ok(proc_args)
    }
}

fn build_cli_args() -> Command {
    Command::new(crate::build::PKG_NAME)
        .disable_version_flag(true)
        .arg(
            Arg::new(ARGS_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(ARGS_VERSION)
                .help("Show version")
                .action(ArgAction::SetTrue)
                .short('V')
                .long("version"),
        )
        .arg(
            Arg::new(ARGS_VERBOSE)
                .help("Show verbose output")
                .action(ArgAction::Count)
                .short('v')
                .long("verbose"),
        )
        .arg(
            Arg::new(ARGS_CONFIG_FILE)
                .help("Config file path")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .required_unless_present_any([ARGS_COMPLETION, ARGS_VERSION])
                .short('c')
                .long("config-file"),
        )
        .arg(
            Arg::new(ARGS_TEST_CONFIG)
                .help("Test the format of config file and exit")
                .action(ArgAction::SetTrue)
                .short('T')
                .long("test-config"),
        )
        .arg(
            Arg::new(ARGS_TARGET)
                .help("Target server ip address")
                .num_args(1)
                .value_name("IP")
                .required_unless_present_any([ARGS_COMPLETION, ARGS_VERSION, ARGS_TEST_CONFIG])
                .short('t')
                .long("target"),
        )
        .arg(
            Arg::new(ARGS_GROUP)
                .help("Gateway group of the session, can be set multiple times")
                .action(ArgAction::Append)
                .value_name("GROUP")
                .short('g')
                .long("group"),
        )
        .arg(
            Arg::new(ARGS_EMPTY_GROUPS)
                .help("The session has group info, but with no group in it")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARGS_GROUP)
                .long("empty-groups"),
        )
}

pub fn parse_clap() -> anyhow::Result<Option<ProcArgs>> {
    let args_parser = build_cli_args();
    let args = args_parser.get_matches();

    if let Some(target) = args.get_one::<Shell>(ARGS_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(None);
    }

    if args.get_flag(ARGS_VERSION) {
        crate::build::print_version(args.get_count(ARGS_VERBOSE));
        return Ok(None);
    }

    ProcArgs::parse_matches(&args).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ProcArgs> {
        let matches = build_cli_args().try_get_matches_from(args)?;
        ProcArgs::parse_matches(&matches)
    }

    #[test]
    fn groups() {
        let args = parse(&["g3fqdnauth", "-c", "a.yaml", "-t", "1.2.3.4"]).unwrap();
        assert_eq!(args.config_file, PathBuf::from("a.yaml"));
        assert_eq!(args.target_server.as_deref(), Some("1.2.3.4"));
        assert_eq!(args.gateway_groups, None);

        let args = parse(&[
            "g3fqdnauth", "-c", "a.yaml", "-t", "1.2.3.4", "-g", "g1", "--group", "g2",
        ])
        .unwrap();
        assert_eq!(
            args.gateway_groups,
            Some(vec!["g1".to_string(), "g2".to_string()])
        );

        let args = parse(&["g3fqdnauth", "-c", "a.yaml", "-t", "1.2.3.4", "--empty-groups"]).unwrap();
        assert_eq!(args.gateway_groups, Some(Vec::new()));
        let req = args.authorize_request().unwrap();
        assert_eq!(req.target_server, "1.2.3.4");
        assert_eq!(req.gateway_groups, Some(Vec::new()));
    }

    #[test]
    fn test_config() {
        let args = parse(&["g3fqdnauth", "-c", "a.yaml", "-T", "-vv"]).unwrap();
        assert!(args.test_config);
        assert_eq!(args.verbose_level, 2);
        assert!(args.authorize_request().is_none());
    }

    #[test]
    fn invalid() {
        assert!(parse(&["g3fqdnauth", "-t", "1.2.3.4"]).is_err());
        assert!(parse(&["g3fqdnauth", "-c", "a.yaml"]).is_err());
        assert!(
            parse(&[
                "g3fqdnauth",
                "-c",
                "a.yaml",
                "-t",
                "1.2.3.4",
                "-g",
                "g1",
                "--empty-groups"
            ])
            .is_err()
        );
    }
}
