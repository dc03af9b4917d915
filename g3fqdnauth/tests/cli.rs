/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::process::{Command, Output};

const CONF_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/conf/fqdnauth.yaml");

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_g3fqdnauth"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn accept() {
    let output = run(&["-c", CONF_FILE, "-t", "10.0.0.1"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "ACCEPT");

    let output = run(&["-c", CONF_FILE, "-t", "10.0.0.2", "-g", "dba"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "ACCEPT");
}

#[test]
fn deny() {
    let output = run(&["-c", CONF_FILE, "-t", "10.0.0.2"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "DENY");

    let output = run(&["-c", CONF_FILE, "-t", "10.0.0.2", "--empty-groups"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "DENY");
}

#[test]
fn resolve_failure_has_no_verdict() {
    let output = run(&["-c", CONF_FILE, "-t", "not_an_ip"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("invalid ip address: not_an_ip").count(), 1);
}

#[test]
fn config_failure_has_no_verdict() {
    let conf = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/conf/not_existed.yaml");
    let output = run(&["-c", conf, "-t", "10.0.0.1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_config() {
    let output = run(&["-c", CONF_FILE, "-T"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}
