//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! responds to `--help` with appropriate text. No network access.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `usher` binary.
fn usher() -> Command {
    Command::cargo_bin("usher").expect("binary 'usher' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    usher()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: usher"))
        .stdout(predicate::str::contains("stream"))
        .stdout(predicate::str::contains("vod"))
        .stdout(predicate::str::contains("--client-id"));
}

#[test]
fn short_help_flag_shows_usage() {
    usher()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: usher"));
}

#[test]
fn version_flag_shows_semver() {
    usher()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^usher \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    usher()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: usher"));
}

#[test]
fn invalid_subcommand_fails() {
    usher()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn stream_help() {
    usher()
        .args(["stream", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("live channel"))
        .stdout(predicate::str::contains("<CHANNEL>"))
        .stdout(predicate::str::contains("--raw"));
}

#[test]
fn vod_help() {
    usher()
        .args(["vod", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("archived video"))
        .stdout(predicate::str::contains("<ID>"))
        .stdout(predicate::str::contains("--raw"));
}

// ─── Subcommand argument validation ──────────────────────────────────────────

#[test]
fn stream_missing_channel_fails() {
    usher()
        .arg("stream")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<CHANNEL>"));
}

#[test]
fn vod_missing_id_fails() {
    usher()
        .arg("vod")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ID>"));
}
