mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cli(base: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bundul_cli").unwrap();
    cmd.env("BUNDUL_CLI_SCRIPT", "1")
        .env("BUNDUL_HOME", base)
        .env("BUNDUL_TODAY", "2025-10-22")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_lists_and_pays() {
    let base = common::temp_base_dir();
    cli(&base)
        .write_stdin("list\npay 5\npay-now\nhistory\nexit\n")
        .assert()
        .success()
        .stdout(contains("=== Due Payments ==="))
        .stdout(contains("8 upcoming payments, $235.92"))
        .stdout(contains("Service: Disney+"))
        .stdout(contains("Payment Confirmed"))
        .stdout(contains("Total paid: $7.99"));

    let stored = std::fs::read_to_string(base.join("store.json")).unwrap();
    assert!(stored.contains("@bundul_paid_payments"));

    cli(&base)
        .write_stdin("filter paid\nexit\n")
        .assert()
        .success()
        .stdout(contains("#5"))
        .stdout(contains("You've paid $7.99 in October"));
}

#[test]
fn script_mode_pay_later_uses_inline_prompt() {
    let base = common::temp_base_dir();
    cli(&base)
        .write_stdin("pay 2\nlater\nconfirm\nshow\nexit\n")
        .assert()
        .success()
        .stdout(contains("Are you sure you want to pay Apple One later?"))
        .stdout(contains("Payment postponed."))
        .stdout(contains("Nothing open."));
}

#[test]
fn due_soon_filter_shows_badges() {
    let base = common::temp_base_dir();
    cli(&base)
        .write_stdin("filter dueSoon\nexit\n")
        .assert()
        .success()
        .stdout(contains("[1 day left]"))
        .stdout(contains("[3 days left]"))
        .stdout(contains("Spotify").not());
}

#[test]
fn unknown_command_suggests_close_match() {
    let base = common::temp_base_dir();
    cli(&base)
        .write_stdin("lst\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`"))
        .stdout(contains("Suggestion: `list`?"));
}

#[test]
fn invalid_arguments_are_reported_without_exiting() {
    let base = common::temp_base_dir();
    cli(&base)
        .write_stdin("pay abc\npay 99\nfilter sideways\nstatus\nexit\n")
        .assert()
        .success()
        .stdout(contains("`abc` is not a payment id"))
        .stdout(contains("Payment not found: 99"))
        .stdout(contains("Unknown filter `sideways`"))
        .stdout(contains("Today        : 2025-10-22"));
}

#[test]
fn bad_today_override_fails_startup() {
    let base = common::temp_base_dir();
    cli(&base)
        .env("BUNDUL_TODAY", "yesterday")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(contains("BUNDUL_TODAY"));
}
