//! End-to-end runs of the nextcheck binary against a temporary data directory

use assert_cmd::Command;
use chrono::{Datelike, Duration, Local};
use predicates::prelude::*;
use tempfile::TempDir;

fn nextcheck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nextcheck").unwrap();
    cmd.env("NEXTCHECK_DATA_DIR", dir.path())
        .env_remove("NEXTCHECK_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[test]
fn test_show_without_data_is_calculating() {
    let dir = TempDir::new().unwrap();

    nextcheck(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next Check: Calculating..."));
}

#[test]
fn test_show_lists_expense_due_today() {
    let dir = TempDir::new().unwrap();
    let today = Local::now().date_naive();
    let last_pay = today - Duration::days(1);

    nextcheck(&dir)
        .args(["income", "set-pay", &last_pay.format("%Y-%m-%d").to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Most recent pay date set to"));

    nextcheck(&dir)
        .args(["expense", "add", "Rent", "1200", &today.day().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense #1: Rent $1200.00"));

    nextcheck(&dir)
        .args(["expense", "add", "Gym", "30", "0"])
        .assert()
        .failure();

    nextcheck(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"));

    let expected_row = format!("  Rent: $1200.00 on the {}", ordinal(today.day()));
    nextcheck(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("for $1200.00"))
        .stdout(predicate::str::contains(expected_row))
        .stdout(predicate::str::contains("Pay date advanced").not());
}

#[test]
fn test_show_advances_stale_pay_date() {
    let dir = TempDir::new().unwrap();
    let last_pay = Local::now().date_naive() - Duration::days(20);

    nextcheck(&dir)
        .args(["income", "set-pay", &last_pay.format("%Y-%m-%d").to_string()])
        .assert()
        .success();

    let advanced_to = last_pay + Duration::days(14);
    nextcheck(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Pay date advanced to {}",
            advanced_to.format("%Y-%m-%d")
        )));

    // Persisted, so a second run has nothing left to advance
    nextcheck(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay date advanced").not());
}

#[test]
fn test_show_json() {
    let dir = TempDir::new().unwrap();
    let last_pay = Local::now().date_naive() - Duration::days(2);

    nextcheck(&dir)
        .args(["income", "set-pay", &last_pay.format("%Y-%m-%d").to_string()])
        .assert()
        .success();

    nextcheck(&dir)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"ready\""));
}

#[test]
fn test_set_pay_rejects_bad_date() {
    let dir = TempDir::new().unwrap();

    nextcheck(&dir)
        .args(["income", "set-pay", "06/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pay date"));
}

#[test]
fn test_oversized_cycle_rejected() {
    let dir = TempDir::new().unwrap();

    nextcheck(&dir)
        .args(["--cycle-days", "4000000000", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle_length_days must be between 1 and 366"));
}

#[test]
fn test_remote_requires_income_id() {
    let dir = TempDir::new().unwrap();

    nextcheck(&dir)
        .args(["--api-url", "http://127.0.0.1:9", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("income ID"));
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    nextcheck(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle length:      14 days"))
        .stdout(predicate::str::contains("local store"));
}
