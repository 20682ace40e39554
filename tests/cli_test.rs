mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::write_file;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

const FAST_CONFIG: &str = r#"{"settle_delays": {"credentials_ms": 1, "payment_ms": 1}}"#;

fn run(script: &str) -> assert_cmd::assert::Assert {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("session.csv");
    let config_path = dir.path().join("config.json");
    write_file(&script_path, script);
    write_file(&config_path, FAST_CONFIG);

    let mut cmd = Command::new(cargo_bin!("checkout_wizard"));
    cmd.arg(&script_path)
        .arg("--config")
        .arg(&config_path)
        .arg("--today")
        .arg("2024-01-01");
    cmd.assert()
}

#[test]
fn test_cli_full_session() {
    let script = "action,field,value
input,email,a@b.com
input,password,longpass1
submit,,
wait,,
input,cardholderName,Ada Lovelace
input,cardNumber,4539 1488 0343 6467
input,expiryDate,12/25
input,cvv,123
submit,,
wait,,
exit,,
";
    run(script)
        .success()
        .stdout(predicate::str::contains(r#"{"step":"complete","errors":{}}"#));
}

#[test]
fn test_cli_reports_errors_without_values() {
    let script = "action,field,value
input,email,bad
input,password,short
submit,,
";
    run(script)
        .success()
        .stdout(predicate::str::contains(r#""step":"credentials""#))
        .stdout(predicate::str::contains("name@domain.com"))
        .stdout(predicate::str::contains("at least 8 characters"))
        .stdout(predicate::str::contains("short").not())
        .stdout(predicate::str::contains("bad").not());
}

#[test]
fn test_cli_unknown_field_is_skipped() {
    let script = "action,field,value
input,nickname,x
input,email,a@b.com
";
    run(script)
        .success()
        .stderr(predicate::str::contains("Unknown field: nickname"))
        .stdout(predicate::str::contains(r#""step":"credentials""#));
}
